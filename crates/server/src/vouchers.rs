//! Voucher API endpoints

use api_types::change::{ChangeAction as ApiAction, ChangeView, ChangesResponse};
use api_types::voucher::{
    VoucherDetailResponse, VoucherItemView, VoucherLineNew, VoucherList, VoucherListResponse,
    VoucherNew, VoucherUpdate, VoucherView,
};
use api_types::VoucherKind as ApiKind;
use axum::{
    Form, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::{ServerError, extract, server::ServerState};

fn map_kind(kind: engine::VoucherKind) -> ApiKind {
    match kind {
        engine::VoucherKind::Addition => ApiKind::Addition,
        engine::VoucherKind::Disbursement => ApiKind::Disbursement,
        engine::VoucherKind::CustomerReturn => ApiKind::CustomerReturn,
        engine::VoucherKind::SupplierReturn => ApiKind::SupplierReturn,
    }
}

fn map_api_kind(kind: ApiKind) -> engine::VoucherKind {
    match kind {
        ApiKind::Addition => engine::VoucherKind::Addition,
        ApiKind::Disbursement => engine::VoucherKind::Disbursement,
        ApiKind::CustomerReturn => engine::VoucherKind::CustomerReturn,
        ApiKind::SupplierReturn => engine::VoucherKind::SupplierReturn,
    }
}

fn map_action(action: engine::ChangeAction) -> ApiAction {
    match action {
        engine::ChangeAction::Added => ApiAction::Added,
        engine::ChangeAction::Modified => ApiAction::Modified,
        engine::ChangeAction::Removed => ApiAction::Removed,
    }
}

fn view(voucher: engine::Voucher) -> VoucherView {
    VoucherView {
        voucher_number: voucher.voucher_number,
        kind: map_kind(voucher.kind),
        date: voucher.date,
        supplier: voucher.supplier,
        department: voucher.department,
        customer: voucher.customer,
        recipient: voucher.recipient,
        supplier_voucher_number: voucher.supplier_voucher_number,
        notes: voucher.notes,
        created_at: voucher.created_at,
        updated_at: voucher.updated_at,
    }
}

fn item_view(item: engine::VoucherItem, kind: engine::VoucherKind) -> VoucherItemView {
    VoucherItemView {
        quantity_minor: item.quantity_minor(kind),
        total_price_minor: item.total_price_minor(),
        id: item.id,
        product_id: item.product_id,
        unit_price_minor: item.unit_price_minor,
        machine: item.machine,
        machine_unit: item.machine_unit,
    }
}

fn changes_response(records: Vec<engine::ChangeRecord>) -> ChangesResponse {
    ChangesResponse {
        changes: records
            .into_iter()
            .map(|record| ChangeView {
                label: record.action.label().to_string(),
                action: map_action(record.action),
                product_id: record.product_id,
                name: record.name,
                old_quantity_minor: record.old_quantity_minor,
                new_quantity_minor: record.new_quantity_minor,
                difference_minor: record.difference_minor,
            })
            .collect(),
    }
}

fn lines_to_requests(lines: Vec<VoucherLineNew>) -> Vec<engine::LineRequest> {
    lines
        .into_iter()
        .map(|line| engine::LineRequest {
            product_id: line.product_id,
            quantity_minor: line.quantity_minor,
            machine: line.machine,
            machine_unit: line.machine_unit,
        })
        .collect()
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<VoucherNew>,
) -> Result<(StatusCode, Json<ChangesResponse>), ServerError> {
    let cmd = engine::CreateVoucherCmd {
        voucher_number: payload.voucher_number,
        kind: map_api_kind(payload.kind),
        date: payload.date,
        lines: lines_to_requests(payload.lines),
        meta: engine::VoucherMeta {
            supplier: payload.supplier,
            department: payload.department,
            customer: payload.customer,
            recipient: payload.recipient,
            supplier_voucher_number: payload.supplier_voucher_number,
            notes: payload.notes,
        },
    };

    let records = state.engine.create_voucher(cmd).await?;
    Ok((StatusCode::CREATED, Json(changes_response(records))))
}

/// Accepts the two legacy form submission styles (indexed formset fields
/// and parallel arrays) and funnels them into the same create operation.
pub async fn create_form(
    State(state): State<ServerState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<(StatusCode, Json<ChangesResponse>), ServerError> {
    let cmd = extract::voucher_cmd_from_pairs(&pairs).map_err(ServerError::Generic)?;
    let records = state.engine.create_voucher(cmd).await?;
    Ok((StatusCode::CREATED, Json(changes_response(records))))
}

pub async fn list(
    State(state): State<ServerState>,
    Query(payload): Query<VoucherList>,
) -> Result<Json<VoucherListResponse>, ServerError> {
    let filter = engine::VoucherListFilter {
        kind: payload.kind.map(map_api_kind),
        limit: payload.limit,
    };

    let vouchers = state.engine.list_vouchers(filter).await?;
    Ok(Json(VoucherListResponse {
        vouchers: vouchers.into_iter().map(view).collect(),
    }))
}

pub async fn detail(
    State(state): State<ServerState>,
    Path(voucher_number): Path<String>,
) -> Result<Json<VoucherDetailResponse>, ServerError> {
    let (voucher, items) = state.engine.voucher_detail(&voucher_number).await?;
    let kind = voucher.kind;
    Ok(Json(VoucherDetailResponse {
        items: items
            .into_iter()
            .map(|item| item_view(item, kind))
            .collect(),
        voucher: view(voucher),
    }))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(voucher_number): Path<String>,
    Json(payload): Json<VoucherUpdate>,
) -> Result<Json<ChangesResponse>, ServerError> {
    let cmd = engine::UpdateVoucherCmd {
        voucher_number,
        lines: lines_to_requests(payload.lines),
        date: payload.date,
        supplier: payload.supplier,
        department: payload.department,
        customer: payload.customer,
        recipient: payload.recipient,
        notes: payload.notes,
    };

    let records = state.engine.update_voucher(cmd).await?;
    Ok(Json(changes_response(records)))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(voucher_number): Path<String>,
) -> Result<Json<ChangesResponse>, ServerError> {
    let records = state.engine.delete_voucher(&voucher_number).await?;
    Ok(Json(changes_response(records)))
}
