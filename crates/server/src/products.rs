//! Product API endpoints

use api_types::product::{ProductNew, ProductView, ProductsResponse};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{ServerError, server::ServerState};

fn view(product: engine::Product) -> ProductView {
    ProductView {
        low_stock: product.is_low_stock(),
        product_id: product.product_id,
        name: product.name,
        quantity_minor: product.quantity_minor,
        initial_quantity_minor: product.initial_quantity_minor,
        minimum_threshold_minor: product.minimum_threshold_minor,
        maximum_threshold_minor: product.maximum_threshold_minor,
        unit_price_minor: product.unit_price_minor,
        category: product.category,
        unit: product.unit,
        created_at: product.created_at,
    }
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductNew>,
) -> Result<(StatusCode, Json<ProductView>), ServerError> {
    let cmd = engine::NewProductCmd {
        product_id: payload.product_id,
        name: payload.name,
        initial_quantity_minor: payload.initial_quantity_minor,
        minimum_threshold_minor: payload.minimum_threshold_minor,
        maximum_threshold_minor: payload.maximum_threshold_minor,
        unit_price_minor: payload.unit_price_minor,
        category: payload.category,
        unit: payload.unit,
    };

    let product = state.engine.new_product(cmd).await?;
    Ok((StatusCode::CREATED, Json(view(product))))
}

pub async fn detail(
    State(state): State<ServerState>,
    Path(product_id): Path<String>,
) -> Result<Json<ProductView>, ServerError> {
    let product = state.engine.product(&product_id).await?;
    Ok(Json(view(product)))
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<ProductsResponse>, ServerError> {
    let products = state.engine.list_products().await?;
    Ok(Json(ProductsResponse {
        products: products.into_iter().map(view).collect(),
    }))
}

pub async fn list_low_stock(
    State(state): State<ServerState>,
) -> Result<Json<ProductsResponse>, ServerError> {
    let products = state.engine.list_low_stock_products().await?;
    Ok(Json(ProductsResponse {
        products: products.into_iter().map(view).collect(),
    }))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(product_id): Path<String>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_product(&product_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
