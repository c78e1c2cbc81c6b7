use std::collections::HashMap;

use sea_orm::{ActiveValue, DatabaseTransaction, prelude::*};

use crate::{
    ChangeAction, ChangeRecord, EngineError, LineRequest, ResultEngine, Voucher, VoucherItem,
    products, voucher_items,
};

use super::super::super::{Engine, normalize_optional_text};

/// One signed balance movement for a product: positive values increase the
/// balance, negative values decrease it.
///
/// `old_signed_minor` is the effect currently on the books (zero for new
/// lines), `new_signed_minor` the requested effect (zero for removals).
/// Only the net difference is ever applied, so a product present in both
/// the old and new state of a voucher is never double-counted.
pub(super) struct ItemUpdate {
    pub product_id: String,
    pub action: ChangeAction,
    pub old_signed_minor: i64,
    pub new_signed_minor: i64,
}

/// Accumulated view of one product during a write operation.
pub(super) struct ProductPreview {
    pub name: String,
    pub unit_price_minor: i64,
    /// Running balance after the updates applied so far.
    pub quantity_minor: i64,
}

pub(super) fn validate_lines(lines: &[LineRequest]) -> ResultEngine<()> {
    for line in lines {
        if line.product_id.trim().is_empty() {
            return Err(EngineError::InvalidId(
                "line product id must not be empty".to_string(),
            ));
        }
        if line.quantity_minor <= 0 {
            return Err(EngineError::InvalidQuantity(
                "line quantity must be > 0".to_string(),
            ));
        }
    }
    Ok(())
}

impl Engine {
    /// Validate balance changes by simulating them over an accumulating map
    /// (one DB read per distinct product), emitting a change record per
    /// update. Any balance that would drop below zero aborts the whole
    /// operation before anything is persisted.
    pub(super) async fn preview_item_updates(
        &self,
        db_tx: &DatabaseTransaction,
        updates: &[ItemUpdate],
    ) -> ResultEngine<(HashMap<String, ProductPreview>, Vec<ChangeRecord>)> {
        let mut previews: HashMap<String, ProductPreview> = HashMap::new();

        for update in updates {
            if previews.contains_key(&update.product_id) {
                continue;
            }
            let model = products::Entity::find_by_id(update.product_id.as_str())
                .one(db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("product not exists".to_string()))?;
            previews.insert(
                update.product_id.clone(),
                ProductPreview {
                    name: model.name,
                    unit_price_minor: model.unit_price_minor,
                    quantity_minor: model.quantity_minor,
                },
            );
        }

        let mut records = Vec::with_capacity(updates.len());
        for update in updates {
            let Some(preview) = previews.get_mut(&update.product_id) else {
                continue;
            };
            let old_quantity = preview.quantity_minor;
            let new_quantity = old_quantity - update.old_signed_minor + update.new_signed_minor;
            if new_quantity < 0 {
                return Err(EngineError::StockViolation {
                    product_id: update.product_id.clone(),
                    name: preview.name.clone(),
                    quantity_minor: old_quantity,
                });
            }
            preview.quantity_minor = new_quantity;
            records.push(ChangeRecord {
                product_id: update.product_id.clone(),
                name: preview.name.clone(),
                action: update.action,
                old_quantity_minor: old_quantity,
                new_quantity_minor: new_quantity,
                difference_minor: new_quantity - old_quantity,
            });
        }

        Ok((previews, records))
    }

    /// Insert fresh item rows for a voucher, snapshotting each product's
    /// unit price from the previews loaded during the preview pass.
    pub(super) async fn insert_voucher_items(
        &self,
        db_tx: &DatabaseTransaction,
        voucher: &Voucher,
        lines: &[LineRequest],
        previews: &HashMap<String, ProductPreview>,
    ) -> ResultEngine<()> {
        for line in lines {
            let unit_price_minor = previews
                .get(&line.product_id)
                .map(|preview| preview.unit_price_minor)
                .unwrap_or(0);
            let mut item = VoucherItem::new(
                voucher.voucher_number.clone(),
                line.product_id.clone(),
                voucher.kind,
                line.quantity_minor,
                unit_price_minor,
            );
            if voucher.kind.carries_machine() {
                item.machine = normalize_optional_text(line.machine.as_deref());
                item.machine_unit = normalize_optional_text(line.machine_unit.as_deref());
            }
            voucher_items::ActiveModel::from(&item).insert(db_tx).await?;
        }
        Ok(())
    }

    /// Persist the denormalized product balances computed by the preview.
    pub(super) async fn persist_product_balances(
        &self,
        db_tx: &DatabaseTransaction,
        previews: HashMap<String, ProductPreview>,
    ) -> ResultEngine<()> {
        for (product_id, preview) in previews {
            let product_model = products::ActiveModel {
                product_id: ActiveValue::Set(product_id),
                quantity_minor: ActiveValue::Set(preview.quantity_minor),
                ..Default::default()
            };
            product_model.update(db_tx).await?;
        }
        Ok(())
    }
}
