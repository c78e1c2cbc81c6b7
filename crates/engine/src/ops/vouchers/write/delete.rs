use sea_orm::{QueryFilter, TransactionTrait, prelude::*};

use crate::{
    ChangeAction, ChangeRecord, EngineError, ResultEngine, Voucher, VoucherItem, voucher_items,
    vouchers,
};

use super::common::ItemUpdate;
use super::super::super::{Engine, with_tx};

impl Engine {
    /// Delete a voucher, reversing its stock effect.
    ///
    /// Each item's contribution is subtracted back out of its product. If a
    /// later movement already consumed that stock, the reversal would
    /// underflow and the deletion is rejected with a `StockViolation`
    /// before any row is touched.
    pub async fn delete_voucher(&self, voucher_number: &str) -> ResultEngine<Vec<ChangeRecord>> {
        with_tx!(self, |db_tx| {
            let model = vouchers::Entity::find_by_id(voucher_number)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("voucher not exists".to_string()))?;
            let voucher = Voucher::try_from(model)?;

            let item_models = voucher_items::Entity::find()
                .filter(voucher_items::Column::VoucherNumber.eq(voucher_number))
                .all(&db_tx)
                .await?;
            let mut items = Vec::with_capacity(item_models.len());
            for item_model in item_models {
                items.push(VoucherItem::try_from(item_model)?);
            }

            let updates: Vec<ItemUpdate> = items
                .iter()
                .map(|item| ItemUpdate {
                    product_id: item.product_id.clone(),
                    action: ChangeAction::Removed,
                    old_signed_minor: voucher.kind.sign() * item.quantity_minor(voucher.kind),
                    new_signed_minor: 0,
                })
                .collect();

            let (previews, records) = self.preview_item_updates(&db_tx, &updates).await?;

            voucher_items::Entity::delete_many()
                .filter(voucher_items::Column::VoucherNumber.eq(voucher_number))
                .exec(&db_tx)
                .await?;
            vouchers::Entity::delete_by_id(voucher_number)
                .exec(&db_tx)
                .await?;

            self.persist_product_balances(&db_tx, previews).await?;

            Ok(records)
        })
    }
}
