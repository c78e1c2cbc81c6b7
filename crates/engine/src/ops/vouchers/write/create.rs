use sea_orm::{TransactionTrait, prelude::*};

use crate::{
    ChangeAction, ChangeRecord, CreateVoucherCmd, EngineError, ResultEngine, Voucher, vouchers,
};

use super::common::{ItemUpdate, validate_lines};
use super::super::super::{Engine, normalize_optional_text, with_tx};

impl Engine {
    /// Create a voucher and apply its stock effect.
    ///
    /// For every line the product balance moves by `kind.sign() * quantity`.
    /// If any resulting balance would be negative the whole operation is
    /// rejected with a `StockViolation` and nothing is persisted.
    pub async fn create_voucher(&self, cmd: CreateVoucherCmd) -> ResultEngine<Vec<ChangeRecord>> {
        if cmd.lines.is_empty() {
            return Err(EngineError::InvalidQuantity(
                "voucher must have at least one line".to_string(),
            ));
        }
        validate_lines(&cmd.lines)?;

        with_tx!(self, |db_tx| {
            if vouchers::Entity::find_by_id(cmd.voucher_number.as_str())
                .one(&db_tx)
                .await?
                .is_some()
            {
                return Err(EngineError::ExistingKey(cmd.voucher_number.clone()));
            }

            let mut voucher = Voucher::new(cmd.voucher_number.clone(), cmd.kind, cmd.date)?;
            voucher.supplier = normalize_optional_text(cmd.meta.supplier.as_deref());
            voucher.department = normalize_optional_text(cmd.meta.department.as_deref());
            voucher.customer = normalize_optional_text(cmd.meta.customer.as_deref());
            voucher.recipient = normalize_optional_text(cmd.meta.recipient.as_deref());
            voucher.supplier_voucher_number =
                normalize_optional_text(cmd.meta.supplier_voucher_number.as_deref());
            voucher.notes = normalize_optional_text(cmd.meta.notes.as_deref());

            let updates: Vec<ItemUpdate> = cmd
                .lines
                .iter()
                .map(|line| ItemUpdate {
                    product_id: line.product_id.clone(),
                    action: ChangeAction::Added,
                    old_signed_minor: 0,
                    new_signed_minor: cmd.kind.sign() * line.quantity_minor,
                })
                .collect();

            let (previews, records) = self.preview_item_updates(&db_tx, &updates).await?;

            vouchers::ActiveModel::from(&voucher).insert(&db_tx).await?;
            self.insert_voucher_items(&db_tx, &voucher, &cmd.lines, &previews)
                .await?;
            self.persist_product_balances(&db_tx, previews).await?;

            Ok(records)
        })
    }
}
