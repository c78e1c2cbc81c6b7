use std::collections::{HashMap, HashSet};

use chrono::Utc;
use sea_orm::{QueryFilter, TransactionTrait, prelude::*};

use crate::{
    ChangeAction, ChangeRecord, EngineError, ResultEngine, UpdateVoucherCmd, Voucher, VoucherItem,
    voucher_items, vouchers,
};

use super::common::{ItemUpdate, validate_lines};
use super::super::super::{Engine, normalize_optional_text, with_tx};

fn apply_optional_text_patch(existing: Option<String>, patch: Option<&str>) -> Option<String> {
    match patch {
        None => existing,
        Some(value) => normalize_optional_text(Some(value)),
    }
}

impl Engine {
    /// Update a voucher: replace its lines with a new list and reconcile
    /// product balances against what is currently on the books.
    ///
    /// Products are matched by code across the old and new lines, with
    /// duplicate lines for the same product summed on each side first:
    /// - removed products get their old total reversed,
    /// - kept products move by the net delta between totals only (never
    ///   reversed and reapplied in full),
    /// - new products get the full new total.
    ///
    /// The voucher's kind is taken from the stored row; an empty line list
    /// removes every item while keeping the header. All old item rows are
    /// replaced with fresh rows built from the new list. Any balance that
    /// would go negative in any pass aborts the whole operation.
    pub async fn update_voucher(&self, cmd: UpdateVoucherCmd) -> ResultEngine<Vec<ChangeRecord>> {
        validate_lines(&cmd.lines)?;

        with_tx!(self, |db_tx| {
            let model = vouchers::Entity::find_by_id(cmd.voucher_number.as_str())
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("voucher not exists".to_string()))?;
            let mut voucher = Voucher::try_from(model)?;
            let kind = voucher.kind;

            let item_models = voucher_items::Entity::find()
                .filter(voucher_items::Column::VoucherNumber.eq(cmd.voucher_number.as_str()))
                .all(&db_tx)
                .await?;
            let mut old_items = Vec::with_capacity(item_models.len());
            for item_model in item_models {
                old_items.push(VoucherItem::try_from(item_model)?);
            }

            // A product may appear on several lines of the same voucher, so
            // both sides of the diff are totalled per product before they
            // are compared. One update per product, never per line.
            let mut old_totals: HashMap<&str, i64> = HashMap::new();
            for old_item in &old_items {
                *old_totals.entry(old_item.product_id.as_str()).or_insert(0) +=
                    old_item.quantity_minor(kind);
            }

            let mut new_totals: HashMap<&str, i64> = HashMap::new();
            let mut new_order: Vec<&str> = Vec::new();
            for line in &cmd.lines {
                if !new_totals.contains_key(line.product_id.as_str()) {
                    new_order.push(line.product_id.as_str());
                }
                *new_totals.entry(line.product_id.as_str()).or_insert(0) += line.quantity_minor;
            }

            let mut updates: Vec<ItemUpdate> =
                Vec::with_capacity(old_totals.len() + new_order.len());

            // Pass 1: products dropped from the voucher, old total reversed.
            let mut reversed: HashSet<&str> = HashSet::new();
            for old_item in &old_items {
                let product_id = old_item.product_id.as_str();
                if new_totals.contains_key(product_id) || !reversed.insert(product_id) {
                    continue;
                }
                updates.push(ItemUpdate {
                    product_id: product_id.to_string(),
                    action: ChangeAction::Removed,
                    old_signed_minor: kind.sign() * old_totals[product_id],
                    new_signed_minor: 0,
                });
            }

            // Passes 2 and 3: kept products move by the net delta between
            // totals, new products by their full total.
            for product_id in new_order {
                let new_signed_minor = kind.sign() * new_totals[product_id];
                match old_totals.get(product_id) {
                    Some(&old_total) => updates.push(ItemUpdate {
                        product_id: product_id.to_string(),
                        action: ChangeAction::Modified,
                        old_signed_minor: kind.sign() * old_total,
                        new_signed_minor,
                    }),
                    None => updates.push(ItemUpdate {
                        product_id: product_id.to_string(),
                        action: ChangeAction::Added,
                        old_signed_minor: 0,
                        new_signed_minor,
                    }),
                }
            }

            let (previews, records) = self.preview_item_updates(&db_tx, &updates).await?;

            voucher_items::Entity::delete_many()
                .filter(voucher_items::Column::VoucherNumber.eq(cmd.voucher_number.as_str()))
                .exec(&db_tx)
                .await?;
            self.insert_voucher_items(&db_tx, &voucher, &cmd.lines, &previews)
                .await?;

            voucher.date = cmd.date.unwrap_or(voucher.date);
            voucher.supplier = apply_optional_text_patch(voucher.supplier, cmd.supplier.as_deref());
            voucher.department =
                apply_optional_text_patch(voucher.department, cmd.department.as_deref());
            voucher.customer = apply_optional_text_patch(voucher.customer, cmd.customer.as_deref());
            voucher.recipient =
                apply_optional_text_patch(voucher.recipient, cmd.recipient.as_deref());
            voucher.notes = apply_optional_text_patch(voucher.notes, cmd.notes.as_deref());
            voucher.updated_at = Utc::now();
            vouchers::ActiveModel::from(&voucher).update(&db_tx).await?;

            self.persist_product_balances(&db_tx, previews).await?;

            Ok(records)
        })
    }
}
