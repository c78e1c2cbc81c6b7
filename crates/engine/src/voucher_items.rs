//! Voucher line items.
//!
//! A [`VoucherItem`] is a single product-quantity line within a voucher.
//! Exactly one of `quantity_added_minor` / `quantity_disbursed_minor` is
//! set, chosen by the voucher kind. Items are never mutated standalone:
//! every change goes through a voucher create/update/delete, which rebuilds
//! the rows.

use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{EngineError, VoucherKind};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoucherItem {
    pub id: Uuid,
    pub voucher_number: String,
    pub product_id: String,
    pub quantity_added_minor: Option<i64>,
    pub quantity_disbursed_minor: Option<i64>,
    /// Unit price of the product at the time the line was written.
    pub unit_price_minor: i64,
    pub machine: Option<String>,
    pub machine_unit: Option<String>,
}

impl VoucherItem {
    /// Build a fresh line for a voucher of the given kind, routing the
    /// quantity to the column the kind records.
    pub fn new(
        voucher_number: String,
        product_id: String,
        kind: VoucherKind,
        quantity_minor: i64,
        unit_price_minor: i64,
    ) -> Self {
        let (added, disbursed) = if kind.records_added() {
            (Some(quantity_minor), None)
        } else {
            (None, Some(quantity_minor))
        };
        Self {
            id: Uuid::new_v4(),
            voucher_number,
            product_id,
            quantity_added_minor: added,
            quantity_disbursed_minor: disbursed,
            unit_price_minor,
            machine: None,
            machine_unit: None,
        }
    }

    /// Unsigned quantity recorded on this line for a voucher of `kind`.
    ///
    /// Missing columns count as zero, matching how the ledger treats
    /// half-filled legacy rows.
    pub fn quantity_minor(&self, kind: VoucherKind) -> i64 {
        if kind.records_added() {
            self.quantity_added_minor.unwrap_or(0)
        } else {
            self.quantity_disbursed_minor.unwrap_or(0)
        }
    }

    pub fn total_price_minor(&self) -> i64 {
        let quantity = self
            .quantity_added_minor
            .or(self.quantity_disbursed_minor)
            .unwrap_or(0);
        // Both factors are scaled by 100, so the product is re-scaled once.
        quantity * self.unit_price_minor / 100
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "voucher_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub voucher_number: String,
    pub product_id: String,
    pub quantity_added_minor: Option<i64>,
    pub quantity_disbursed_minor: Option<i64>,
    pub unit_price_minor: i64,
    pub machine: Option<String>,
    pub machine_unit: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::vouchers::Entity",
        from = "Column::VoucherNumber",
        to = "super::vouchers::Column::VoucherNumber",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Vouchers,
    #[sea_orm(
        belongs_to = "super::products::Entity",
        from = "Column::ProductId",
        to = "super::products::Column::ProductId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Products,
}

impl Related<super::vouchers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vouchers.def()
    }
}

impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&VoucherItem> for ActiveModel {
    fn from(item: &VoucherItem) -> Self {
        Self {
            id: ActiveValue::Set(item.id.to_string()),
            voucher_number: ActiveValue::Set(item.voucher_number.clone()),
            product_id: ActiveValue::Set(item.product_id.clone()),
            quantity_added_minor: ActiveValue::Set(item.quantity_added_minor),
            quantity_disbursed_minor: ActiveValue::Set(item.quantity_disbursed_minor),
            unit_price_minor: ActiveValue::Set(item.unit_price_minor),
            machine: ActiveValue::Set(item.machine.clone()),
            machine_unit: ActiveValue::Set(item.machine_unit.clone()),
        }
    }
}

impl TryFrom<Model> for VoucherItem {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::InvalidId("invalid voucher item id".to_string()))?,
            voucher_number: model.voucher_number,
            product_id: model.product_id,
            quantity_added_minor: model.quantity_added_minor,
            quantity_disbursed_minor: model.quantity_disbursed_minor,
            unit_price_minor: model.unit_price_minor,
            machine: model.machine,
            machine_unit: model.machine_unit,
        })
    }
}
