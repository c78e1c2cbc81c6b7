//! The module contains the `Product` struct and its implementation.
//!
//! A product is the single mutable balance every voucher acts upon. Its
//! current quantity is mutated exclusively by the reconciliation engine
//! (plus the opening balance set at creation).
//!
//! Quantities and prices are stored as signed integer **minor units**
//! (hundredths of a unit), so two decimal places are represented exactly.

use chrono::{DateTime, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};

/// A stock ledger entry for one product.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Product {
    /// Unique product code, chosen by the user and persisted as the primary
    /// key, so voucher items can reference it.
    pub product_id: String,
    pub name: String,
    /// Current on-hand quantity in minor units. Invariant: `>= 0` at the end
    /// of every successful voucher mutation.
    pub quantity_minor: i64,
    /// Opening balance the ledger started from.
    pub initial_quantity_minor: i64,
    pub minimum_threshold_minor: i64,
    pub maximum_threshold_minor: i64,
    pub unit_price_minor: i64,
    pub category: Option<String>,
    pub unit: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn new(product_id: String, name: String, initial_quantity_minor: i64) -> Self {
        Self {
            product_id,
            name,
            quantity_minor: initial_quantity_minor,
            initial_quantity_minor,
            minimum_threshold_minor: 0,
            maximum_threshold_minor: 0,
            unit_price_minor: 0,
            category: None,
            unit: None,
            created_at: Utc::now(),
        }
    }

    /// Whether the current balance has fallen below the minimum threshold.
    pub fn is_low_stock(&self) -> bool {
        self.quantity_minor < self.minimum_threshold_minor
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub product_id: String,
    pub name: String,
    pub quantity_minor: i64,
    pub initial_quantity_minor: i64,
    pub minimum_threshold_minor: i64,
    pub maximum_threshold_minor: i64,
    pub unit_price_minor: i64,
    pub category: Option<String>,
    pub unit: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::voucher_items::Entity")]
    VoucherItems,
}

impl Related<super::voucher_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VoucherItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Product> for ActiveModel {
    fn from(product: &Product) -> Self {
        Self {
            product_id: ActiveValue::Set(product.product_id.clone()),
            name: ActiveValue::Set(product.name.clone()),
            quantity_minor: ActiveValue::Set(product.quantity_minor),
            initial_quantity_minor: ActiveValue::Set(product.initial_quantity_minor),
            minimum_threshold_minor: ActiveValue::Set(product.minimum_threshold_minor),
            maximum_threshold_minor: ActiveValue::Set(product.maximum_threshold_minor),
            unit_price_minor: ActiveValue::Set(product.unit_price_minor),
            category: ActiveValue::Set(product.category.clone()),
            unit: ActiveValue::Set(product.unit.clone()),
            created_at: ActiveValue::Set(product.created_at),
        }
    }
}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Self {
            product_id: model.product_id,
            name: model.name,
            quantity_minor: model.quantity_minor,
            initial_quantity_minor: model.initial_quantity_minor,
            minimum_threshold_minor: model.minimum_threshold_minor,
            maximum_threshold_minor: model.maximum_threshold_minor,
            unit_price_minor: model.unit_price_minor,
            category: model.category,
            unit: model.unit,
            created_at: model.created_at,
        }
    }
}
