//! Voucher primitives.
//!
//! A `Voucher` is a dated, typed stock-movement document grouping one or
//! more [`VoucherItem`](crate::VoucherItem)s. Its kind decides the sign of
//! the stock effect and which item quantity column carries it; every engine
//! path consults that single table via [`VoucherKind::sign`] and
//! [`VoucherKind::records_added`].
//!
//! The kind is fixed at creation. The update operation takes the kind from
//! the stored row and offers no way to change it, since re-signing existing
//! items would corrupt product balances.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoucherKind {
    /// Goods received into stock.
    Addition,
    /// Goods issued out of stock, optionally against a machine.
    Disbursement,
    /// Goods a customer sent back; re-enters stock.
    CustomerReturn,
    /// Goods sent back to a supplier; leaves stock.
    SupplierReturn,
}

impl VoucherKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Addition => "addition",
            Self::Disbursement => "disbursement",
            Self::CustomerReturn => "customer_return",
            Self::SupplierReturn => "supplier_return",
        }
    }

    /// Signed direction of the stock effect: `+1` increases the product
    /// balance, `-1` decreases it.
    pub fn sign(self) -> i64 {
        match self {
            Self::Addition | Self::CustomerReturn => 1,
            Self::Disbursement | Self::SupplierReturn => -1,
        }
    }

    /// Whether items of this kind carry their quantity in the
    /// `quantity_added` column (`true`) or `quantity_disbursed` (`false`).
    pub fn records_added(self) -> bool {
        self.sign() > 0
    }

    /// Machine metadata is only meaningful on disbursements.
    pub fn carries_machine(self) -> bool {
        matches!(self, Self::Disbursement)
    }
}

impl TryFrom<&str> for VoucherKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "addition" => Ok(Self::Addition),
            "disbursement" => Ok(Self::Disbursement),
            "customer_return" => Ok(Self::CustomerReturn),
            "supplier_return" => Ok(Self::SupplierReturn),
            other => Err(EngineError::InvalidId(format!(
                "invalid voucher kind: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Voucher {
    /// Unique voucher number, chosen by the user and persisted as the
    /// primary key.
    pub voucher_number: String,
    pub kind: VoucherKind,
    pub date: NaiveDate,
    pub supplier: Option<String>,
    pub department: Option<String>,
    pub customer: Option<String>,
    pub recipient: Option<String>,
    pub supplier_voucher_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Voucher {
    pub fn new(voucher_number: String, kind: VoucherKind, date: NaiveDate) -> ResultEngine<Self> {
        if voucher_number.trim().is_empty() {
            return Err(EngineError::InvalidId(
                "voucher number must not be empty".to_string(),
            ));
        }
        let now = Utc::now();
        Ok(Self {
            voucher_number,
            kind,
            date,
            supplier: None,
            department: None,
            customer: None,
            recipient: None,
            supplier_voucher_number: None,
            notes: None,
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "vouchers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub voucher_number: String,
    pub kind: String,
    pub date: Date,
    pub supplier: Option<String>,
    pub department: Option<String>,
    pub customer: Option<String>,
    pub recipient: Option<String>,
    pub supplier_voucher_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
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

impl From<&Voucher> for ActiveModel {
    fn from(voucher: &Voucher) -> Self {
        Self {
            voucher_number: ActiveValue::Set(voucher.voucher_number.clone()),
            kind: ActiveValue::Set(voucher.kind.as_str().to_string()),
            date: ActiveValue::Set(voucher.date),
            supplier: ActiveValue::Set(voucher.supplier.clone()),
            department: ActiveValue::Set(voucher.department.clone()),
            customer: ActiveValue::Set(voucher.customer.clone()),
            recipient: ActiveValue::Set(voucher.recipient.clone()),
            supplier_voucher_number: ActiveValue::Set(voucher.supplier_voucher_number.clone()),
            notes: ActiveValue::Set(voucher.notes.clone()),
            created_at: ActiveValue::Set(voucher.created_at),
            updated_at: ActiveValue::Set(voucher.updated_at),
        }
    }
}

impl TryFrom<Model> for Voucher {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            voucher_number: model.voucher_number,
            kind: VoucherKind::try_from(model.kind.as_str())?,
            date: model.date,
            supplier: model.supplier,
            department: model.department,
            customer: model.customer,
            recipient: model.recipient,
            supplier_voucher_number: model.supplier_voucher_number,
            notes: model.notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
