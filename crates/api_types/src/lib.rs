use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoucherKind {
    Addition,
    Disbursement,
    CustomerReturn,
    SupplierReturn,
}

impl VoucherKind {
    /// Returns the canonical kind string used by the engine/database.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Addition => "addition",
            Self::Disbursement => "disbursement",
            Self::CustomerReturn => "customer_return",
            Self::SupplierReturn => "supplier_return",
        }
    }
}

pub mod product {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProductNew {
        pub product_id: String,
        pub name: String,
        /// Opening stock, in hundredths of a unit.
        pub initial_quantity_minor: i64,
        pub minimum_threshold_minor: i64,
        pub maximum_threshold_minor: i64,
        pub unit_price_minor: i64,
        pub category: Option<String>,
        pub unit: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProductView {
        pub product_id: String,
        pub name: String,
        pub quantity_minor: i64,
        pub initial_quantity_minor: i64,
        pub minimum_threshold_minor: i64,
        pub maximum_threshold_minor: i64,
        pub unit_price_minor: i64,
        pub category: Option<String>,
        pub unit: Option<String>,
        pub low_stock: bool,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProductsResponse {
        pub products: Vec<ProductView>,
    }
}

pub mod voucher {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct VoucherLineNew {
        pub product_id: String,
        /// Quantity magnitude, in hundredths of a unit. Must be > 0.
        pub quantity_minor: i64,
        pub machine: Option<String>,
        pub machine_unit: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct VoucherNew {
        pub voucher_number: String,
        pub kind: VoucherKind,
        pub date: NaiveDate,
        pub supplier: Option<String>,
        pub department: Option<String>,
        pub customer: Option<String>,
        pub recipient: Option<String>,
        pub supplier_voucher_number: Option<String>,
        pub notes: Option<String>,
        pub lines: Vec<VoucherLineNew>,
    }

    /// Replaces the voucher's line set and patches header fields.
    ///
    /// The voucher kind is immutable; it is not part of this body.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct VoucherUpdate {
        pub lines: Vec<VoucherLineNew>,
        pub date: Option<NaiveDate>,
        pub supplier: Option<String>,
        pub department: Option<String>,
        pub customer: Option<String>,
        pub recipient: Option<String>,
        pub notes: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct VoucherList {
        pub kind: Option<VoucherKind>,
        pub limit: Option<u64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct VoucherView {
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

    #[derive(Debug, Serialize, Deserialize)]
    pub struct VoucherItemView {
        pub id: Uuid,
        pub product_id: String,
        /// Quantity magnitude for this voucher's kind.
        pub quantity_minor: i64,
        pub unit_price_minor: i64,
        pub total_price_minor: i64,
        pub machine: Option<String>,
        pub machine_unit: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct VoucherListResponse {
        pub vouchers: Vec<VoucherView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct VoucherDetailResponse {
        pub voucher: VoucherView,
        pub items: Vec<VoucherItemView>,
    }
}

pub mod change {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum ChangeAction {
        Added,
        Modified,
        Removed,
    }

    /// One product balance movement caused by a voucher mutation.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ChangeView {
        pub product_id: String,
        pub name: String,
        pub action: ChangeAction,
        /// Audit label in the warehouse ledger's original wording.
        pub label: String,
        pub old_quantity_minor: i64,
        pub new_quantity_minor: i64,
        pub difference_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ChangesResponse {
        pub changes: Vec<ChangeView>,
    }
}
