//! Per-product audit records returned by voucher operations.
//!
//! Every voucher create/update/delete reports, for each line it processed,
//! the product balance before and after. Callers surface these to the user
//! as feedback messages.

use serde::{Deserialize, Serialize};

/// What a voucher operation did to a line's product.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeAction {
    Added,
    Modified,
    Removed,
}

impl ChangeAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Modified => "modified",
            Self::Removed => "removed",
        }
    }

    /// User-facing Arabic label, kept verbatim from the legacy system the
    /// ledger messages were written for.
    pub fn label(self) -> &'static str {
        match self {
            Self::Added => "إضافة",
            Self::Modified => "تعديل",
            Self::Removed => "حذف",
        }
    }
}

/// Audit of one product's balance movement within a voucher operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub product_id: String,
    pub name: String,
    pub action: ChangeAction,
    pub old_quantity_minor: i64,
    pub new_quantity_minor: i64,
    pub difference_minor: i64,
}
