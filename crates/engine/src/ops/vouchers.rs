//! Voucher operations: reads plus the reconciliation write paths.

mod list;
mod write;

pub use list::VoucherListFilter;
