//! Stock-ledger engine.
//!
//! The engine keeps every product's running balance consistent with the sum
//! of voucher effects: additions and customer returns increase stock,
//! disbursements and supplier returns decrease it. Voucher create, update,
//! and delete each reconcile balances incrementally inside one database
//! transaction and report a per-product audit of old/new quantities.
//!
//! Quantities are signed integer **minor units** (hundredths of a unit), so
//! the two decimal places of the ledger are represented exactly.

pub use changes::{ChangeAction, ChangeRecord};
pub use commands::{CreateVoucherCmd, LineRequest, NewProductCmd, UpdateVoucherCmd, VoucherMeta};
pub use error::EngineError;
pub use ops::{Engine, EngineBuilder, VoucherListFilter};
pub use products::Product;
pub use voucher_items::VoucherItem;
pub use vouchers::{Voucher, VoucherKind};

mod changes;
mod commands;
mod error;
mod ops;
mod products;
mod voucher_items;
mod vouchers;

type ResultEngine<T> = Result<T, EngineError>;
