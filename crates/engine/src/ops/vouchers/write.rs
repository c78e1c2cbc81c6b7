//! Voucher write paths.
//!
//! Each operation runs inside one database transaction and follows the same
//! shape: turn the voucher's lines into signed balance updates, preview the
//! resulting product balances (rejecting any that would go negative), then
//! persist rows and balances together.

mod common;
mod create;
mod delete;
mod update;
