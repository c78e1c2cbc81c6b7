//! The module contains the errors the engine can throw.
//!
//! A [`StockViolation`] is a business-rule rejection, never retried: it is
//! raised before any row is saved in the operation, and the surrounding
//! database transaction guarantees nothing was persisted.
//!
//! [`StockViolation`]: EngineError::StockViolation
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(
        "stock for product \"{product_id}\" ({name}) would go negative (current balance: {quantity_minor})"
    )]
    StockViolation {
        product_id: String,
        name: String,
        /// Balance of the product at the time of the violation, in minor units.
        quantity_minor: i64,
    },
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),
    #[error("Invalid id: {0}")]
    InvalidId(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::StockViolation {
                    product_id: a,
                    name: b,
                    quantity_minor: c,
                },
                Self::StockViolation {
                    product_id: x,
                    name: y,
                    quantity_minor: z,
                },
            ) => a == x && b == y && c == z,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::InvalidQuantity(a), Self::InvalidQuantity(b)) => a == b,
            (Self::InvalidId(a), Self::InvalidId(b)) => a == b,
            (Self::Conflict(a), Self::Conflict(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
