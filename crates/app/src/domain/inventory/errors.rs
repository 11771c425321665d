//! Inventory ledger errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("not enough stock for {product_name}")]
    InsufficientStock { product_name: String },

    #[error("product not found")]
    NotFound,

    #[error("invalid quantity")]
    InvalidQuantity,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for InventoryError {
    fn from(error: Error) -> Self {
        match error {
            Error::RowNotFound => Self::NotFound,
            Error::Encode(_) => Self::InvalidQuantity,
            error => Self::Sql(error),
        }
    }
}
