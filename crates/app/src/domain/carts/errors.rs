//! Carts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::{carts::snapshot::PricingOverflow, inventory::InventoryError};

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("cart item not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("not enough stock for {product_name}")]
    InsufficientStock { product_name: String },

    #[error("cart amount overflow")]
    AmountOverflow,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        if matches!(error, Error::Encode(_)) {
            return Self::InvalidQuantity;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::CheckViolation) => Self::InvalidQuantity,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<InventoryError> for CartsServiceError {
    fn from(error: InventoryError) -> Self {
        match error {
            InventoryError::InsufficientStock { product_name } => {
                Self::InsufficientStock { product_name }
            }
            InventoryError::NotFound => Self::InvalidReference,
            InventoryError::InvalidQuantity => Self::InvalidQuantity,
            InventoryError::Sql(error) => Self::Sql(error),
        }
    }
}

impl From<PricingOverflow> for CartsServiceError {
    fn from(_: PricingOverflow) -> Self {
        Self::AmountOverflow
    }
}
