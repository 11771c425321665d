//! Checkout errors.

use sqlx::Error;
use thiserror::Error;

use crate::domain::{carts::CartsServiceError, inventory::InventoryError};

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("not enough stock for {product_name}")]
    InsufficientStock { product_name: String },

    #[error("{product_name} is no longer available")]
    ProductUnavailable { product_name: String },

    #[error("order amount overflow")]
    AmountOverflow,

    #[error("quantity out of range")]
    InvalidQuantity,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CheckoutError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}

impl From<InventoryError> for CheckoutError {
    fn from(error: InventoryError) -> Self {
        match error {
            InventoryError::InsufficientStock { product_name } => {
                Self::InsufficientStock { product_name }
            }
            InventoryError::NotFound => Self::Sql(Error::RowNotFound),
            InventoryError::InvalidQuantity => Self::InvalidQuantity,
            InventoryError::Sql(error) => Self::Sql(error),
        }
    }
}

impl From<CartsServiceError> for CheckoutError {
    fn from(error: CartsServiceError) -> Self {
        match error {
            CartsServiceError::InsufficientStock { product_name } => {
                Self::InsufficientStock { product_name }
            }
            CartsServiceError::AmountOverflow => Self::AmountOverflow,
            CartsServiceError::InvalidQuantity => Self::InvalidQuantity,
            CartsServiceError::NotFound | CartsServiceError::InvalidReference => Self::EmptyCart,
            CartsServiceError::Sql(error) => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_quantity_is_not_reported_as_overflow() {
        assert!(matches!(
            CheckoutError::from(InventoryError::InvalidQuantity),
            CheckoutError::InvalidQuantity
        ));
        assert!(matches!(
            CheckoutError::from(CartsServiceError::InvalidQuantity),
            CheckoutError::InvalidQuantity
        ));
    }

    #[test]
    fn cart_amount_overflow_stays_overflow() {
        assert!(matches!(
            CheckoutError::from(CartsServiceError::AmountOverflow),
            CheckoutError::AmountOverflow
        ));
    }
}
