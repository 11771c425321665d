//! Products Data

use crate::domain::products::records::{DEFAULT_LOW_STOCK_THRESHOLD, ProductUuid};

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub price: u64,
    pub available_quantity: u64,
    pub low_stock_threshold: u64,
}

impl NewProduct {
    /// New product with the default low-stock threshold.
    #[must_use]
    pub fn new(name: impl Into<String>, price: u64, available_quantity: u64) -> Self {
        Self {
            uuid: ProductUuid::new(),
            name: name.into(),
            price,
            available_quantity,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}
