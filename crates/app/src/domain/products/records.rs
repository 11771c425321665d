//! Product Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Quantity at or below which a product counts as low on stock, unless overridden.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u64 = 5;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,

    /// Unit price in minor currency units.
    pub price: u64,

    pub available_quantity: u64,
    pub low_stock_threshold: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProductRecord {
    /// Whether stock has fallen to the replenishment threshold (inclusive).
    #[must_use]
    pub fn is_low_stock(&self) -> bool {
        self.available_quantity <= self.low_stock_threshold
    }
}
