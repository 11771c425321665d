//! Stock Level Records

use crate::domain::products::records::ProductUuid;

/// The stock-relevant slice of a product row, as seen inside a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockLevel {
    pub product_uuid: ProductUuid,
    pub name: String,
    pub price: u64,
    pub available_quantity: u64,
    pub low_stock_threshold: u64,
}

impl StockLevel {
    /// Whether `quantity` units can be taken from this level.
    #[must_use]
    pub fn covers(&self, quantity: u64) -> bool {
        quantity <= self.available_quantity
    }

    /// Whether the level sits at or below the replenishment threshold.
    #[must_use]
    pub fn is_low(&self) -> bool {
        self.available_quantity <= self.low_stock_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(available_quantity: u64) -> StockLevel {
        StockLevel {
            product_uuid: ProductUuid::new(),
            name: "Widget".to_string(),
            price: 10_00,
            available_quantity,
            low_stock_threshold: 5,
        }
    }

    #[test]
    fn covers_up_to_available_quantity() {
        let level = level(3);

        assert!(level.covers(3));
        assert!(!level.covers(4));
    }

    #[test]
    fn low_boundary_is_inclusive() {
        assert!(level(4).is_low());
        assert!(level(5).is_low());
        assert!(!level(6).is_low());
        assert!(!level(8).is_low());
    }
}
