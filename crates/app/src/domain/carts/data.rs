//! Cart Data

use crate::domain::products::records::ProductUuid;

/// New Cart Item Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    pub product_uuid: ProductUuid,
    pub quantity: u64,
}
