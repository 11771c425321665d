//! Order Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::Serialize;
use thiserror::Error;

use crate::{
    domain::{products::records::ProductUuid, users::UserUuid},
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order lifecycle status. Checkout only ever produces [`OrderStatus::Completed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    Cancelled,
}

impl OrderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown order status: {0}")]
pub struct UnknownOrderStatus(String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownOrderStatus(other.to_string())),
        }
    }
}

/// Order Record
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub status: OrderStatus,

    /// Sum of the line subtotals, in minor currency units.
    pub total_amount: u64,

    /// Lines in the order the cart held them.
    pub items: Vec<OrderItemRecord>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Order Item Record
#[derive(Debug, Clone)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub product_uuid: ProductUuid,

    /// Current catalog name of the product.
    pub product_name: String,

    pub quantity: u64,

    /// Unit price paid.
    pub price: u64,

    pub created_at: Timestamp,
}

impl OrderItemRecord {
    #[must_use]
    pub fn subtotal(&self) -> Option<u64> {
        self.price.checked_mul(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_text() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>().ok(), Some(status));
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!("shipped".parse::<OrderStatus>().is_err());
    }
}
