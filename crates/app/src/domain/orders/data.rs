//! Order Data

use crate::domain::{
    orders::records::{OrderItemUuid, OrderStatus, OrderUuid},
    products::records::ProductUuid,
    users::UserUuid,
};

/// New Order Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub status: OrderStatus,
    pub total_amount: u64,
}

/// New Order Item Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderItem {
    pub uuid: OrderItemUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u64,

    /// Unit price fixed at the moment of purchase.
    pub price: u64,
}
