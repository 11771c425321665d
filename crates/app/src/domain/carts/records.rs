//! Cart Records

use jiff::Timestamp;

use crate::{
    domain::{products::records::ProductUuid, users::UserUuid},
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

/// Cart Record
#[derive(Debug, Clone)]
pub struct CartRecord {
    pub uuid: CartUuid,
    pub user_uuid: UserUuid,

    /// Lines in the order they were first added.
    pub items: Vec<CartItemRecord>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// CartItem Record
#[derive(Debug, Clone)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub cart_uuid: CartUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
