//! Order Repositories

mod items;
mod orders;

pub(crate) use items::PgOrderItemsRepository;
pub(crate) use orders::PgOrdersRepository;

use rustc_hash::FxHashMap;

use crate::domain::orders::records::{OrderItemRecord, OrderRecord, OrderUuid};

/// Distribute loaded items onto their orders, keeping each order's line order.
pub(crate) fn attach_items(orders: &mut [OrderRecord], items: Vec<OrderItemRecord>) {
    let mut by_order: FxHashMap<OrderUuid, Vec<OrderItemRecord>> = FxHashMap::default();

    for item in items {
        by_order.entry(item.order_uuid).or_default().push(item);
    }

    for order in orders {
        if let Some(items) = by_order.remove(&order.uuid) {
            order.items = items;
        }
    }
}
