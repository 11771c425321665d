//! Order Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::{
    database::{to_i64, try_get_u64},
    domain::orders::{
        data::NewOrderItem,
        records::{OrderItemRecord, OrderUuid},
    },
};

const CREATE_ORDER_ITEM_SQL: &str = include_str!("../sql/create_order_item.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("../sql/get_order_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        item: NewOrderItem,
    ) -> Result<OrderItemRecord, sqlx::Error> {
        query_as::<Postgres, OrderItemRecord>(CREATE_ORDER_ITEM_SQL)
            .bind(item.uuid)
            .bind(order)
            .bind(item.product_uuid)
            .bind(to_i64(item.quantity, "quantity")?)
            .bind(to_i64(item.price, "price")?)
            .fetch_one(&mut **tx)
            .await
    }

    /// Items of all the given orders, grouped by order and in line order.
    pub(crate) async fn get_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderUuid],
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        if orders.is_empty() {
            return Ok(Vec::new());
        }

        query_as::<Postgres, OrderItemRecord>(GET_ORDER_ITEMS_SQL)
            .bind(orders.to_vec())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            order_uuid: row.try_get("order_uuid")?,
            product_uuid: row.try_get("product_uuid")?,
            product_name: row.try_get("product_name")?,
            quantity: try_get_u64(row, "quantity")?,
            price: try_get_u64(row, "price")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
