//! Orders Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::{
    database::{to_i64, try_get_u64},
    domain::{
        orders::{
            data::NewOrder,
            records::{OrderRecord, OrderStatus, OrderUuid},
        },
        users::UserUuid,
    },
};

const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const LIST_USER_ORDERS_SQL: &str = include_str!("../sql/list_user_orders.sql");
const GET_USER_ORDER_SQL: &str = include_str!("../sql/get_user_order.sql");
const LIST_ORDERS_BETWEEN_SQL: &str = include_str!("../sql/list_orders_between.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: NewOrder,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.uuid)
            .bind(order.user_uuid)
            .bind(order.status.as_str())
            .bind(to_i64(order.total_amount, "total_amount")?)
            .fetch_one(&mut **tx)
            .await
    }

    /// The user's orders, newest first, without items.
    pub(crate) async fn list_user_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_USER_ORDERS_SQL)
            .bind(user)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_user_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_USER_ORDER_SQL)
            .bind(order)
            .bind(user)
            .fetch_one(&mut **tx)
            .await
    }

    /// Orders with `status` created in the half-open window `[from, until)`.
    pub(crate) async fn list_orders_between(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        status: OrderStatus,
        from: Timestamp,
        until: Timestamp,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_ORDERS_BETWEEN_SQL)
            .bind(status.as_str())
            .bind(SqlxTimestamp::from(from))
            .bind(SqlxTimestamp::from(until))
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        let status = status
            .parse::<OrderStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: row.try_get("uuid")?,
            user_uuid: row.try_get("user_uuid")?,
            status,
            total_amount: try_get_u64(row, "total_amount")?,
            items: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
