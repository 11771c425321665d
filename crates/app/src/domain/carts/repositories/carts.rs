//! Carts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    carts::records::{CartRecord, CartUuid},
    users::UserUuid,
};

const FIND_CART_SQL: &str = include_str!("../sql/find_cart.sql");
const GET_OR_CREATE_CART_SQL: &str = include_str!("../sql/get_or_create_cart.sql");
const LOCK_CART_SQL: &str = include_str!("../sql/lock_cart.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Option<CartRecord>, sqlx::Error> {
        query_as::<Postgres, CartRecord>(FIND_CART_SQL)
            .bind(user)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Lock the cart row until the transaction ends. Checkouts of the same cart queue here.
    pub(crate) async fn lock_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Option<CartRecord>, sqlx::Error> {
        query_as::<Postgres, CartRecord>(LOCK_CART_SQL)
            .bind(cart)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Fetch the user's cart, creating it on first access.
    pub(crate) async fn get_or_create_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<CartRecord, sqlx::Error> {
        query_as::<Postgres, CartRecord>(GET_OR_CREATE_CART_SQL)
            .bind(CartUuid::new())
            .bind(user)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CartRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            user_uuid: row.try_get("user_uuid")?,
            items: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
