//! Cart Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::{to_i64, try_get_u64},
    domain::{
        carts::{
            data::NewCartItem,
            records::{CartItemRecord, CartItemUuid, CartUuid},
            snapshot::SnapshotLine,
        },
        products::records::{ProductRecord, ProductUuid},
        users::UserUuid,
    },
};

const GET_CART_ITEMS_SQL: &str = include_str!("../sql/get_cart_items.sql");
const FIND_CART_ITEM_FOR_PRODUCT_SQL: &str = include_str!("../sql/find_cart_item_for_product.sql");
const FIND_USER_CART_ITEM_SQL: &str = include_str!("../sql/find_user_cart_item.sql");
const CREATE_CART_ITEM_SQL: &str = include_str!("../sql/create_cart_item.sql");
const UPDATE_CART_ITEM_QUANTITY_SQL: &str = include_str!("../sql/update_cart_item_quantity.sql");
const DELETE_CART_ITEM_SQL: &str = include_str!("../sql/delete_cart_item.sql");
const CLEAR_CART_ITEMS_SQL: &str = include_str!("../sql/clear_cart_items.sql");
const GET_SNAPSHOT_LINES_SQL: &str = include_str!("../sql/get_snapshot_lines.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartItemsRepository;

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Vec<CartItemRecord>, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(GET_CART_ITEMS_SQL)
            .bind(cart)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn find_cart_item_for_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        product: ProductUuid,
    ) -> Result<Option<CartItemRecord>, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(FIND_CART_ITEM_FOR_PRODUCT_SQL)
            .bind(cart)
            .bind(product)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Fetch an item only if it sits in `user`'s cart.
    pub(crate) async fn get_user_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        item: CartItemUuid,
    ) -> Result<CartItemRecord, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(FIND_USER_CART_ITEM_SQL)
            .bind(item)
            .bind(user)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        item: NewCartItem,
    ) -> Result<CartItemRecord, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(CREATE_CART_ITEM_SQL)
            .bind(CartItemUuid::new())
            .bind(cart)
            .bind(item.product_uuid)
            .bind(to_i64(item.quantity, "quantity")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: CartItemUuid,
        quantity: u64,
    ) -> Result<CartItemRecord, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(UPDATE_CART_ITEM_QUANTITY_SQL)
            .bind(item)
            .bind(to_i64(quantity, "quantity")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        item: CartItemUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_ITEM_SQL)
            .bind(item)
            .bind(cart)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn clear_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_CART_ITEMS_SQL)
            .bind(cart)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Cart lines joined with their current product rows, in insertion order.
    pub(crate) async fn get_snapshot_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Vec<SnapshotLine>, sqlx::Error> {
        query_as::<Postgres, SnapshotLine>(GET_SNAPSHOT_LINES_SQL)
            .bind(cart)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CartItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            cart_uuid: row.try_get("cart_uuid")?,
            product_uuid: row.try_get("product_uuid")?,
            quantity: try_get_u64(row, "quantity")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for SnapshotLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product: ProductRecord {
                uuid: row.try_get("product_uuid")?,
                name: row.try_get("product_name")?,
                price: try_get_u64(row, "product_price")?,
                available_quantity: try_get_u64(row, "product_available_quantity")?,
                low_stock_threshold: try_get_u64(row, "product_low_stock_threshold")?,
                created_at: row
                    .try_get::<SqlxTimestamp, _>("product_created_at")?
                    .to_jiff(),
                updated_at: row
                    .try_get::<SqlxTimestamp, _>("product_updated_at")?
                    .to_jiff(),
            },
            quantity: try_get_u64(row, "quantity")?,
        })
    }
}
