//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::{
    database::{to_i64, try_get_u64},
    domain::products::{
        data::NewProduct,
        records::{ProductRecord, ProductUuid},
    },
};

const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_PRICE_SQL: &str = include_str!("sql/update_product_price.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid)
            .bind(product.name)
            .bind(to_i64(product.price, "price")?)
            .bind(to_i64(product.available_quantity, "available_quantity")?)
            .bind(to_i64(product.low_stock_threshold, "low_stock_threshold")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_price(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        price: u64,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_PRICE_SQL)
            .bind(product)
            .bind(to_i64(price, "price")?)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            name: row.try_get("name")?,
            price: try_get_u64(row, "price")?,
            available_quantity: try_get_u64(row, "available_quantity")?,
            low_stock_threshold: try_get_u64(row, "low_stock_threshold")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
