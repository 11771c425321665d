//! Inventory Ledger Repository

use rustc_hash::FxHashMap;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use tracing::debug;

use crate::{
    database::{to_i64, try_get_u64},
    domain::{
        inventory::{errors::InventoryError, records::StockLevel},
        products::records::ProductUuid,
    },
};

const GET_STOCK_LEVEL_SQL: &str = include_str!("sql/get_stock_level.sql");
const LOCK_STOCK_LEVELS_SQL: &str = include_str!("sql/lock_stock_levels.sql");
const DECREMENT_STOCK_SQL: &str = include_str!("sql/decrement_stock.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgInventoryLedger;

impl PgInventoryLedger {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Check that `quantity` units are available, without mutating anything.
    pub(crate) async fn validate(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        quantity: u64,
    ) -> Result<StockLevel, InventoryError> {
        let level = self.stock_level(tx, product).await?;

        if !level.covers(quantity) {
            return Err(InventoryError::InsufficientStock {
                product_name: level.name,
            });
        }

        Ok(level)
    }

    /// Lock the given product rows for the rest of the transaction.
    ///
    /// Rows are locked in uuid order so two checkouts touching the same products cannot
    /// deadlock on each other. Unknown products are absent from the result.
    pub(crate) async fn lock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[ProductUuid],
    ) -> Result<FxHashMap<ProductUuid, StockLevel>, InventoryError> {
        let levels = query_as::<Postgres, StockLevel>(LOCK_STOCK_LEVELS_SQL)
            .bind(products.to_vec())
            .fetch_all(&mut **tx)
            .await?;

        Ok(levels
            .into_iter()
            .map(|level| (level.product_uuid, level))
            .collect())
    }

    /// Take `quantity` units of stock and report the level left behind.
    ///
    /// Sufficiency is re-checked by the `UPDATE` itself against the row version visible to
    /// this transaction, so a concurrent checkout that committed first is always observed.
    pub(crate) async fn decrement(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        quantity: u64,
    ) -> Result<StockLevel, InventoryError> {
        if quantity == 0 {
            return Err(InventoryError::InvalidQuantity);
        }

        let updated = query_as::<Postgres, StockLevel>(DECREMENT_STOCK_SQL)
            .bind(product)
            .bind(to_i64(quantity, "quantity")?)
            .fetch_optional(&mut **tx)
            .await?;

        if let Some(level) = updated {
            debug!(
                product = %product,
                quantity,
                remaining = level.available_quantity,
                "stock decremented"
            );

            return Ok(level);
        }

        let level = self.stock_level(tx, product).await?;

        Err(InventoryError::InsufficientStock {
            product_name: level.name,
        })
    }

    async fn stock_level(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<StockLevel, InventoryError> {
        Ok(query_as::<Postgres, StockLevel>(GET_STOCK_LEVEL_SQL)
            .bind(product)
            .fetch_one(&mut **tx)
            .await?)
    }
}

impl<'r> FromRow<'r, PgRow> for StockLevel {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product_uuid: row.try_get("product_uuid")?,
            name: row.try_get("name")?,
            price: try_get_u64(row, "price")?,
            available_quantity: try_get_u64(row, "available_quantity")?,
            low_stock_threshold: try_get_u64(row, "low_stock_threshold")?,
        })
    }
}
