//! Database connection management

use sqlx::{
    PgPool, Postgres, Row, Transaction, migrate::MigrateError, postgres::PgRow, query,
};

/// SQL used to pin every unit of work to read-committed isolation.
pub const SET_ISOLATION_SQL: &str = "SET TRANSACTION ISOLATION LEVEL READ COMMITTED";

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begin a read-committed transaction.
    ///
    /// Row locks taken inside the transaction (`FOR UPDATE`, `UPDATE`) are what serialize
    /// concurrent writers; nothing is locked in-process.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction or setting its isolation level fails.
    pub async fn begin_transaction(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        query(SET_ISOLATION_SQL).execute(&mut *tx).await?;

        Ok(tx)
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

/// Apply pending schema migrations.
///
/// # Errors
///
/// Returns an error if a migration fails to apply.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// Read a non-negative `BIGINT` column as `u64`.
pub(crate) fn try_get_u64(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let value: i64 = row.try_get(col)?;

    u64::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

/// Convert a `u64` amount or quantity into a bindable `BIGINT`.
pub(crate) fn to_i64(value: u64, col: &str) -> Result<i64, sqlx::Error> {
    i64::try_from(value).map_err(|e| sqlx::Error::Encode(format!("{col}: {e}").into()))
}
