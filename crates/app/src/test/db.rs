//! Database test utilities and shared infrastructure

use once_cell::sync::Lazy;
use sqlx::{Connection, PgConnection, PgPool, Postgres, Transaction, postgres::PgPoolOptions};
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres as PostgresImage;
use tokio::sync::{OnceCell, mpsc};
use uuid::Uuid;

use crate::database::{self, Db};

const USER: &str = "storefront_test";
const PASSWORD: &str = "storefront_test_password";

/// Connections per test database. Concurrency tests hold one per in-flight checkout.
const POOL_SIZE: u32 = 16;

/// Shared PostgreSQL container that starts once and is reused across all tests
static POSTGRES_CONTAINER: Lazy<OnceCell<ContainerAsync<PostgresImage>>> = Lazy::new(OnceCell::new);

/// Drop requests for databases whose `TestDb` went out of scope
static CLEANUP_SENDER: Lazy<OnceCell<mpsc::UnboundedSender<String>>> = Lazy::new(OnceCell::new);

async fn init_postgres_container() -> ContainerAsync<PostgresImage> {
    PostgresImage::default()
        .with_user(USER)
        .with_password(PASSWORD)
        .with_db_name("storefront_test")
        .with_env_var("POSTGRES_INITDB_ARGS", "--auth-host=trust")
        .start()
        .await
        .expect("Failed to start PostgreSQL container")
}

async fn init_cleanup_task() -> mpsc::UnboundedSender<String> {
    let (sender, mut receiver) = mpsc::unbounded_channel::<String>();

    tokio::spawn(async move {
        while let Some(db_name) = receiver.recv().await {
            if let Err(err) = drop_database(&db_name).await {
                eprintln!("Failed to cleanup database '{db_name}': {err}");
            }
        }
    });

    sender
}

async fn server_url(db_name: &str) -> String {
    let container = POSTGRES_CONTAINER
        .get_or_init(init_postgres_container)
        .await;

    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to get container port");

    let host =
        std::env::var("TESTCONTAINERS_HOST_OVERRIDE").unwrap_or_else(|_| "localhost".to_string());

    format!("postgresql://{USER}:{PASSWORD}@{host}:{port}/{db_name}")
}

async fn drop_database(db_name: &str) -> Result<(), sqlx::Error> {
    if POSTGRES_CONTAINER.get().is_none() {
        return Ok(());
    }

    let mut conn = PgConnection::connect(&server_url("postgres").await).await?;

    sqlx::query(&format!("DROP DATABASE IF EXISTS \"{db_name}\" WITH (FORCE)"))
        .execute(&mut conn)
        .await?;

    conn.close().await
}

/// A freshly migrated database inside the shared container.
///
/// Isolation is database-level: services commit normally and every test starts from an
/// empty schema. The database is dropped in the background once the `TestDb` is dropped.
#[derive(Debug)]
pub struct TestDb {
    pool: PgPool,
    name: String,
}

impl Drop for TestDb {
    fn drop(&mut self) {
        if let Some(sender) = CLEANUP_SENDER.get() {
            let _ = sender.send(self.name.clone());
        }
    }
}

impl TestDb {
    pub async fn new() -> Self {
        CLEANUP_SENDER.get_or_init(init_cleanup_task).await;

        let name = format!("storefront_test_{}", Uuid::now_v7().simple());

        let mut conn = PgConnection::connect(&server_url("postgres").await)
            .await
            .expect("Failed to connect to postgres database");

        sqlx::query(&format!("CREATE DATABASE \"{name}\""))
            .execute(&mut conn)
            .await
            .expect("Failed to create test database");

        conn.close()
            .await
            .expect("Failed to close admin connection");

        let pool = PgPoolOptions::new()
            .max_connections(POOL_SIZE)
            .connect(&server_url(&name).await)
            .await
            .expect("Failed to create pool for database");

        database::migrate(&pool)
            .await
            .expect("Failed to run migrations on database");

        Self { pool, name }
    }

    /// A service-level handle onto this database.
    pub fn db(&self) -> Db {
        Db::new(self.pool.clone())
    }

    /// Begin a read-committed transaction that rolls back when dropped.
    ///
    /// For repository-level tests that inspect intermediate state without committing.
    pub async fn begin_test_transaction(&self) -> Transaction<'static, Postgres> {
        self.db()
            .begin_transaction()
            .await
            .expect("Failed to start test transaction")
    }

    /// Returns the connection pool for this test database.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn migrated_schema_has_storefront_tables() {
        let test_db = TestDb::new().await;

        let tables: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM information_schema.tables \
             WHERE table_schema = 'public' \
               AND table_name IN ('products', 'carts', 'cart_items', 'orders', 'order_items')",
        )
        .fetch_one(test_db.pool())
        .await
        .expect("Failed to query tables");

        assert_eq!(tables, 5);
    }

    #[tokio::test]
    async fn test_transactions_roll_back_on_drop() {
        let test_db = TestDb::new().await;

        {
            let mut tx = test_db.begin_test_transaction().await;

            sqlx::query("INSERT INTO products (uuid, name, price, available_quantity) VALUES ($1, 'Ghost', 100, 1)")
                .bind(Uuid::now_v7())
                .execute(&mut *tx)
                .await
                .expect("Failed to insert product");
        }

        let products: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(test_db.pool())
            .await
            .expect("Failed to count products");

        assert_eq!(products, 0);
    }
}
