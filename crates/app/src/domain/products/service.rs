//! Products service.
//!
//! Catalog management is owned elsewhere; these are the product operations the checkout
//! core reads through and the price change it must stay insulated from.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::products::{
        data::NewProduct,
        errors::ProductsServiceError,
        records::{ProductRecord, ProductUuid},
        repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_price(
        &self,
        product: ProductUuid,
        price: u64,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let updated = self.repository.update_price(&mut tx, product, price).await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieve a single product with its current price and stock.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a new product.
    async fn create_product(&self, product: NewProduct)
    -> Result<ProductRecord, ProductsServiceError>;

    /// Changes the catalog price. Existing orders keep the price they were placed at.
    async fn update_price(
        &self,
        product: ProductUuid,
        price: u64,
    ) -> Result<ProductRecord, ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::products::{data::NewProduct, records::DEFAULT_LOW_STOCK_THRESHOLD},
        test::TestContext,
    };

    use super::*;

    #[tokio::test]
    async fn create_product_returns_stored_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let new_product = NewProduct::new("Classic Leather Wallet", 89_99, 25);
        let uuid = new_product.uuid;

        let product = ctx.products.create_product(new_product).await?;

        assert_eq!(product.uuid, uuid);
        assert_eq!(product.name, "Classic Leather Wallet");
        assert_eq!(product.price, 89_99);
        assert_eq!(product.available_quantity, 25);
        assert_eq!(product.low_stock_threshold, DEFAULT_LOW_STOCK_THRESHOLD);

        Ok(())
    }

    #[tokio::test]
    async fn get_product_returns_created_product() -> TestResult {
        let ctx = TestContext::new().await;
        let new_product = NewProduct::new("Mechanical Keyboard", 159_99, 8);
        let uuid = new_product.uuid;

        ctx.products.create_product(new_product).await?;

        let product = ctx.products.get_product(uuid).await?;

        assert_eq!(product.uuid, uuid);
        assert_eq!(product.price, 159_99);
        assert!(!product.is_low_stock());

        Ok(())
    }

    #[tokio::test]
    async fn get_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.products.get_product(ProductUuid::new()).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_product_duplicate_uuid_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;
        let first = NewProduct::new("Yoga Mat", 98_99, 35);
        let duplicate = NewProduct {
            name: "Yoga Mat (copy)".to_string(),
            ..first.clone()
        };

        ctx.products.create_product(first).await?;

        let result = ctx.products.create_product(duplicate).await;

        assert!(
            matches!(result, Err(ProductsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_price_reflects_new_price() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx
            .products
            .create_product(NewProduct::new("Desk Lamp", 79_99, 20))
            .await?;

        let updated = ctx.products.update_price(product.uuid, 69_99).await?;

        assert_eq!(updated.uuid, product.uuid);
        assert_eq!(updated.price, 69_99);
        assert_eq!(updated.available_quantity, 20);

        Ok(())
    }

    #[tokio::test]
    async fn update_price_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.products.update_price(ProductUuid::new(), 100).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[test]
    fn low_stock_threshold_is_inclusive() {
        let mut product = ProductRecord {
            uuid: ProductUuid::new(),
            name: "Widget".to_string(),
            price: 10_00,
            available_quantity: 6,
            low_stock_threshold: 5,
            created_at: jiff::Timestamp::UNIX_EPOCH,
            updated_at: jiff::Timestamp::UNIX_EPOCH,
        };

        assert!(!product.is_low_stock());

        product.available_quantity = 5;
        assert!(product.is_low_stock());

        product.available_quantity = 0;
        assert!(product.is_low_stock());
    }
}
