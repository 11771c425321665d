//! Replenishment service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, instrument};

use crate::{
    database::Db,
    domain::{
        alerts::errors::AlertsServiceError,
        notifications::{Delivery, LowStockAlert, NotificationDispatcher},
        products::{records::ProductUuid, repository::PgProductsRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgReplenishmentService {
    db: Db,
    products_repository: PgProductsRepository,
    dispatcher: NotificationDispatcher,
}

impl PgReplenishmentService {
    #[must_use]
    pub fn new(db: Db, dispatcher: NotificationDispatcher) -> Self {
        Self {
            db,
            products_repository: PgProductsRepository::new(),
            dispatcher,
        }
    }
}

#[async_trait]
impl ReplenishmentService for PgReplenishmentService {
    #[instrument(skip(self))]
    async fn notify_low_stock(&self, product: ProductUuid) -> Result<Delivery, AlertsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let product = self.products_repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        let alert = LowStockAlert::from(&product);
        let delivery = self.dispatcher.low_stock_alert(&alert).await;

        info!(
            product = %product.name,
            available_quantity = product.available_quantity,
            ?delivery,
            "low stock alert processed"
        );

        Ok(delivery)
    }
}

#[automock]
#[async_trait]
pub trait ReplenishmentService: Send + Sync {
    /// Alert the operator about the product's *current* stock, re-read at call time.
    async fn notify_low_stock(&self, product: ProductUuid) -> Result<Delivery, AlertsServiceError>;
}
