//! App Context

use std::{fmt, sync::Arc};

use jiff::tz::TimeZone;
use sqlx::migrate::MigrateError;
use thiserror::Error;
use tokio::task::{JoinError, JoinHandle};

use crate::{
    database::{self, Db},
    domain::{
        alerts::{
            AlertQueue, AlertReceiver, PgReplenishmentService, ReplenishmentService,
            run_alert_worker,
        },
        carts::{CartsService, PgCartsService},
        checkout::{CheckoutService, PgCheckoutService},
        notifications::{
            LogTransport, NotificationDispatcher, NotificationTransport, Recipient,
            StaticRecipientResolver,
        },
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
        reports::{PgReportsService, ReportsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply migrations")]
    Migrate(#[source] MigrateError),
}

/// Everything the services need besides the database.
#[derive(Clone)]
pub struct AppOptions {
    pub recipient: Option<Recipient>,
    pub transport: Arc<dyn NotificationTransport>,
    pub time_zone: TimeZone,
    pub alert_queue_capacity: usize,
}

impl fmt::Debug for AppOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppOptions")
            .field("recipient", &self.recipient)
            .field("time_zone", &self.time_zone)
            .field("alert_queue_capacity", &self.alert_queue_capacity)
            .finish_non_exhaustive()
    }
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            recipient: None,
            transport: Arc::new(LogTransport),
            time_zone: TimeZone::UTC,
            alert_queue_capacity: 1024,
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub checkout: Arc<dyn CheckoutService>,
    pub replenishment: Arc<dyn ReplenishmentService>,
    pub reports: Arc<dyn ReportsService>,
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

/// An [`AppContext`] whose low-stock alerts are being delivered.
///
/// The alert worker drains the queue fed by `context.checkout`, so a process that places
/// orders should hold one of these for as long as it serves checkouts.
pub struct RunningApp {
    pub context: AppContext,
    alert_worker: JoinHandle<usize>,
}

impl fmt::Debug for RunningApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunningApp")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

impl RunningApp {
    /// Stop accepting alerts and wait for the ones already queued to be handled.
    ///
    /// Clones of the context's services keep the queue open, so drop them first.
    /// Returns how many alerts the worker processed.
    pub async fn shutdown(self) -> Result<usize, JoinError> {
        drop(self.context);

        self.alert_worker.await
    }
}

impl AppContext {
    /// Wire every service onto `db` and start the low-stock alert worker for it.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn start(db: Db, options: AppOptions) -> RunningApp {
        let (context, receiver) = Self::from_db(db, options);

        let alert_worker = tokio::spawn(run_alert_worker(receiver, context.replenishment.clone()));

        RunningApp {
            context,
            alert_worker,
        }
    }

    /// Connect, migrate and [`start`](Self::start).
    ///
    /// # Errors
    ///
    /// Returns an error when connecting or migrating fails.
    pub async fn start_with_database_url(
        url: &str,
        options: AppOptions,
    ) -> Result<RunningApp, AppInitError> {
        let (context, receiver) = Self::from_database_url(url, options).await?;

        let alert_worker = tokio::spawn(run_alert_worker(receiver, context.replenishment.clone()));

        Ok(RunningApp {
            context,
            alert_worker,
        })
    }

    /// Wire every service onto `db`.
    ///
    /// The returned receiver is the other end of the checkout's low-stock queue. Pass it to
    /// [`run_alert_worker`], or use [`start`](Self::start) which does that itself.
    #[must_use]
    pub fn from_db(db: Db, options: AppOptions) -> (Self, AlertReceiver) {
        let (alerts, receiver) = AlertQueue::new(options.alert_queue_capacity);

        let dispatcher = NotificationDispatcher::new(
            Arc::new(StaticRecipientResolver::new(options.recipient)),
            options.transport,
        );

        let context = Self {
            products: Arc::new(PgProductsService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone())),
            checkout: Arc::new(PgCheckoutService::new(db.clone(), alerts)),
            replenishment: Arc::new(PgReplenishmentService::new(db.clone(), dispatcher.clone())),
            reports: Arc::new(PgReportsService::new(db, options.time_zone, dispatcher)),
        };

        (context, receiver)
    }

    /// Build application context from a database URL, applying pending migrations.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting or migrating fails.
    pub async fn from_database_url(
        url: &str,
        options: AppOptions,
    ) -> Result<(Self, AlertReceiver), AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrate)?;

        Ok(Self::from_db(Db::new(pool), options))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{
            carts::data::NewCartItem, notifications::MockNotificationTransport,
            products::data::NewProduct, users::UserUuid,
        },
        test::db::TestDb,
    };

    use super::*;

    #[tokio::test]
    async fn checkout_alerts_reach_the_transport_through_the_started_worker() -> TestResult {
        let test_db = TestDb::new().await;

        let mut transport = MockNotificationTransport::new();
        transport
            .expect_send_low_stock_alert()
            .withf(|recipient, alert| {
                recipient.email == "ops@example.com"
                    && alert.product_name == "Widget"
                    && alert.available_quantity == 4
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let options = AppOptions {
            recipient: Some(Recipient {
                email: "ops@example.com".to_owned(),
                name: None,
            }),
            transport: Arc::new(transport),
            ..AppOptions::default()
        };

        let running = AppContext::start(test_db.db(), options);
        let user = UserUuid::new();

        let product = running
            .context
            .products
            .create_product(NewProduct::new("Widget", 10_00, 6))
            .await?;

        running
            .context
            .carts
            .add_item(
                user,
                NewCartItem {
                    product_uuid: product.uuid,
                    quantity: 2,
                },
            )
            .await?;
        running.context.checkout.place_order(user).await?;

        assert_eq!(running.shutdown().await?, 1);

        Ok(())
    }
}
