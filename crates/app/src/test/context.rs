//! Test context for service-level integration tests.

use std::sync::Arc;

use crate::{
    context::{AppContext, AppOptions},
    domain::{
        alerts::AlertReceiver, carts::CartsService, checkout::CheckoutService,
        orders::OrdersService, products::ProductsService, reports::ReportsService,
    },
};

use super::db::TestDb;

/// Alerts a single test can queue before checkout starts dropping them.
const ALERT_QUEUE_CAPACITY: usize = 64;

/// Services wired onto a fresh database, with the low-stock queue left undrained so tests
/// can inspect what checkout submitted.
pub struct TestContext {
    pub db: TestDb,
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub checkout: Arc<dyn CheckoutService>,
    pub reports: Arc<dyn ReportsService>,
    pub alerts: AlertReceiver,
}

impl TestContext {
    pub async fn new() -> Self {
        let db = TestDb::new().await;

        let (app, alerts) = AppContext::from_db(
            db.db(),
            AppOptions {
                alert_queue_capacity: ALERT_QUEUE_CAPACITY,
                ..AppOptions::default()
            },
        );

        Self {
            products: app.products,
            carts: app.carts,
            orders: app.orders,
            checkout: app.checkout,
            reports: app.reports,
            alerts,
            db,
        }
    }
}
