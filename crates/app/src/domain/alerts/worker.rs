//! Low-stock alert worker.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::alerts::{queue::AlertReceiver, service::ReplenishmentService};

/// Drain the queue until every sender is dropped, notifying for each product.
///
/// A failed notification is logged and the worker moves on to the next product.
pub async fn run_alert_worker(
    mut receiver: AlertReceiver,
    service: Arc<dyn ReplenishmentService>,
) -> usize {
    let mut processed = 0;

    info!("low stock alert worker started");

    while let Some(product) = receiver.recv().await {
        if let Err(error) = service.notify_low_stock(product).await {
            warn!(product = %product, error = %error, "low stock alert failed");
        }

        processed += 1;
    }

    info!(processed, "low stock alert worker stopped");

    processed
}
