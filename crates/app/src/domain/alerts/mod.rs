//! Replenishment Alerting
//!
//! Checkout submits the products that ended at or below their threshold to a bounded
//! queue. A worker drains it and, for each product, re-reads the current state and
//! notifies the operator.

pub mod errors;
pub mod queue;
pub mod service;
pub mod worker;

pub use errors::{AlertQueueError, AlertsServiceError};
pub use queue::{AlertQueue, AlertReceiver};
pub use service::*;
pub use worker::run_alert_worker;
