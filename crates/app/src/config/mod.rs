//! Runtime configuration, read from CLI flags with environment fallbacks.

pub mod db;
pub mod notifications;
pub mod observability;
pub mod reports;

pub use db::DatabaseConfig;
pub use notifications::NotificationsConfig;
pub use observability::{LogFormat, LoggingConfig};
pub use reports::ReportsConfig;
