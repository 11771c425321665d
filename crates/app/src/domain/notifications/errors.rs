//! Notification errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("transport rejected the message: {0}")]
    Rejected(String),

    #[error("transport unavailable")]
    Unavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
}
