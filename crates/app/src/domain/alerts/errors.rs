//! Alerting errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AlertQueueError {
    #[error("alert queue is full")]
    Full,

    #[error("alert queue is closed")]
    Closed,
}

#[derive(Debug, Error)]
pub enum AlertsServiceError {
    #[error("product not found")]
    ProductNotFound,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AlertsServiceError {
    fn from(error: Error) -> Self {
        match error {
            Error::RowNotFound => Self::ProductNotFound,
            error => Self::Sql(error),
        }
    }
}
