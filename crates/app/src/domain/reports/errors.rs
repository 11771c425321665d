//! Reports service errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportsServiceError {
    #[error("report day cannot be resolved: {0}")]
    InvalidDay(#[source] jiff::Error),

    #[error("report amount overflow")]
    AmountOverflow,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for ReportsServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}

impl From<jiff::Error> for ReportsServiceError {
    fn from(error: jiff::Error) -> Self {
        Self::InvalidDay(error)
    }
}
