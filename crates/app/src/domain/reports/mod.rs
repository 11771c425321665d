//! Daily Sales Reports

pub mod errors;
pub mod records;
pub mod schedule;
pub mod service;

pub use errors::ReportsServiceError;
pub use records::{DailySalesReport, ProductSales};
pub use service::*;
