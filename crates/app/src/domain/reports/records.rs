//! Report Records

use std::collections::BTreeMap;

use jiff::civil::Date;
use serde::Serialize;

use crate::domain::{orders::records::OrderRecord, reports::errors::ReportsServiceError};

/// Units and revenue for one product over the report day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProductSales {
    pub quantity_sold: u64,
    pub revenue: u64,
}

/// Summary of one calendar day's completed orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailySalesReport {
    pub date: Date,
    pub total_sales: u64,
    pub total_orders: u64,

    /// Keyed by product name.
    pub products_sold: BTreeMap<String, ProductSales>,
}

impl DailySalesReport {
    #[must_use]
    pub fn empty(date: Date) -> Self {
        Self {
            date,
            total_sales: 0,
            total_orders: 0,
            products_sold: BTreeMap::new(),
        }
    }

    /// Aggregate the given orders, which must already carry their items.
    ///
    /// # Errors
    ///
    /// Returns [`ReportsServiceError::AmountOverflow`] if a sum does not fit.
    pub fn from_orders(date: Date, orders: &[OrderRecord]) -> Result<Self, ReportsServiceError> {
        let mut report = Self::empty(date);

        for order in orders {
            report.total_sales = report
                .total_sales
                .checked_add(order.total_amount)
                .ok_or(ReportsServiceError::AmountOverflow)?;

            report.total_orders += 1;

            for item in &order.items {
                let sales = report
                    .products_sold
                    .entry(item.product_name.clone())
                    .or_default();

                let revenue = item.subtotal().ok_or(ReportsServiceError::AmountOverflow)?;

                sales.quantity_sold = sales
                    .quantity_sold
                    .checked_add(item.quantity)
                    .ok_or(ReportsServiceError::AmountOverflow)?;

                sales.revenue = sales
                    .revenue
                    .checked_add(revenue)
                    .ok_or(ReportsServiceError::AmountOverflow)?;
            }
        }

        Ok(report)
    }
}
