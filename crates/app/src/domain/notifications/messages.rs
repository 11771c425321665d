//! Notification Messages

use std::fmt::Write as _;

use rusty_money::{Money, iso};
use serde::Serialize;

use crate::domain::{products::records::ProductRecord, reports::DailySalesReport};

/// Rendered form of something sent to an operator.
pub trait Message {
    fn subject(&self) -> String;

    fn body(&self) -> String;
}

/// Format an amount of USD minor units, e.g. `4500` as `$45.00`.
#[must_use]
pub fn format_amount(minor: u64) -> String {
    match i64::try_from(minor) {
        Ok(minor) => format!("{}", Money::from_minor(minor, iso::USD)),
        Err(_) => format!("{minor} USD minor units"),
    }
}

/// A product that has dropped to or below its replenishment threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LowStockAlert {
    pub product_name: String,
    pub available_quantity: u64,
    pub low_stock_threshold: u64,
    pub price: u64,
}

impl From<&ProductRecord> for LowStockAlert {
    fn from(product: &ProductRecord) -> Self {
        Self {
            product_name: product.name.clone(),
            available_quantity: product.available_quantity,
            low_stock_threshold: product.low_stock_threshold,
            price: product.price,
        }
    }
}

impl Message for LowStockAlert {
    fn subject(&self) -> String {
        format!("Low Stock Alert: {}", self.product_name)
    }

    fn body(&self) -> String {
        format!(
            "The following product is running low on stock:\n\n\
             {name}\n\
             Current stock: {quantity} units\n\
             Price: {price}\n\n\
             Please restock this item as soon as possible to avoid stockouts.\n",
            name = self.product_name,
            quantity = self.available_quantity,
            price = format_amount(self.price),
        )
    }
}

impl Message for DailySalesReport {
    fn subject(&self) -> String {
        format!("Daily Sales Report - {}", self.date)
    }

    fn body(&self) -> String {
        let mut body = format!(
            "Daily Sales Report for {date}\n\n\
             Total sales: {total}\n\
             Orders: {orders}\n",
            date = self.date,
            total = format_amount(self.total_sales),
            orders = self.total_orders,
        );

        if self.products_sold.is_empty() {
            body.push_str("\nNo sales recorded for this day.\n");

            return body;
        }

        body.push_str("\nProducts sold:\n");

        for (name, sales) in &self.products_sold {
            let _ = writeln!(
                body,
                "  {name}: {quantity} sold, {revenue}",
                quantity = sales.quantity_sold,
                revenue = format_amount(sales.revenue),
            );
        }

        body
    }
}
