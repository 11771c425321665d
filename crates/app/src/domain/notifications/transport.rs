//! Notification Transport

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::domain::{
    notifications::{
        errors::NotificationError,
        messages::{LowStockAlert, Message},
        recipients::Recipient,
    },
    reports::DailySalesReport,
};

/// Outbound delivery of operator notifications. Fire-and-forget: the core never retries.
#[automock]
#[async_trait]
pub trait NotificationTransport: Send + Sync {
    async fn send_low_stock_alert(
        &self,
        recipient: &Recipient,
        alert: &LowStockAlert,
    ) -> Result<(), NotificationError>;

    async fn send_daily_sales_report(
        &self,
        recipient: &Recipient,
        report: &DailySalesReport,
    ) -> Result<(), NotificationError>;
}

/// Transport that writes rendered messages to the log instead of delivering them.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTransport;

impl LogTransport {
    fn write(recipient: &Recipient, message: &impl Message) {
        info!(
            to = %recipient.email,
            name = recipient.display_name(),
            subject = %message.subject(),
            body = %message.body(),
            "notification"
        );
    }
}

#[async_trait]
impl NotificationTransport for LogTransport {
    async fn send_low_stock_alert(
        &self,
        recipient: &Recipient,
        alert: &LowStockAlert,
    ) -> Result<(), NotificationError> {
        Self::write(recipient, alert);

        Ok(())
    }

    async fn send_daily_sales_report(
        &self,
        recipient: &Recipient,
        report: &DailySalesReport,
    ) -> Result<(), NotificationError> {
        Self::write(recipient, report);

        Ok(())
    }
}
