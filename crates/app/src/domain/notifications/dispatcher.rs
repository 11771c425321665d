//! Notification Dispatcher

use std::{fmt, sync::Arc};

use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::{
    notifications::{
        messages::LowStockAlert, recipients::RecipientResolver, transport::NotificationTransport,
    },
    reports::DailySalesReport,
};

/// Outcome of a dispatch attempt. Failures are recorded here and in the log, never raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Delivery {
    Sent,
    NoRecipient,
    Failed,
}

/// Resolves the operator and hands messages to the transport.
#[derive(Clone)]
pub struct NotificationDispatcher {
    recipients: Arc<dyn RecipientResolver>,
    transport: Arc<dyn NotificationTransport>,
}

impl fmt::Debug for NotificationDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationDispatcher").finish_non_exhaustive()
    }
}

impl NotificationDispatcher {
    #[must_use]
    pub fn new(
        recipients: Arc<dyn RecipientResolver>,
        transport: Arc<dyn NotificationTransport>,
    ) -> Self {
        Self {
            recipients,
            transport,
        }
    }

    pub async fn low_stock_alert(&self, alert: &LowStockAlert) -> Delivery {
        let Some(recipient) = self.recipients.resolve().await else {
            debug!(product = %alert.product_name, "no operator to alert");

            return Delivery::NoRecipient;
        };

        match self.transport.send_low_stock_alert(&recipient, alert).await {
            Ok(()) => Delivery::Sent,
            Err(error) => {
                warn!(
                    product = %alert.product_name,
                    error = %error,
                    "low stock alert dispatch failed"
                );

                Delivery::Failed
            }
        }
    }

    pub async fn daily_sales_report(&self, report: &DailySalesReport) -> Delivery {
        let Some(recipient) = self.recipients.resolve().await else {
            debug!(date = %report.date, "no operator to report to");

            return Delivery::NoRecipient;
        };

        match self.transport.send_daily_sales_report(&recipient, report).await {
            Ok(()) => Delivery::Sent,
            Err(error) => {
                warn!(date = %report.date, error = %error, "daily sales report dispatch failed");

                Delivery::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use crate::domain::notifications::{
        MockNotificationTransport, MockRecipientResolver, NotificationError, Recipient,
    };

    use super::*;

    fn alert() -> LowStockAlert {
        LowStockAlert {
            product_name: "Widget".to_string(),
            available_quantity: 2,
            low_stock_threshold: 5,
            price: 10_00,
        }
    }

    fn operator() -> Option<Recipient> {
        Some(Recipient {
            email: "ops@example.com".to_string(),
            name: None,
        })
    }

    #[tokio::test]
    async fn sends_to_resolved_operator() {
        let mut recipients = MockRecipientResolver::new();
        recipients.expect_resolve().returning(operator);

        let mut transport = MockNotificationTransport::new();
        transport
            .expect_send_low_stock_alert()
            .withf(|recipient, alert| {
                recipient.email == "ops@example.com" && alert.product_name == "Widget"
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let dispatcher = NotificationDispatcher::new(Arc::new(recipients), Arc::new(transport));

        assert_eq!(dispatcher.low_stock_alert(&alert()).await, Delivery::Sent);
    }

    #[tokio::test]
    async fn skips_when_no_operator() {
        let mut recipients = MockRecipientResolver::new();
        recipients.expect_resolve().returning(|| None);

        let mut transport = MockNotificationTransport::new();
        transport.expect_send_low_stock_alert().never();
        transport.expect_send_daily_sales_report().never();

        let dispatcher = NotificationDispatcher::new(Arc::new(recipients), Arc::new(transport));

        assert_eq!(
            dispatcher.low_stock_alert(&alert()).await,
            Delivery::NoRecipient
        );
        assert_eq!(
            dispatcher
                .daily_sales_report(&DailySalesReport::empty(date(2025, 3, 14)))
                .await,
            Delivery::NoRecipient
        );
    }

    #[tokio::test]
    async fn transport_failure_is_reported_not_raised() {
        let mut recipients = MockRecipientResolver::new();
        recipients.expect_resolve().returning(operator);

        let mut transport = MockNotificationTransport::new();
        transport
            .expect_send_daily_sales_report()
            .times(1)
            .returning(|_, _| Err(NotificationError::Rejected("mailbox full".to_string())));

        let dispatcher = NotificationDispatcher::new(Arc::new(recipients), Arc::new(transport));

        let delivery = dispatcher
            .daily_sales_report(&DailySalesReport::empty(date(2025, 3, 14)))
            .await;

        assert_eq!(delivery, Delivery::Failed);
    }
}
