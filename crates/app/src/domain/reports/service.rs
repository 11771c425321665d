//! Reports service.

use async_trait::async_trait;
use jiff::{Timestamp, civil::Date, tz::TimeZone};
use mockall::automock;
use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    database::Db,
    domain::{
        notifications::{Delivery, NotificationDispatcher},
        orders::{
            records::{OrderStatus, OrderUuid},
            repositories::{PgOrderItemsRepository, PgOrdersRepository, attach_items},
        },
        reports::{errors::ReportsServiceError, records::DailySalesReport},
    },
};

/// A computed report and what happened when it was sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchedReport {
    pub report: DailySalesReport,
    pub delivery: Delivery,
}

#[derive(Debug, Clone)]
pub struct PgReportsService {
    db: Db,
    orders_repository: PgOrdersRepository,
    items_repository: PgOrderItemsRepository,
    time_zone: TimeZone,
    dispatcher: NotificationDispatcher,
}

impl PgReportsService {
    #[must_use]
    pub fn new(db: Db, time_zone: TimeZone, dispatcher: NotificationDispatcher) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            items_repository: PgOrderItemsRepository::new(),
            time_zone,
            dispatcher,
        }
    }

    /// The half-open instant range `[start of date, start of next date)` in the report zone.
    fn day_bounds(&self, date: Date) -> Result<(Timestamp, Timestamp), ReportsServiceError> {
        let from = date.to_zoned(self.time_zone.clone())?.timestamp();
        let until = date.tomorrow()?.to_zoned(self.time_zone.clone())?.timestamp();

        Ok((from, until))
    }
}

#[async_trait]
impl ReportsService for PgReportsService {
    async fn compute_daily_report(&self, date: Date) -> Result<DailySalesReport, ReportsServiceError> {
        let (from, until) = self.day_bounds(date)?;

        let mut tx = self.db.begin_transaction().await?;

        let mut orders = self
            .orders_repository
            .list_orders_between(&mut tx, OrderStatus::Completed, from, until)
            .await?;

        let uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        let items = self.items_repository.get_order_items(&mut tx, &uuids).await?;

        tx.commit().await?;

        attach_items(&mut orders, items);

        DailySalesReport::from_orders(date, &orders)
    }

    #[instrument(skip(self))]
    async fn dispatch_daily_report(
        &self,
        date: Date,
    ) -> Result<DispatchedReport, ReportsServiceError> {
        let report = self.compute_daily_report(date).await?;
        let delivery = self.dispatcher.daily_sales_report(&report).await;

        info!(
            total_sales = report.total_sales,
            total_orders = report.total_orders,
            ?delivery,
            "daily sales report processed"
        );

        Ok(DispatchedReport { report, delivery })
    }
}

#[automock]
#[async_trait]
pub trait ReportsService: Send + Sync {
    /// Summarize the completed orders created on `date` in the report time zone.
    async fn compute_daily_report(&self, date: Date) -> Result<DailySalesReport, ReportsServiceError>;

    /// Compute the report for `date` and send it to the operator, if there is one.
    async fn dispatch_daily_report(&self, date: Date)
    -> Result<DispatchedReport, ReportsServiceError>;
}
