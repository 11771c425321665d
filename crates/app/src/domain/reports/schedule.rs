//! Daily report schedule.

use std::{future::Future, sync::Arc, time::Duration};

use jiff::{
    Timestamp, Zoned,
    civil::{Date, Time},
    tz::TimeZone,
};
use tracing::{info, warn};

use crate::domain::reports::service::ReportsService;

/// The first moment strictly after `now` whose wall-clock time is `at`, in `now`'s zone.
///
/// # Errors
///
/// Returns an error if the resulting date is outside jiff's supported range.
pub fn next_run_after(now: &Zoned, at: Time) -> Result<Zoned, jiff::Error> {
    let today = now.date().to_datetime(at).to_zoned(now.time_zone().clone())?;

    if today > *now {
        return Ok(today);
    }

    now.date()
        .tomorrow()?
        .to_datetime(at)
        .to_zoned(now.time_zone().clone())
}

/// The day a run at `run` reports on: the last local day that has fully ended.
///
/// # Errors
///
/// Returns an error if `run` falls on jiff's minimum date.
pub fn report_date_for_run(run: &Zoned) -> Result<Date, jiff::Error> {
    run.date().yesterday()
}

/// Every day at `at`, dispatch the report for the previous day, until `shutdown` resolves.
pub async fn run_daily_schedule<F>(
    service: Arc<dyn ReportsService>,
    time_zone: TimeZone,
    at: Time,
    shutdown: F,
) -> Result<(), jiff::Error>
where
    F: Future<Output = ()> + Send,
{
    tokio::pin!(shutdown);

    loop {
        let now = Timestamp::now().to_zoned(time_zone.clone());
        let next = next_run_after(&now, at)?;
        let wait = Duration::try_from(now.duration_until(&next)).unwrap_or(Duration::ZERO);
        let day = report_date_for_run(&next)?;

        info!(next_run = %next, date = %day, "daily sales report scheduled");

        tokio::select! {
            () = tokio::time::sleep(wait) => {
                if let Err(error) = service.dispatch_daily_report(day).await {
                    warn!(date = %day, error = %error, "daily sales report failed");
                }
            }
            () = &mut shutdown => {
                info!("daily sales report schedule stopped");

                return Ok(());
            }
        }
    }
}
