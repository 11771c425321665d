//! Reports Config

use clap::Args;
use jiff::{civil::Time, tz::TimeZone};

/// Daily sales report settings.
#[derive(Debug, Args)]
pub struct ReportsConfig {
    /// IANA time zone that defines the report day
    #[arg(long, env = "REPORT_TIMEZONE", default_value = "UTC", value_parser = parse_time_zone)]
    pub report_timezone: TimeZone,

    /// Local time of day at which the previous day's report is dispatched
    #[arg(long, env = "REPORT_AT", default_value = "00:05:00")]
    pub report_at: Time,
}

fn parse_time_zone(name: &str) -> Result<TimeZone, jiff::Error> {
    if name.eq_ignore_ascii_case("UTC") {
        return Ok(TimeZone::UTC);
    }

    TimeZone::get(name)
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use jiff::civil::time;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        reports: ReportsConfig,
    }

    #[test]
    fn defaults_to_five_past_midnight_utc() -> TestResult {
        let cli = TestCli::try_parse_from(["storefront"])?;

        assert_eq!(cli.reports.report_at, time(0, 5, 0, 0));
        assert_eq!(cli.reports.report_timezone.iana_name(), Some("UTC"));

        Ok(())
    }

    #[test]
    fn custom_time_is_parsed() -> TestResult {
        let cli = TestCli::try_parse_from(["storefront", "--report-at", "06:30:00"])?;

        assert_eq!(cli.reports.report_at, time(6, 30, 0, 0));

        Ok(())
    }

    #[test]
    fn invalid_time_is_rejected() {
        assert!(TestCli::try_parse_from(["storefront", "--report-at", "25:99"]).is_err());
    }
}
