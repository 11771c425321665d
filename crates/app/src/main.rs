//! Storefront CLI

mod shutdown;

use std::process;

use clap::{Args, Parser, Subcommand};
use jiff::{Timestamp, civil::Date};
use storefront_app::{
    config::{DatabaseConfig, LoggingConfig, NotificationsConfig, ReportsConfig},
    context::{AppContext, AppOptions},
    database,
    domain::{alerts::AlertReceiver, reports::schedule::run_daily_schedule},
    observability,
};
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Storefront checkout and replenishment core", long_about = None)]
struct Cli {
    #[command(flatten)]
    logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate(MigrateArgs),

    /// Compute and dispatch the daily sales report for one day
    Report(ReportArgs),

    /// Run the daily report schedule until stopped
    ///
    /// Low-stock alerts are delivered by the process that places orders, through
    /// `AppContext::start`.
    Worker(WorkerArgs),
}

#[derive(Debug, Args)]
struct MigrateArgs {
    #[command(flatten)]
    database: DatabaseConfig,
}

#[derive(Debug, Args)]
struct ReportArgs {
    /// Report day (YYYY-MM-DD); today in the report time zone when omitted
    #[arg(long)]
    date: Option<Date>,

    #[command(flatten)]
    database: DatabaseConfig,

    #[command(flatten)]
    notifications: NotificationsConfig,

    #[command(flatten)]
    reports: ReportsConfig,
}

#[derive(Debug, Args)]
struct WorkerArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    #[command(flatten)]
    notifications: NotificationsConfig,

    #[command(flatten)]
    reports: ReportsConfig,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = observability::init_subscriber(&cli.logging) {
        eprintln!("{error}");
        process::exit(1);
    }

    if let Err(error) = run(cli.command).await {
        error!(%error, "command failed");
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(command: Commands) -> Result<(), String> {
    match command {
        Commands::Migrate(args) => migrate(args).await,
        Commands::Report(args) => report(args).await,
        Commands::Worker(args) => worker(args).await,
    }
}

fn options(notifications: &NotificationsConfig, reports: &ReportsConfig) -> AppOptions {
    AppOptions {
        recipient: notifications.recipient(),
        time_zone: reports.report_timezone.clone(),
        alert_queue_capacity: notifications.alert_queue_capacity,
        ..AppOptions::default()
    }
}

async fn connect(
    database: &DatabaseConfig,
    options: AppOptions,
) -> Result<(AppContext, AlertReceiver), String> {
    AppContext::from_database_url(&database.database_url, options)
        .await
        .map_err(|error| format!("failed to start: {error}"))
}

async fn migrate(args: MigrateArgs) -> Result<(), String> {
    let pool = database::connect(&args.database.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    database::migrate(&pool)
        .await
        .map_err(|error| format!("failed to apply migrations: {error}"))?;

    info!("migrations applied");

    Ok(())
}

async fn report(args: ReportArgs) -> Result<(), String> {
    let date = args.date.unwrap_or_else(|| {
        Timestamp::now()
            .to_zoned(args.reports.report_timezone.clone())
            .date()
    });

    let (context, _alerts) = connect(
        &args.database,
        options(&args.notifications, &args.reports),
    )
    .await?;

    let dispatched = context
        .reports
        .dispatch_daily_report(date)
        .await
        .map_err(|error| format!("failed to build report for {date}: {error}"))?;

    let summary = serde_json::to_string_pretty(&dispatched)
        .map_err(|error| format!("failed to render report: {error}"))?;

    println!("{summary}");

    Ok(())
}

async fn worker(args: WorkerArgs) -> Result<(), String> {
    let (context, _alerts) = connect(
        &args.database,
        options(&args.notifications, &args.reports),
    )
    .await?;

    let shutdown = async {
        if let Err(error) = shutdown::listen().await {
            error!(%error, "shutdown signal handler failed");
        }
    };

    run_daily_schedule(
        context.reports.clone(),
        args.reports.report_timezone.clone(),
        args.reports.report_at,
        shutdown,
    )
    .await
    .map_err(|error| format!("report schedule failed: {error}"))?;

    info!("worker stopped");

    Ok(())
}
