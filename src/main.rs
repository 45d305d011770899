use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use vakit::{
    config::Config,
    error::Error,
    lock::SingleFlightLock,
    service::{prayer_time::PrayerTimeService, refresh::RefreshService},
    startup,
};

/// Cached daily prayer times
#[derive(Parser)]
#[command(name = "vakit", version, about = "Cached daily prayer times")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Prayer times for one day, served from the cache when possible
    Get {
        #[command(flatten)]
        location: LocationArgs,
        /// Day to resolve (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Prayer times for every day of a month
    Month {
        #[command(flatten)]
        location: LocationArgs,
        #[command(flatten)]
        month: MonthArgs,
    },
    /// Re-fetch every day of a month from the provider
    Refresh {
        #[command(flatten)]
        location: LocationArgs,
        #[command(flatten)]
        month: MonthArgs,
    },
}

#[derive(Args)]
struct LocationArgs {
    /// City identifier, e.g. `izmir`
    city: String,
    /// District within the city
    #[arg(long)]
    district: Option<String>,
}

#[derive(Args)]
struct MonthArgs {
    #[arg(long)]
    year: i32,
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: u32,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cli, config).await {
        tracing::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: Config) -> Result<(), Error> {
    #[cfg(feature = "redis")]
    let lock = startup::connect_to_lock_store(&config).await?;
    #[cfg(not(feature = "redis"))]
    let lock = vakit::lock::LocalLockRegistry::new();

    execute(cli.command, &config, &lock).await
}

async fn execute<L: SingleFlightLock>(
    command: Command,
    config: &Config,
    lock: &L,
) -> Result<(), Error> {
    let db = startup::connect_to_database(config).await?;
    let provider = startup::build_provider(config)?;
    let resolver = startup::build_resolver(config)?;

    let service = PrayerTimeService::new(
        &db,
        &provider,
        &resolver,
        lock,
        config.resolution.clone(),
    );

    match command {
        Command::Get { location, date } => {
            let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            let result = service
                .get_prayer_times(&location.city, location.district.as_deref(), date)
                .await?;

            print_json(&result)
        }
        Command::Month { location, month } => {
            let result = service
                .get_month(
                    &location.city,
                    location.district.as_deref(),
                    month.year,
                    month.month,
                )
                .await?;

            print_json(&result)
        }
        Command::Refresh { location, month } => {
            let refresh = RefreshService::new(&service);
            let summary = refresh
                .refresh_month(
                    &location.city,
                    location.district.as_deref(),
                    month.year,
                    month.month,
                )
                .await?;

            print_json(&summary)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Error> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| Error::InternalError(format!("Failed to serialize output: {}", e)))?;

    println!("{}", json);

    Ok(())
}
