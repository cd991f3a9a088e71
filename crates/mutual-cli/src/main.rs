//! `mutual` CLI — print the time windows in which a group of people are all free.
//!
//! ## Usage
//!
//! ```sh
//! # Common free time for two people on the default dates
//! mutual --name Maggie,Joe
//!
//! # Specific dates, records from elsewhere
//! mutual -n Maggie,Joe,Jordan -d 2021-07-05,2021-07-07 --users data/users.json --events data/events.json
//!
//! # Machine-readable output
//! mutual -n Maggie,Joe --json
//!
//! # Different working day (also settable in mutual.toml)
//! MUTUAL_WORKING_HOURS__START=09:00 MUTUAL_WORKING_HOURS__END=17:00 mutual -n Maggie
//! ```

mod config;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use mutual_engine::{events_from_json, users_from_json, AvailabilityContext, AvailabilityResult};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[derive(Parser)]
#[command(
    name = "mutual",
    version,
    about = "Find the time windows in which everyone is free"
)]
struct Cli {
    /// Comma-separated names of the people who need to meet
    #[arg(short, long, value_delimiter = ',', required = true)]
    name: Vec<String>,

    /// Comma-separated dates (YYYY-MM-DD)
    #[arg(
        short,
        long,
        value_delimiter = ',',
        value_parser = parse_date,
        default_values = ["2021-07-05", "2021-07-06", "2021-07-07"]
    )]
    date: Vec<String>,

    /// Users file (overrides `users_path` from config)
    #[arg(long)]
    users: Option<PathBuf>,

    /// Events file (overrides `events_path` from config)
    #[arg(long)]
    events: Option<PathBuf>,

    /// Config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref()).context("Failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let users_path = cli.users.as_deref().unwrap_or(config.users_path.as_path());
    let events_path = cli.events.as_deref().unwrap_or(config.events_path.as_path());

    let users = users_from_json(&read_file(users_path)?)
        .with_context(|| format!("Failed to parse users from {}", users_path.display()))?;
    let events = events_from_json(&read_file(events_path)?)
        .with_context(|| format!("Failed to parse events from {}", events_path.display()))?;

    let context = AvailabilityContext::builder(config.working_hours)
        .users(users)
        .events(events)
        .cover_dates(cli.date.as_slice())
        .build()
        .context("Failed to build availability from events")?;
    tracing::debug!(hours = %context.working_hours(), "computing availability");

    let result = context
        .availability_for(cli.name.as_slice(), cli.date.as_slice())
        .context("Failed to compute availability")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_text(&cli.name, &result));
    }

    Ok(())
}

/// Validate a `YYYY-MM-DD` date argument, keeping it in string form.
fn parse_date(raw: &str) -> std::result::Result<String, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.format("%Y-%m-%d").to_string())
        .map_err(|e| format!("invalid date '{}' (expected YYYY-MM-DD): {}", raw, e))
}

/// Render one line per free window, grouped by date with a blank line after each.
fn render_text(names: &[String], result: &AvailabilityResult) -> String {
    let mut out = format!("\nAvailability for users {}:\n\n", names.join(","));
    for day in result.iter() {
        for window in &day.windows {
            out.push_str(&format!("{} {}\n", day.date, window));
        }
        out.push('\n');
    }
    out
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}
