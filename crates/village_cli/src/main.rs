//! Command-line entry point over the seeded demo hub.
//!
//! # Responsibility
//! - Keep a quick probe for core crate wiring (`ping`).
//! - Render month grids, per-day events and collection counts.
//! - Push seeded appointments to Google Calendar using env configuration.

use chrono::{Datelike, Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::error::Error;
use std::process::ExitCode;
use village_core::{
    aggregate_events, events_for_date, init_logging, CalendarProvider, CalendarSyncAdapter,
    DomainStore, GoogleCalendarClient, HubConfig, HubRepository, MonthGrid, WEEKDAY_LABELS,
};

#[derive(Parser)]
#[command(name = "village")]
#[command(about = "Village Hub - appointments, school docs, notes and medications", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print core linkage info
    Ping,

    /// Show collection counts
    Summary,

    /// Render a month grid with per-day event counts
    Calendar {
        /// Month as YYYY-MM (defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// List events on one date
    Events {
        /// Date as YYYY-MM-DD
        #[arg(short, long)]
        date: String,
    },

    /// Push all appointments to Google Calendar
    Sync,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), Box<dyn Error>> {
    let config = HubConfig::from_env()?;
    if let Some(logging) = &config.logging {
        init_logging(logging)?;
    }

    let store = DomainStore::seeded();
    match command {
        Commands::Ping => {
            println!("village_core ping={}", village_core::ping());
            println!("village_core version={}", village_core::core_version());
        }
        Commands::Summary => {
            let summary = store.summary();
            println!("appointments={}", summary.appointments);
            println!("docs={}", summary.docs);
            println!("notes={}", summary.notes);
            println!("medications={}", summary.medications);
        }
        Commands::Calendar { month } => {
            let grid = match month {
                Some(raw) => parse_month(&raw)?,
                None => MonthGrid::containing(Local::now().date_naive())?,
            };
            print_grid(&store, &grid);
        }
        Commands::Events { date } => {
            let events = aggregate_events(&store);
            let on_date = events_for_date(&events, &date);
            if on_date.is_empty() {
                println!("no events on {date}");
            }
            for event in on_date {
                let time = event.time.as_deref().unwrap_or("-");
                println!("{time:>8}  [{}] {}", event.source.label(), event.title);
                if !event.details.is_empty() {
                    println!("{:>8}  {}", "", event.details);
                }
            }
        }
        Commands::Sync => {
            let time_zone = config.google.time_zone.clone();
            let client = GoogleCalendarClient::new(config.google)?;
            let display_name = client.display_name().to_string();
            let mut adapter = CalendarSyncAdapter::with_time_zone(client, Local, time_zone);
            if !adapter.init_connection() {
                return Err(format!("could not connect to {display_name}").into());
            }
            let report = adapter.sync_all(store.appointments())?;
            println!("{}", report.summary_message(&display_name));
        }
    }
    Ok(())
}

fn parse_month(raw: &str) -> Result<MonthGrid, Box<dyn Error>> {
    let first = NaiveDate::parse_from_str(&format!("{}-01", raw.trim()), "%Y-%m-%d")
        .map_err(|_| format!("month must be YYYY-MM: `{raw}`"))?;
    Ok(MonthGrid::new(first.year(), first.month())?)
}

fn print_grid(store: &DomainStore, grid: &MonthGrid) {
    let events = aggregate_events(store);
    println!("{}", grid.title());
    println!(
        "{}",
        WEEKDAY_LABELS
            .iter()
            .map(|label| format!("{label:>5}"))
            .collect::<String>()
    );
    for week in grid.weeks() {
        let row: String = week
            .iter()
            .map(|cell| match cell {
                Some(day) => {
                    let count = grid
                        .date_key_for(*day)
                        .map(|key| events_for_date(&events, &key).len())
                        .unwrap_or(0);
                    if count > 0 {
                        format!("{day:>3}*{count}")
                    } else {
                        format!("{day:>5}")
                    }
                }
                None => format!("{:>5}", ""),
            })
            .collect();
        println!("{row}");
    }
}
