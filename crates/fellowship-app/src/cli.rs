use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use fellowship_schedule::datetime::{DateTimeError, parse_calendar_date};

#[derive(Debug, Parser)]
#[command(name = "fellowship")]
#[command(about = "Resolve program occurrence statuses and expand recurrence rules")]
pub struct Cli {
    /// Configuration file to load instead of ./config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the status of a single occurrence
    Status {
        /// Occurrence date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Start time (HH:mm)
        #[arg(long)]
        start: Option<String>,

        /// End time (HH:mm)
        #[arg(long)]
        end: Option<String>,

        /// Attendance has been recorded for the occurrence
        #[arg(long)]
        attended: bool,

        /// Instant to judge against (RFC 3339), defaults to now
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },
    /// Expand a recurrence payload into dated occurrences, printed as JSON
    Project {
        /// JSON recurrence payload as sent by the backend
        payload: PathBuf,

        /// First date of the projection window
        #[arg(long, value_parser = parse_date)]
        from: NaiveDate,

        /// Last date of the window, defaults to the configured number of months
        #[arg(long, value_parser = parse_date)]
        until: Option<NaiveDate>,
    },
    /// Describe a recurrence payload in words
    Label {
        /// JSON recurrence payload as sent by the backend
        payload: PathBuf,

        /// Start date of the program
        #[arg(long, value_parser = parse_date)]
        anchor: NaiveDate,
    },
    /// Print which nth weekday of its month a date falls on
    NthWeekday {
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
    },
}

fn parse_date(value: &str) -> Result<NaiveDate, DateTimeError> {
    parse_calendar_date(value)
}
