use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use transferencias_client::statement::SortColumn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsoDate(pub String);

impl IsoDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn parse_iso_date(value: &str) -> Result<IsoDate, String> {
    let bytes = value.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && [0usize, 1, 2, 3, 5, 6, 8, 9]
            .iter()
            .all(|index| bytes[*index].is_ascii_digit());
    if !shaped {
        return Err("date must use YYYY-MM-DD format".to_string());
    }
    if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
        return Err("date must use valid calendar values".to_string());
    }
    Ok(IsoDate(value.to_string()))
}

pub fn parse_sort_column(value: &str) -> Result<String, String> {
    if SortColumn::from_wire_name(value).is_some() {
        return Ok(value.to_string());
    }
    let known = SortColumn::ALL
        .iter()
        .map(|column| column.wire_name())
        .collect::<Vec<&str>>()
        .join(", ");
    Err(format!("sort column must be one of: {known}"))
}

pub const SCHEDULE_AFTER_HELP: &str = "\
Rules checked before anything is sent:
  Accounts have exactly 10 digits and must differ.
  The date is today or later (YYYY-MM-DD, defaults to today).
  Same-day transfers need at least R$ 3,00.
  Transfers 1 to 10 days out need at least R$ 12,00.

The fee is quoted first and shown with the result. If the service has no
fee for the date, the quote warning is shown and the service decides on
submission.

Run `transferencias check ...` with the same flags to validate offline.
";

#[derive(Debug, Parser)]
#[command(
    name = "transferencias",
    version,
    about = "schedule bank transfers and review the statement",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Transfer service base URL (overrides TRANSFERENCIAS_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate, quote and schedule a transfer
    #[command(after_help = SCHEDULE_AFTER_HELP)]
    Schedule {
        /// Source account (10 digits)
        #[arg(long, value_name = "ACCOUNT")]
        from: Option<String>,
        /// Destination account (10 digits)
        #[arg(long, value_name = "ACCOUNT")]
        to: Option<String>,
        /// Amount in BRL, e.g. 1500.00 or 1500,00
        #[arg(long)]
        amount: Option<String>,
        /// Transfer date (YYYY-MM-DD), defaults to today
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<String>,
        /// Emit structured JSON output
        #[arg(long)]
        json: bool,
    },
    /// Ask the service for the fee of a transfer without scheduling it
    Quote {
        /// Amount in BRL
        #[arg(long)]
        amount: String,
        /// Transfer date (YYYY-MM-DD)
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: String,
        /// Emit structured JSON output
        #[arg(long)]
        json: bool,
    },
    /// Validate a transfer locally without contacting the service
    Check {
        /// Source account (10 digits)
        #[arg(long, value_name = "ACCOUNT")]
        from: Option<String>,
        /// Destination account (10 digits)
        #[arg(long, value_name = "ACCOUNT")]
        to: Option<String>,
        /// Amount in BRL
        #[arg(long)]
        amount: Option<String>,
        /// Transfer date (YYYY-MM-DD), defaults to today
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<String>,
        /// Emit structured JSON output
        #[arg(long)]
        json: bool,
    },
    /// List scheduled transfers with totals, optionally exporting CSV
    Statement {
        /// Keep transfers whose source account contains this text
        #[arg(long)]
        account: Option<String>,
        /// Earliest scheduling date (YYYY-MM-DD, inclusive)
        #[arg(long, value_parser = parse_iso_date)]
        since: Option<IsoDate>,
        /// Latest scheduling date (YYYY-MM-DD, inclusive)
        #[arg(long, value_parser = parse_iso_date)]
        until: Option<IsoDate>,
        /// Column to sort by, e.g. valorTransferencia (default dataAgendamento, newest first)
        #[arg(long, value_parser = parse_sort_column)]
        sort: Option<String>,
        /// Sort ascending
        #[arg(long, conflicts_with = "desc")]
        asc: bool,
        /// Sort descending
        #[arg(long)]
        desc: bool,
        /// Write the listed rows as CSV (default name extrato_transferencias_<date>.csv)
        #[arg(long, value_name = "PATH", num_args = 0..=1)]
        csv: Option<Option<PathBuf>>,
        /// Emit structured JSON output
        #[arg(long)]
        json: bool,
    },
    /// Show one scheduled transfer by id
    Show {
        id: i64,
        /// Emit structured JSON output
        #[arg(long)]
        json: bool,
    },
    /// List transfers scheduled from one source account
    Account {
        /// Source account (10 digits)
        account: String,
        /// Emit structured JSON output
        #[arg(long)]
        json: bool,
    },
    /// Check that the transfer service is up
    Health {
        /// Emit structured JSON output
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}
