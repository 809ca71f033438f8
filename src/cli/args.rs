use crate::utils::constants::{TOP_N_MAX, TOP_N_MIN};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "covid-dashboard")]
#[command(about = "Global COVID-19 data analysis and visualization")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, help = "Configuration file [default: covid-dashboard.toml]")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Cache artifact path (overrides configuration)")]
    pub cache: Option<PathBuf>,
}

/// Inclusive date range. A missing bound defaults to the dataset's own
/// first or last date.
#[derive(Args, Debug, Clone, Default)]
pub struct DateRangeArgs {
    #[arg(long, help = "First date to include (YYYY-MM-DD)")]
    pub start: Option<NaiveDate>,

    #[arg(long, help = "Last date to include (YYYY-MM-DD)")]
    pub end: Option<NaiveDate>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render summary, top-N bars, timeline, bubbles and preview
    Dashboard {
        #[command(flatten)]
        range: DateRangeArgs,

        #[arg(
            short = 'n',
            long,
            value_parser = parse_top_n,
            help = "Top N countries, 5-30 [default: from configuration]"
        )]
        top_n: Option<usize>,

        #[arg(short, long, help = "Country for the timeline [default: first alphabetically]")]
        location: Option<String>,

        #[arg(long, help = "Rows shown in the data preview")]
        preview_rows: Option<usize>,

        #[arg(long, help = "Emit the dashboard as JSON")]
        json: bool,
    },

    /// Export the date-filtered rows as CSV
    Export {
        #[command(flatten)]
        range: DateRangeArgs,

        #[arg(short, long, help = "Output CSV path [default: covid_filtered.csv]")]
        output: Option<PathBuf>,
    },

    /// Display information about the cache artifact
    Info {
        #[arg(short, long, default_value = "10")]
        sample: usize,
    },

    /// Create the cache artifact, or rebuild it with --force
    Generate {
        #[arg(long, help = "Discard an existing artifact first")]
        force: bool,

        #[arg(long, help = "Seed for the synthetic data (overrides configuration)")]
        seed: Option<u64>,
    },
}

fn parse_top_n(value: &str) -> Result<usize, String> {
    let n: usize = value
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;

    if (TOP_N_MIN..=TOP_N_MAX).contains(&n) {
        Ok(n)
    } else {
        Err(format!("must be between {} and {}", TOP_N_MIN, TOP_N_MAX))
    }
}
