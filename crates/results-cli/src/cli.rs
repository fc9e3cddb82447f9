//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use results_cli::logging::LogFormat;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "series-results",
    version,
    about = "Find duplicate riders and compute series standings",
    long_about = "Find duplicate riders and compute series standings.\n\n\
                  Reads rider and result CSV files exported by the results\n\
                  database and prints ranked individual and team tables."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// When to colour tables and log lines.
    #[command(flatten)]
    pub color: Color,

    /// Log level; takes precedence over -v and -q.
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log line format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Append logs to this file rather than stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow rider names in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// List probable duplicate riders grouped into clusters.
    Duplicates(DuplicatesArgs),

    /// Compute ranked standings for a series.
    Standings(StandingsArgs),

    /// Show point tables or the points for one position.
    Points(PointsArgs),
}

#[derive(Parser)]
pub struct DuplicatesArgs {
    /// Rider CSV (id, first_name, last_name, club, external_id).
    #[arg(long = "riders", value_name = "CSV")]
    pub riders: PathBuf,

    /// Minimum pair score for a duplicate candidate (0.0 to 1.0).
    #[arg(long = "threshold", value_name = "SCORE", conflicts_with_all = ["strict", "relaxed"])]
    pub threshold: Option<f64>,

    /// Only report near-certain duplicates.
    #[arg(long = "strict", conflicts_with = "relaxed")]
    pub strict: bool,

    /// Report more candidates for manual review.
    #[arg(long = "relaxed")]
    pub relaxed: bool,

    /// Prefix marking provisional licence ids.
    #[arg(long = "provisional-prefix", value_name = "PREFIX")]
    pub provisional_prefix: Option<String>,
}

#[derive(Parser)]
pub struct StandingsArgs {
    /// Rider CSV (id, first_name, last_name, club, external_id).
    #[arg(long = "riders", value_name = "CSV")]
    pub riders: PathBuf,

    /// Result CSV (rider_id, class_name, position, points, event_id, valid).
    #[arg(long = "results", value_name = "CSV")]
    pub results: PathBuf,

    /// Compute team standings as well.
    #[arg(long = "team")]
    pub team: bool,

    /// Only show this class.
    #[arg(long = "class", value_name = "NAME")]
    pub class: Option<String>,

    /// Point system used for rows without a points column value.
    #[arg(long = "system", value_name = "ID")]
    pub system: Option<String>,

    /// TOML file with custom or additional point tables.
    #[arg(long = "points-config", value_name = "PATH")]
    pub points_config: Option<PathBuf>,

    /// Also write the standings as CSV for spreadsheets.
    #[arg(long = "export", value_name = "PATH")]
    pub export: Option<PathBuf>,
}

#[derive(Parser)]
pub struct PointsArgs {
    /// TOML file with custom or additional point tables.
    #[arg(long = "points-config", value_name = "PATH")]
    pub points_config: Option<PathBuf>,

    /// Point system id (ENDURO, DH_KVAL, DH_RACE, OTHERS, CUSTOM, ...).
    #[arg(long = "system", value_name = "ID", requires = "position")]
    pub system: Option<String>,

    /// 1-based finishing position.
    #[arg(long = "position", value_name = "N", requires = "system")]
    pub position: Option<u32>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => Self::ERROR,
            LogLevelArg::Warn => Self::WARN,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Trace => Self::TRACE,
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}
