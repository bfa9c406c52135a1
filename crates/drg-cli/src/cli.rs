//! CLI argument definitions for `drg-cost`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use drg_model::EXTRA_LOSS_CHOICES;

#[derive(Parser)]
#[command(
    name = "drg-cost",
    version,
    about = "DRG case-mix cost analysis",
    long_about = "Analyse hospital DRG cost exports.\n\n\
                  Ingest the disease detail, case detail and consumable usage\n\
                  spreadsheets, then rank loss-making diseases, break costs down\n\
                  by department and treatment group, and audit per-case usage."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Settings file (default: settings.toml in the user config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database file (overrides the settings file).
    #[arg(long = "database", value_name = "PATH", global = true)]
    pub database: Option<PathBuf>,

    /// Print results as JSON instead of tables.
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Take the first DRG / item name when a group's rows disagree.
    #[arg(long = "lenient-groups", global = true)]
    pub lenient_groups: bool,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow patient-level values in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load a source spreadsheet into the database, replacing its table.
    #[command(subcommand)]
    Ingest(IngestCommand),

    /// Rank diseases by consumable cost excess.
    Losses(LossesArgs),

    /// Find disease names containing a text.
    Search {
        /// Case-insensitive text; empty lists every disease.
        #[arg(value_name = "QUERY", default_value = "")]
        query: String,
    },

    /// Costs of one disease per department.
    Departments {
        #[arg(value_name = "DISEASE")]
        disease: String,
    },

    /// Costs of one disease in one department per treatment group.
    Groups {
        #[arg(value_name = "DISEASE")]
        disease: String,
        #[arg(value_name = "DEPARTMENT")]
        department: String,
    },

    /// Headline cost figures of one disease.
    Overview {
        #[arg(value_name = "DISEASE")]
        disease: String,
    },

    /// Cases filed under one disease.
    Cases {
        #[arg(value_name = "DISEASE")]
        disease: String,
    },

    /// Cases similar to a patient's case.
    Similar(SimilarArgs),

    /// Consumable usage of one case.
    Usage(UsageArgs),

    /// Row counts of the stored tables.
    Tables,
}

#[derive(Subcommand)]
pub enum IngestCommand {
    /// Disease detail workbook (first sheet).
    Disease {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Case detail workbook (first sheet).
    Cases {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Consumable usage workbooks (every sheet). No files clears the table.
    Consumables {
        #[arg(value_name = "FILES")]
        files: Vec<PathBuf>,
    },
}

#[derive(Args)]
pub struct LossesArgs {
    /// Also show this many diseases ranked after the headline list (15, 30, 45 or 60).
    #[arg(long = "extra", value_name = "N", value_parser = parse_extra)]
    pub extra: Option<usize>,
}

#[derive(Args)]
pub struct SimilarArgs {
    #[arg(value_name = "DISEASE")]
    pub disease: String,

    /// Patient whose first case under DISEASE is the reference.
    #[arg(value_name = "PATIENT")]
    pub patient: String,

    /// Length-of-stay window in days (overrides the settings file).
    #[arg(long = "window", value_name = "DAYS")]
    pub window: Option<f64>,

    /// Keep the reference case in input order instead of listing it first.
    #[arg(long = "no-promote")]
    pub no_promote: bool,
}

#[derive(Args)]
pub struct UsageArgs {
    #[arg(value_name = "PATIENT")]
    pub patient: String,

    /// Medical record number of the case.
    #[arg(value_name = "RECORD_NUMBER")]
    pub record_number: String,

    /// List the individual usage rows instead of per-item totals.
    #[arg(long = "detail")]
    pub detail: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_extra(value: &str) -> Result<usize, String> {
    let count: usize = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if EXTRA_LOSS_CHOICES.contains(&count) {
        Ok(count)
    } else {
        Err(format!("must be one of {EXTRA_LOSS_CHOICES:?}"))
    }
}
