//! CLI argument definitions for the table audit.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "tables-audit",
    version,
    about = "Audit operational table issues for missing and malformed fields",
    long_about = "Audit operational table issues for missing and malformed fields.\n\n\
                  Checks the required tracker fields of every table, reports each\n\
                  violation to Slack and writes a JSON report of failing tables."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Configuration file (default: ./tables-audit.toml if present).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

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
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the full audit once and write the report.
    Audit(AuditArgs),

    /// Fetch operational tables from Jira and save the snapshot.
    Fetch(FetchArgs),

    /// List the checks and the fields they audit.
    Checks,
}

#[derive(Parser)]
pub struct AuditArgs {
    /// Query Jira (and refresh the snapshot) instead of reading the snapshot.
    #[arg(long = "live")]
    pub live: bool,

    /// Log violations without posting them to Slack.
    #[arg(long = "no-notify")]
    pub no_notify: bool,

    /// Record snapshot to read (overrides the config file).
    #[arg(long = "snapshot", value_name = "PATH")]
    pub snapshot: Option<PathBuf>,

    /// Report file to write (overrides the config file).
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Accept only exact timezone abbreviations.
    ///
    /// By default a timezone line passes when it occurs anywhere in the
    /// accepted list, so `ET` is accepted because of `CET`.
    #[arg(long = "exact-timezones")]
    pub exact_timezones: bool,

    /// Require the schedule grammar to cover the whole schedule line.
    #[arg(long = "full-schedule-match")]
    pub full_schedule_match: bool,
}

#[derive(Parser)]
pub struct FetchArgs {
    /// Snapshot file to write (overrides the config file).
    #[arg(long = "snapshot", value_name = "PATH")]
    pub snapshot: Option<PathBuf>,
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
