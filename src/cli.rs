//! Command-line interface for migalert using clap.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::DEFAULT_ORG_ID;

/// Log output format.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable text format (default).
    #[default]
    Text,
    /// Structured JSON format for log aggregation.
    Json,
}

/// Export Grafana alert rules as Terraform configuration.
#[derive(Parser, Debug)]
#[command(name = "migalert")]
#[command(version)]
#[command(about = "Export Grafana alert rules as Terraform configuration")]
pub struct Cli {
    /// The Grafana base URL (e.g. https://my-stack.grafana.net).
    #[arg(long = "base-url", env = "GRAFANA_URL")]
    pub base_url: String,

    /// The Grafana session id, found in the `grafana_session` cookie.
    #[arg(long = "session", env = "GRAFANA_SESSION", hide_env_values = true)]
    pub session: String,

    /// Include rules that were created through the API.
    #[arg(long = "include-all")]
    pub include_all: bool,

    /// Suffix to add to rule group names.
    #[arg(long = "group-suffix", default_value = "")]
    pub group_suffix: String,

    /// Suffix to add to rule titles.
    #[arg(long = "rule-suffix", default_value = "")]
    pub rule_suffix: String,

    /// Organization id written on every rule group.
    #[arg(long = "org-id", default_value_t = DEFAULT_ORG_ID)]
    pub org_id: i64,

    /// Directory where the .tf files are written.
    #[arg(short = 'o', long = "output-dir", default_value = ".")]
    pub output_dir: PathBuf,

    /// HTTP timeout for the rules request (e.g. 30s, 1m).
    #[arg(long = "timeout", default_value = "30s", value_parser = humantime::parse_duration)]
    pub timeout: Duration,

    /// Print the generated documents instead of writing files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Log format: text or json.
    #[arg(long = "log-format", value_enum, default_value_t = LogFormat::Text, env = "LOG_FORMAT")]
    pub log_format: LogFormat,
}
