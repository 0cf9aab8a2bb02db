//! Core configuration types.

use std::path::PathBuf;
use std::time::Duration;

use super::secret::SecretString;
use super::validation::validate_base_url;
use crate::cli::Cli;
use crate::error::ConfigError;

/// Default `org_id` written on every rule group.
pub const DEFAULT_ORG_ID: i64 = 1;

/// Default HTTP timeout for the rules request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Full configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub grafana: GrafanaConfig,
    pub generator: GeneratorConfig,
    pub output: OutputConfig,
}

/// Grafana connection settings.
#[derive(Debug, Clone)]
pub struct GrafanaConfig {
    /// Base URL of the Grafana instance (e.g., "https://my-stack.grafana.net").
    pub base_url: String,
    /// Value of the `grafana_session` cookie (never exposed in logs).
    pub session: SecretString,
    /// Timeout for the whole rules request.
    pub timeout: Duration,
}

/// Options that shape the generated documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Keep rules whose provenance is `api`.
    pub include_api_rules: bool,
    /// Appended verbatim to every rule-group name.
    pub group_name_suffix: String,
    /// Appended verbatim to every rule title.
    pub rule_title_suffix: String,
    /// `org_id` attribute of every rule group.
    pub org_id: i64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            include_api_rules: false,
            group_name_suffix: String::new(),
            rule_title_suffix: String::new(),
            org_id: DEFAULT_ORG_ID,
        }
    }
}

/// Where generated documents go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Directory receiving the `.tf` files.
    pub dir: PathBuf,
    /// Print documents to stdout instead of writing files.
    pub dry_run: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            dry_run: false,
        }
    }
}

impl Config {
    /// Build the run configuration from parsed command-line flags.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            grafana: GrafanaConfig {
                base_url: cli.base_url.clone(),
                session: SecretString::new(cli.session.clone()),
                timeout: cli.timeout,
            },
            generator: GeneratorConfig {
                include_api_rules: cli.include_all,
                group_name_suffix: cli.group_suffix.clone(),
                rule_title_suffix: cli.rule_suffix.clone(),
                org_id: cli.org_id,
            },
            output: OutputConfig {
                dir: cli.output_dir.clone(),
                dry_run: cli.dry_run,
            },
        }
    }

    /// Validate the configuration, collecting every problem found.
    ///
    /// # Errors
    /// Returns a `Vec<ConfigError>` containing all validation errors found.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();

        if let Err(message) = validate_base_url(&self.grafana.base_url) {
            errors.push(ConfigError::InvalidBaseUrl {
                url: self.grafana.base_url.clone(),
                message,
            });
        }

        if self.grafana.session.expose().trim().is_empty() {
            errors.push(ConfigError::ValidationError(
                "session must not be empty".to_string(),
            ));
        }

        if self.grafana.timeout.is_zero() {
            errors.push(ConfigError::ValidationError(
                "timeout must be greater than zero".to_string(),
            ));
        }

        if !self.output.dry_run && self.output.dir.as_os_str().is_empty() {
            errors.push(ConfigError::ValidationError(
                "output directory must not be empty".to_string(),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
