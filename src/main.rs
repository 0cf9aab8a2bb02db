//! migalert - Export Grafana alert rules as Terraform configuration.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};

use migalert::cli::{Cli, LogFormat};
use migalert::config::Config;
use migalert::{GrafanaClient, Generator, render_documents, write_documents};

/// Initialize the tracing subscriber with the specified log format.
///
/// Logs go to stderr so `--dry-run` output on stdout stays clean.
fn init_logging(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    match format {
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .json()
                .with_current_span(true)
                .with_span_list(false)
                .flatten_event(true)
                .with_env_filter(filter)
                .init();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_format);

    let config = Config::from_cli(&cli);

    // Fail fast before any request is made
    if let Err(errors) = config.validate() {
        for e in &errors {
            error!(error = %e, "Configuration validation error");
        }
        error!(
            error_count = errors.len(),
            "Configuration validation failed"
        );
        std::process::exit(1);
    }

    // The fetch is the only async step; everything else runs inline
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let client = GrafanaClient::new(config.grafana.clone())?;
    let folders = runtime
        .block_on(client.fetch_rules())
        .context("Failed to fetch alert rules")?;

    let documents = Generator::new(config.generator.clone())
        .generate(&folders)
        .context("Failed to generate Terraform documents")?;

    if documents.is_empty() {
        warn!(
            include_api_rules = config.generator.include_api_rules,
            "No eligible alert rules found, nothing to write"
        );
        return Ok(());
    }

    if config.output.dry_run {
        print!("{}", render_documents(&documents));
        return Ok(());
    }

    let written = write_documents(&config.output.dir, &documents)
        .context("Failed to write Terraform documents")?;

    info!(
        documents = written.len(),
        dir = %config.output.dir.display(),
        "migalert finished"
    );
    Ok(())
}
