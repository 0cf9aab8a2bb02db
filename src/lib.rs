// src/lib.rs
//! migalert - Export Grafana alert rules as Terraform configuration.

pub mod cli;
pub mod config;
pub mod convert;
pub mod duration;
pub mod error;
pub mod generator;
pub mod grafana;
pub mod hcl;
pub mod model;
pub mod output;

// Re-export commonly used types
pub use cli::LogFormat;
pub use convert::to_config_value;
pub use duration::{parse_duration, parse_interval};
pub use generator::{Documents, FOLDERS_DOCUMENT, Generator};
pub use grafana::GrafanaClient;
pub use model::Folders;
pub use output::{render_documents, write_documents};
