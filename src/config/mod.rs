//! Run configuration for migalert.
//!
//! Built from command-line flags (see [`crate::cli`]) and validated
//! fail-fast before any request is made.

mod secret;
mod types;
mod validation;

pub use secret::SecretString;
pub use types::{
    Config, DEFAULT_ORG_ID, DEFAULT_TIMEOUT, GeneratorConfig, GrafanaConfig, OutputConfig,
};
pub use validation::validate_base_url;
