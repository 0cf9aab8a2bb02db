//! Centralized error types for migalert using thiserror.
//!
//! Every error is fatal to a run. Wrapping variants keep the underlying
//! error reachable through `source()` so the binary can print the full chain.

use std::path::PathBuf;

use thiserror::Error;

/// Errors related to invocation parameters.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },
    #[error("invalid configuration: {0}")]
    ValidationError(String),
}

/// Errors related to compact duration strings such as `1d2h3m4s`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    #[error("invalid duration '{0}'")]
    InvalidDuration(String),
}

/// Errors raised while converting an opaque JSON payload into a configuration value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("cannot convert {kind} value at '{path}'")]
    Unsupported { path: String, kind: &'static str },
}

/// Errors raised while building configuration documents from fetched rules.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("rule group '{group}' in folder '{folder}' has an invalid interval: {source}")]
    InvalidInterval {
        folder: String,
        group: String,
        #[source]
        source: DurationError,
    },
    #[error("rule '{rule}' in group '{group}' has an unsupported model: {source}")]
    Conversion {
        group: String,
        rule: String,
        #[source]
        source: ConversionError,
    },
}

/// Errors related to fetching rules from the Grafana ruler API.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("failed with status code: {status}")]
    Status { status: u16 },
    #[error("invalid response body: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Errors related to writing generated documents to disk.
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("failed to write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn config_error_display() {
        let err = ConfigError::InvalidBaseUrl {
            url: "grafana".to_string(),
            message: "relative URL without a base".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid base URL 'grafana': relative URL without a base"
        );

        let err = ConfigError::ValidationError("session must not be empty".to_string());
        assert_eq!(
            err.to_string(),
            "invalid configuration: session must not be empty"
        );
    }

    #[test]
    fn duration_error_display() {
        let err = DurationError::InvalidDuration("1x".to_string());
        assert_eq!(err.to_string(), "invalid duration '1x'");
    }

    #[test]
    fn conversion_error_display() {
        let err = ConversionError::Unsupported {
            path: "model.datasource".to_string(),
            kind: "null",
        };
        assert_eq!(
            err.to_string(),
            "cannot convert null value at 'model.datasource'"
        );
    }

    #[test]
    fn generate_error_keeps_duration_source() {
        let err = GenerateError::InvalidInterval {
            folder: "team-a".to_string(),
            group: "alerts".to_string(),
            source: DurationError::InvalidDuration("soon".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "rule group 'alerts' in folder 'team-a' has an invalid interval: invalid duration 'soon'"
        );
        let source = err.source().expect("source is kept");
        assert_eq!(source.to_string(), "invalid duration 'soon'");
    }

    #[test]
    fn generate_error_conversion_display() {
        let err = GenerateError::Conversion {
            group: "alerts".to_string(),
            rule: "High CPU".to_string(),
            source: ConversionError::Unsupported {
                path: "model.datasource".to_string(),
                kind: "null",
            },
        };
        assert_eq!(
            err.to_string(),
            "rule 'High CPU' in group 'alerts' has an unsupported model: cannot convert null value at 'model.datasource'"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn fetch_error_display() {
        let err = FetchError::Status { status: 401 };
        assert_eq!(err.to_string(), "failed with status code: 401");

        assert!(err.source().is_none());

        let cause = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = FetchError::Decode(cause);
        assert_eq!(
            err.to_string(),
            "invalid response body: expected value at line 1 column 1"
        );
        let source = err.source().expect("decode error is kept");
        assert!(source.is::<serde_json::Error>());
    }

    #[test]
    fn write_error_display() {
        let err = WriteError::Io {
            path: PathBuf::from("/readonly/folders.tf"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "failed to write '/readonly/folders.tf': denied");
        assert!(err.source().is_some());
    }
}
