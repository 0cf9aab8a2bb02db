//! Grafana ruler API client.
//!
//! Fetches every alert rule visible to the session from
//! `GET {base_url}/api/ruler/grafana/api/v1/rules`. Authentication is the
//! `grafana_session` cookie taken from a logged-in browser.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use migalert::config::{GrafanaConfig, SecretString};
//! use migalert::grafana::GrafanaClient;
//!
//! # async fn example() -> Result<(), migalert::error::FetchError> {
//! let client = GrafanaClient::new(GrafanaConfig {
//!     base_url: "https://my-stack.grafana.net".to_string(),
//!     session: SecretString::new("0a1b2c3d".to_string()),
//!     timeout: Duration::from_secs(30),
//! })?;
//! let folders = client.fetch_rules().await?;
//! # Ok(())
//! # }
//! ```

use reqwest::Client;
use reqwest::header::{ACCEPT, COOKIE};
use tracing::info;

use crate::config::GrafanaConfig;
use crate::error::FetchError;
use crate::model::Folders;

/// Path of the ruler endpoint, relative to the base URL.
pub const RULES_PATH: &str = "api/ruler/grafana/api/v1/rules";

/// Name of the Grafana session cookie.
pub const SESSION_COOKIE: &str = "grafana_session";

/// Client for the Grafana ruler API.
pub struct GrafanaClient {
    config: GrafanaConfig,
    client: Client,
}

impl GrafanaClient {
    /// Create a new client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Request` if the HTTP client cannot be built.
    pub fn new(config: GrafanaConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(FetchError::Request)?;
        Ok(Self { config, client })
    }

    /// Build the full URL of the rules endpoint.
    pub fn rules_url(&self) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            RULES_PATH
        )
    }

    /// Fetch all rule groups, keyed by folder name.
    ///
    /// # Errors
    ///
    /// - `FetchError::Request` if the request cannot be sent or the body read
    /// - `FetchError::Status` if Grafana answers with a non-success status
    /// - `FetchError::Decode` if the body is not the expected JSON shape
    pub async fn fetch_rules(&self) -> Result<Folders, FetchError> {
        let url = self.rules_url();
        info!(url = %url, "Fetching alert rules");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .header(
                COOKIE,
                format!("{}={}", SESSION_COOKIE, self.config.session.expose()),
            )
            .send()
            .await
            .map_err(FetchError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(FetchError::Request)?;
        let folders: Folders = serde_json::from_slice(&body).map_err(FetchError::Decode)?;

        info!(folders = folders.len(), "Fetched alert rules");
        Ok(folders)
    }
}
