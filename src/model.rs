//! Grafana ruler API response types.
//!
//! The response of `GET /api/ruler/grafana/api/v1/rules` maps folder names to
//! their rule groups:
//!
//! ```json
//! {"team-a": [{"name": "alerts", "interval": "1m", "rules": [ ... ]}]}
//! ```
//!
//! Collections that the API sends as `null` or omits deserialize as empty.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Provenance of rules created through the provisioning API.
pub const PROVENANCE_API: &str = "api";

/// Folder name to rule groups, iterated in ascending folder name order.
pub type Folders = BTreeMap<String, Vec<RuleGroup>>;

#[derive(Debug, Clone, Deserialize)]
pub struct RuleGroup {
    pub name: String,
    /// Raw evaluation interval, e.g. `1m`.
    pub interval: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rules: Vec<Rule>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Rule {
    #[serde(default)]
    pub expr: String,
    #[serde(rename = "for", default)]
    pub for_duration: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: HashMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub annotations: HashMap<String, String>,
    pub grafana_alert: AlertMetadata,
}

impl Rule {
    /// Whether the rule was created through the provisioning API.
    pub fn is_api_provisioned(&self) -> bool {
        self.grafana_alert.provenance == PROVENANCE_API
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlertMetadata {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "orgId", default)]
    pub org_id: Option<i64>,
    pub title: String,
    pub condition: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<DataQuery>,
    #[serde(default)]
    pub updated: Option<String>,
    #[serde(rename = "intervalSeconds", default)]
    pub interval_seconds: Option<i64>,
    #[serde(default)]
    pub version: Option<i64>,
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub namespace_uid: String,
    #[serde(default)]
    pub rule_group: String,
    #[serde(default)]
    pub no_data_state: String,
    #[serde(default)]
    pub exec_err_state: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub provenance: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataQuery {
    #[serde(rename = "refId")]
    pub ref_id: String,
    #[serde(rename = "queryType", default)]
    pub query_type: String,
    #[serde(rename = "relativeTimeRange", default)]
    pub relative_time_range: RelativeTimeRange,
    #[serde(rename = "datasourceUid", default)]
    pub datasource_uid: String,
    /// Per-datasource query payload, kept untyped.
    #[serde(default, deserialize_with = "null_as_default")]
    pub model: Map<String, Value>,
}

/// Offsets in seconds relative to evaluation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct RelativeTimeRange {
    #[serde(default)]
    pub from: i64,
    #[serde(default)]
    pub to: i64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
