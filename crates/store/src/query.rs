//! Query request options and match results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How much target detail a query response carries per match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncludeTargetData {
    /// No `target_data` on any match.
    None,
    /// `target_data` on the first match only.
    #[default]
    Top,
    /// `target_data` on every match.
    All,
}

/// Options accepted by the query operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryOptions {
    #[serde(default = "default_max_num_results")]
    pub max_num_results: usize,
    #[serde(default)]
    pub include_target_data: IncludeTargetData,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            max_num_results: default_max_num_results(),
            include_target_data: IncludeTargetData::default(),
        }
    }
}

fn default_max_num_results() -> usize {
    1
}

/// Detail block attached to a match when `include_target_data` allows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetData {
    pub target_timestamp: DateTime<Utc>,
    pub name: String,
    pub application_metadata: Option<String>,
}

/// A single query match, in target evaluation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryMatch {
    pub target_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_data: Option<TargetData>,
}
