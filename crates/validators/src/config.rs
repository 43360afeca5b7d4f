use serde::{Deserialize, Serialize};

/// Validation knobs.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ValidationConfig {
    /// Maximum distance, in seconds and in either direction, between the
    /// request's date header and the server clock.
    #[serde(default = "default_max_skew_seconds")]
    pub max_skew_seconds: i64,

    /// Maximum decoded size of `application_metadata`.
    #[serde(default = "default_max_metadata_bytes")]
    pub max_metadata_bytes: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_skew_seconds: default_max_skew_seconds(),
            max_metadata_bytes: default_max_metadata_bytes(),
        }
    }
}

fn default_max_skew_seconds() -> i64 {
    300
}

fn default_max_metadata_bytes() -> usize {
    1024 * 1024
}
