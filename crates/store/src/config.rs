use serde::{Deserialize, Serialize};

/// Store behavior knobs.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Seconds a new target spends in the processing state when the creation
    /// request does not supply its own duration.
    #[serde(default = "default_processing_seconds")]
    pub default_processing_seconds: f64,

    /// Whether updating a target picks a fresh tracking rating different
    /// from the previous one. The real backend may keep the rating stable;
    /// this deviation is kept switchable.
    #[serde(default = "default_true")]
    pub rerandomize_rating_on_update: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            default_processing_seconds: default_processing_seconds(),
            rerandomize_rating_on_update: default_true(),
        }
    }
}

fn default_processing_seconds() -> f64 {
    0.5
}

fn default_true() -> bool {
    true
}
