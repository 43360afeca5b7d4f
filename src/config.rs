use serde::{Deserialize, Serialize};
use store::StoreConfig;
use validators::ValidationConfig;

/// Combined emulator configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MockConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
}
