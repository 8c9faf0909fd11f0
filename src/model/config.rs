use serde::{Deserialize, Serialize};

use crate::model::item::{ItemPriority, ItemStatus};

/// Configuration from punchlist.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Values used by `add` when the caller leaves them unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default)]
    pub status: ItemStatus,
    #[serde(default)]
    pub priority: ItemPriority,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Max title column width in list output
    #[serde(default = "default_title_width")]
    pub title_width: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            title_width: default_title_width(),
        }
    }
}

fn default_title_width() -> usize {
    48
}
