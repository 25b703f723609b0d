//! Caller-facing logging settings.

use serde::{Deserialize, Serialize};

/// Caller-facing logging settings, as read from flags, files, or the environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingSettings {
    /// Level name: debug, info, warn, error, fatal (any case)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON records instead of console text
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
