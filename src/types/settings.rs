use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level settings container for the browser chrome features.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChromeSettings {
    #[serde(default)]
    pub permissions: PermissionSettings,
    #[serde(default)]
    pub link_highlighter: LinkHighlighterSettings,
    #[serde(default)]
    pub security_report: SecurityReportSettings,
}

/// Permission review settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PermissionSettings {
    /// Pause before a queued dialog replaces the previous one.
    pub dialog_delay_ms: u64,
    /// Persist decisions per site so the same origin is not asked twice.
    pub remember_decisions: bool,
}

impl PermissionSettings {
    pub fn dialog_delay(&self) -> Duration {
        Duration::from_millis(self.dialog_delay_ms)
    }
}

impl Default for PermissionSettings {
    fn default() -> Self {
        Self {
            dialog_delay_ms: 100,
            remember_decisions: true,
        }
    }
}

/// Link safety coloring settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LinkHighlighterSettings {
    pub enabled: bool,
    pub analysis_endpoint: String,
}

impl Default for LinkHighlighterSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            analysis_endpoint: "http://127.0.0.1:8009".to_string(),
        }
    }
}

/// Security report panel settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SecurityReportSettings {
    pub request_timeout_secs: u64,
}

impl Default for SecurityReportSettings {
    fn default() -> Self {
        Self {
            request_timeout_secs: 15,
        }
    }
}
