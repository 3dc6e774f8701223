//! Configuration file loading.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;
use update_noti_common::{AllowList, Error, Result};

/// Installation directory of the deployed binary.
pub const INSTALL_DIR: &str = "/opt/update-noti";

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "/opt/update-noti/config.json";

/// Markers that identify an unfilled webhook template.
const PLACEHOLDER_MARKERS: &[&str] = &["YOUR", "XXXX", "<", ">", "CHANGE_ME"];

/// Contents of `config.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub slack_webhook: String,
    pub auto_update: Vec<String>,
    pub telemetry: Telemetry,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global: Option<Global>,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Telemetry {
    pub log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<String>,
}

impl Default for Telemetry {
    fn default() -> Self {
        Self {
            log_level: "INFO".to_string(),
            log_file: None,
        }
    }
}

/// Settings shared by several tools on the same host.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Global {
    pub slack: GlobalSlack,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalSlack {
    pub default_webhook: String,
}

impl Config {
    /// Load and parse the configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from {:?}", path);
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let mut config: Config = serde_json::from_str(content)?;
        if config.telemetry.log_level.trim().is_empty() {
            config.telemetry.log_level = Telemetry::default().log_level;
        }
        Ok(config)
    }

    /// Packages allowed to be upgraded automatically.
    pub fn allow_list(&self) -> AllowList {
        AllowList::new(self.auto_update.iter().map(|s| s.trim()).filter(|s| !s.is_empty()))
    }

    /// Webhook to deliver reports to, or `None` when notifications are disabled.
    ///
    /// `slack_webhook` wins over `global.slack.default_webhook`; blank or
    /// template values count as not configured.
    pub fn webhook(&self) -> Option<&str> {
        let global = self
            .global
            .as_ref()
            .map(|g| g.slack.default_webhook.trim())
            .unwrap_or_default();
        let chosen = match self.slack_webhook.trim() {
            "" => global,
            own => own,
        };
        (!is_placeholder_webhook(chosen)).then_some(chosen)
    }
}

/// Whether `url` is missing, malformed or an unfilled template.
pub fn is_placeholder_webhook(url: &str) -> bool {
    let url = url.trim();
    if url.is_empty() || PLACEHOLDER_MARKERS.iter().any(|m| url.contains(m)) {
        return true;
    }
    match reqwest::Url::parse(url) {
        Ok(parsed) => !matches!(parsed.scheme(), "http" | "https") || parsed.host().is_none(),
        Err(_) => true,
    }
}
