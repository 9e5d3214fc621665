//! Explorer configuration
//!
//! Every field has a production default; a JSON document or the environment
//! can override individual values.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{ExplorerError, ExplorerResult};
use crate::layout::LayoutConfig;
use crate::value_objects::DisplayType;

pub const ENV_API_URL: &str = "BIZRAY_API_URL";
pub const ENV_API_TIMEOUT: &str = "BIZRAY_API_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Base URL of the company API, without the `/api/v1` prefix
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    /// How long a fetch must be outstanding before the spinner shows
    pub loading_debounce_ms: u64,
    /// Density newly introduced nodes start with
    pub default_display: DisplayType,
    pub highlight_path: bool,
    pub layout: LayoutConfig,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://apibizray.bnbdevelopment.hu".to_string(),
            request_timeout_secs: 30,
            loading_debounce_ms: 500,
            default_display: DisplayType::Standard,
            highlight_path: true,
            layout: LayoutConfig::default(),
        }
    }
}

impl ExplorerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn loading_debounce(&self) -> Duration {
        Duration::from_millis(self.loading_debounce_ms)
    }

    /// Parse a (possibly partial) JSON document
    pub fn from_json_str(json: &str) -> ExplorerResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ExplorerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by `BIZRAY_API_URL` and `BIZRAY_API_TIMEOUT_SECS`
    pub fn from_env() -> ExplorerResult<Self> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> ExplorerResult<Self> {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api_base_url = url;
        }
        if let Some(raw) = lookup(ENV_API_TIMEOUT) {
            self.request_timeout_secs = raw.trim().parse().map_err(|_| {
                ExplorerError::Config(format!("{ENV_API_TIMEOUT} is not a number: {raw}"))
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> ExplorerResult<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(ExplorerError::Config("api_base_url cannot be empty".to_string()));
        }
        if self.default_display == DisplayType::Root {
            return Err(ExplorerError::Config("default_display cannot be root".to_string()));
        }
        let layout = &self.layout;
        if layout.root_radius <= 0.0 || layout.child_radius <= 0.0 {
            return Err(ExplorerError::Config("layout radii must be positive".to_string()));
        }
        if !(0.0..=360.0).contains(&layout.sector_degrees) {
            return Err(ExplorerError::Config("sector_degrees must be within 0..=360".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ExplorerConfig::default();
        assert_eq!(config.loading_debounce(), Duration::from_millis(500));
        assert_eq!(config.layout.sector_degrees, 140.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = ExplorerConfig::from_json_str(
            r#"{"api_base_url": "http://localhost:8000", "layout": {"child_radius": 200.0}}"#,
        )
        .unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.layout.child_radius, 200.0);
        assert_eq!(config.layout.root_radius, 400.0);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        assert!(matches!(
            ExplorerConfig::from_json_str(r#"{"default_display": "root"}"#),
            Err(ExplorerError::Config(_))
        ));
        assert!(matches!(ExplorerConfig::from_json_str("{"), Err(ExplorerError::Config(_))));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> =
            HashMap::from([(ENV_API_URL, "http://api.test"), (ENV_API_TIMEOUT, "5")]);
        let config = ExplorerConfig::default()
            .with_overrides(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.api_base_url, "http://api.test");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));

        let bad = ExplorerConfig::default()
            .with_overrides(|k| (k == ENV_API_TIMEOUT).then(|| "soon".to_string()));
        assert!(bad.is_err());
    }
}
