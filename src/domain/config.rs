//! Run configuration.
//!
//! Values are layered: built-in defaults, then the environment (a `.env` file
//! is loaded first via `dotenvy`), then CLI overrides applied by `app`.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_BASE_URL: &str = "https://web-api.tp.entsoe.eu/api";
/// "Actual total load" document.
pub const DOCUMENT_TYPE_ACTUAL_TOTAL_LOAD: &str = "A65";
/// "Realised" process.
pub const PROCESS_TYPE_REALISED: &str = "A16";
pub const DEFAULT_ZONE: &str = "NL";
pub const DEFAULT_WINDOW_HOURS: i64 = 24;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_OUTPUT_PATH: &str = "data/raw/entsoe_load.csv";

pub const ENV_API_KEY: &str = "ENTSOE_API_KEY";
pub const ENV_BASE_URL: &str = "ENTSOE_BASE_URL";
pub const ENV_ZONE: &str = "ENTSOE_ZONE";

#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Optional here; its absence only fails once a fetch is attempted.
    pub api_key: Option<String>,
    pub base_url: String,
    pub document_type: String,
    pub process_type: String,
    pub zone: String,
    pub window_hours: i64,
    pub timeout: Duration,
    pub output_path: PathBuf,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            document_type: DOCUMENT_TYPE_ACTUAL_TOTAL_LOAD.to_string(),
            process_type: PROCESS_TYPE_REALISED.to_string(),
            zone: DEFAULT_ZONE.to_string(),
            window_hours: DEFAULT_WINDOW_HOURS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

impl IngestConfig {
    /// Defaults overlaid with `ENTSOE_*` variables from the process environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`IngestConfig::from_env`] but reading from an arbitrary source.
    ///
    /// Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut config = Self::default();
        config.api_key = get(ENV_API_KEY);
        if let Some(url) = get(ENV_BASE_URL) {
            config.base_url = url;
        }
        if let Some(zone) = get(ENV_ZONE) {
            config.zone = zone;
        }
        config
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.zone.trim().is_empty() {
            return Err(AppError::Config("zone must not be empty".into()));
        }
        if self.window_hours <= 0 {
            return Err(AppError::Config(format!(
                "window must be a positive number of hours, got {}",
                self.window_hours
            )));
        }
        if self.timeout.is_zero() {
            return Err(AppError::Config("timeout must be > 0 seconds".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn lookup_overrides_defaults_and_ignores_blanks() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_API_KEY, "secret"),
            (ENV_ZONE, "  "),
            (ENV_BASE_URL, "http://127.0.0.1:9000/api"),
        ]);
        let config = IngestConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.zone, DEFAULT_ZONE);
        assert_eq!(config.base_url, "http://127.0.0.1:9000/api");
        assert_eq!(config.document_type, "A65");
        assert_eq!(config.process_type, "A16");
    }

    #[test]
    fn missing_key_is_not_a_config_error() {
        let config = IngestConfig::from_lookup(|_| None);
        assert!(config.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_window() {
        let config = IngestConfig {
            window_hours: 0,
            ..IngestConfig::default()
        };
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }
}
