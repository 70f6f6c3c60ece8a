//! Configuration management for the cockpit console

use crate::{CoreError, CoreResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Path prefix the backend mounts every admin endpoint under
pub const API_PREFIX: &str = "/api";

/// Default request ceiling for both HTTP clients
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
const ENV_PREFIX: &str = "COCKPIT";

/// Main console configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Backend connection settings
    pub server: ServerSettings,

    /// Durable storage location
    #[serde(default)]
    pub storage: StorageSettings,

    /// Log filter settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Origin of the backend, without the `/api` prefix
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Durable storage settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Directory holding `storage.json`; platform data dir when unset
    #[serde(default)]
    pub state_dir: Option<PathBuf>,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Filter used when `RUST_LOG` is not set
    pub level: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from defaults, an optional file and `COCKPIT_*` variables
    ///
    /// Nested keys use a double underscore, e.g. `COCKPIT_SERVER__BASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a value fails to parse
    pub fn load(path: Option<&Path>) -> CoreResult<Self> {
        let defaults = Self::default();

        let mut builder = config::Config::builder()
            .set_default("server.base_url", defaults.server.base_url)?
            .set_default("server.timeout_secs", defaults.server.timeout_secs)?
            .set_default("logging.level", defaults.logging.level)?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        let settings: Self = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Check values that deserialization alone cannot catch
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed base URL or a zero timeout
    pub fn validate(&self) -> CoreResult<()> {
        let url = Url::parse(&self.server.base_url).map_err(|e| {
            CoreError::invalid_config(format!("server.base_url '{}': {e}", self.server.base_url))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(CoreError::invalid_config(format!(
                "server.base_url must be http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.server.timeout_secs == 0 {
            return Err(CoreError::invalid_config(
                "server.timeout_secs must be greater than zero",
            ));
        }

        Ok(())
    }

    /// Root URL every API path is appended to
    pub fn api_base(&self) -> String {
        format!("{}{API_PREFIX}", self.server.base_url.trim_end_matches('/'))
    }

    /// Request timeout
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.server.timeout_secs)
    }
}

impl StorageSettings {
    /// Directory for durable state
    pub fn resolve_state_dir(&self) -> PathBuf {
        if let Some(dir) = &self.state_dir {
            return dir.clone();
        }

        ProjectDirs::from("ai", "Agent", "cockpit").map_or_else(
            || {
                tracing::warn!("Failed to determine platform data directory, using ./.cockpit");
                PathBuf::from("./.cockpit")
            },
            |dirs| dirs.data_dir().to_path_buf(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.timeout(), Duration::from_secs(30));
        assert_eq!(settings.api_base(), "http://127.0.0.1:8000/api");
    }

    #[test]
    fn test_api_base_trims_trailing_slash() {
        let mut settings = Settings::default();
        settings.server.base_url = "https://admin.example.com/".to_string();
        assert_eq!(settings.api_base(), "https://admin.example.com/api");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nbase_url = \"http://10.0.0.2:9000\"\ntimeout_secs = 5\n\n[storage]\nstate_dir = \"/tmp/cockpit-state\""
        )
        .unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.server.base_url, "http://10.0.0.2:9000");
        assert_eq!(settings.server.timeout_secs, 5);
        assert_eq!(
            settings.storage.resolve_state_dir(),
            PathBuf::from("/tmp/cockpit-state")
        );
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let mut settings = Settings::default();
        settings.server.base_url = "not a url".to_string();
        assert!(matches!(
            settings.validate(),
            Err(CoreError::InvalidConfig { .. })
        ));

        settings.server.base_url = "ftp://example.com".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut settings = Settings::default();
        settings.server.timeout_secs = 0;
        assert!(settings.validate().is_err());
    }
}
