//! CLI configuration utilities

use anyhow::Result;
use cockpit_core::Settings;
use std::path::{Path, PathBuf};

/// Command line values that take precedence over file and environment
#[derive(Debug, Default)]
pub struct Overrides {
    pub server: Option<String>,
    pub state_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

/// Load settings, then apply command line overrides and validate again
pub fn load_settings(path: Option<&Path>, overrides: Overrides) -> Result<Settings> {
    let mut settings = Settings::load(path)?;

    if let Some(server) = overrides.server {
        settings.server.base_url = server;
    }
    if let Some(dir) = overrides.state_dir {
        settings.storage.state_dir = Some(dir);
    }
    if let Some(level) = overrides.log_level {
        settings.logging.level = level;
    }

    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_overrides_win_over_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nbase_url = \"http://files.example:9000\"\ntimeout_secs = 5"
        )
        .unwrap();

        let settings = load_settings(
            Some(file.path()),
            Overrides {
                server: Some("https://cockpit.example".to_string()),
                state_dir: Some(PathBuf::from("/tmp/cockpit-state")),
                log_level: None,
            },
        )
        .unwrap();

        assert_eq!(settings.server.base_url, "https://cockpit.example");
        assert_eq!(settings.server.timeout_secs, 5);
        assert_eq!(settings.api_base(), "https://cockpit.example/api");
        assert_eq!(
            settings.storage.resolve_state_dir(),
            PathBuf::from("/tmp/cockpit-state")
        );
    }

    #[test]
    fn test_invalid_server_override_is_rejected() {
        let result = load_settings(
            None,
            Overrides {
                server: Some("ftp://nope".to_string()),
                ..Default::default()
            },
        );
        assert!(result.is_err());
    }
}
