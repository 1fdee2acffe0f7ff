//! Settings schema and load/save.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

/// Persisted Kibitz settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Request analysis automatically when a finished game page loads.
    pub auto_trigger: bool,
    /// Browser remote debugging endpoint.
    pub endpoint: String,
    /// Base URL of the chess site.
    pub site: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_trigger: default_auto_trigger(),
            endpoint: default_endpoint(),
            site: default_site(),
        }
    }
}

fn default_auto_trigger() -> bool {
    true
}

fn default_endpoint() -> String {
    "http://127.0.0.1:9222".to_string()
}

fn default_site() -> String {
    "https://lichess.org".to_string()
}

impl Settings {
    /// Default settings file location (`<config dir>/kibitz/config.toml`).
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join("kibitz").join("config.toml"))
    }

    /// Load settings from a TOML file. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(content) => {
                let settings: Settings = toml::from_str(&content)?;
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no settings file at {}, using defaults", path.display());
                Ok(Settings::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Write settings to a TOML file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        debug!("saved settings to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.auto_trigger);
        assert_eq!(settings.endpoint, "http://127.0.0.1:9222");
        assert_eq!(settings.site, "https://lichess.org");
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_absent_keys_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "auto_trigger = false\n").unwrap();

        let settings = Settings::load(&path).unwrap();
        assert!(!settings.auto_trigger);
        assert_eq!(settings.site, "https://lichess.org");
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.toml");

        let settings = Settings {
            auto_trigger: false,
            endpoint: "http://127.0.0.1:9333".to_string(),
            site: "https://example.org".to_string(),
        };
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "auto_trigger = \"maybe").unwrap();

        assert!(matches!(
            Settings::load(&path),
            Err(ConfigError::Parse(_))
        ));
    }
}
