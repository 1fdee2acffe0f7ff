//! Configuration errors.

use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read or write the settings file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file is not valid TOML.
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Settings could not be serialized.
    #[error("serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// No user configuration directory on this platform.
    #[error("no user config directory available")]
    NoConfigDir,
}
