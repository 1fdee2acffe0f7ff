//! # Kibitz Config
//!
//! Persisted settings for Kibitz: the auto-trigger flag plus the two
//! endpoints everything connects to, in a small TOML file. Absent keys fall
//! back to defaults, and an absent file means all-defaults (auto-trigger on).

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::Settings;
