//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::path::Path;
use serde::{Deserialize, Serialize};

/// Prefix for environment variable overrides, e.g. `EVENTICHUB__BACKEND__URL`
pub const ENV_PREFIX: &str = "EVENTICHUB";

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub backend: BackendConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

/// Hosted backend connection
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Project URL; auth lives under `/auth/v1` and tables under `/rest/v1`
    pub url: String,
    /// Public API key sent with every request
    pub anon_key: String,
    /// No timeout is applied when unset
    #[serde(default)]
    pub request_timeout_seconds: Option<u64>,
}

/// Authentication flow configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Where the OAuth provider sends the browser back to
    pub redirect_url: String,
    pub default_oauth_provider: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for daily-rolling log files; console only when unset
    #[serde(default)]
    pub file_path: Option<String>,
}

impl Settings {
    /// Load settings from `config.toml` (if present) and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::load(None)
    }

    /// Load settings from an explicit file, layered under environment variables
    pub fn from_file(path: &Path) -> Result<Self, config::ConfigError> {
        Self::load(Some(path))
    }

    fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let defaults = config::Config::try_from(&Settings::default())?;

        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::EventicHubError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend: BackendConfig {
                url: "http://localhost:54321".to_string(),
                anon_key: String::new(),
                request_timeout_seconds: None,
            },
            auth: AuthConfig {
                redirect_url: "http://localhost:3000/auth/callback".to_string(),
                default_oauth_provider: "google".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[backend]
url = "https://project.example.co"
anon_key = "public-anon-key"
request_timeout_seconds = 15

[logging]
level = "debug"
"#
        )
        .unwrap();

        let settings = Settings::from_file(file.path()).unwrap();

        assert_eq!(settings.backend.url, "https://project.example.co");
        assert_eq!(settings.backend.anon_key, "public-anon-key");
        assert_eq!(settings.backend.request_timeout_seconds, Some(15));
        assert_eq!(settings.logging.level, "debug");
        // untouched sections keep their defaults
        assert_eq!(settings.auth.default_oauth_provider, "google");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = Settings::from_file(Path::new("/definitely/not/here/eventichub.toml"));
        assert!(result.is_err());
    }
}
