//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use url::Url;
use crate::models::user::OAuthProvider;
use crate::utils::errors::{EventicHubError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_backend_config(&settings.backend)?;
    validate_auth_config(&settings.auth)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate backend configuration
fn validate_backend_config(config: &super::BackendConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(EventicHubError::Config(
            "Backend URL is required".to_string()
        ));
    }

    let url = Url::parse(&config.url)
        .map_err(|e| EventicHubError::Config(format!("Invalid backend URL '{}': {}", config.url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(EventicHubError::Config(
            format!("Backend URL must use http or https, got '{}'", url.scheme())
        ));
    }

    if config.anon_key.is_empty() {
        return Err(EventicHubError::Config(
            "Backend anon key is required".to_string()
        ));
    }

    if config.request_timeout_seconds == Some(0) {
        return Err(EventicHubError::Config(
            "Request timeout must be greater than 0 when set".to_string()
        ));
    }

    Ok(())
}

/// Validate authentication configuration
fn validate_auth_config(config: &super::AuthConfig) -> Result<()> {
    Url::parse(&config.redirect_url)
        .map_err(|e| EventicHubError::Config(format!("Invalid OAuth redirect URL '{}': {}", config.redirect_url, e)))?;

    config.default_oauth_provider.parse::<OAuthProvider>()
        .map_err(EventicHubError::Config)?;

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(EventicHubError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(EventicHubError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
