use crate::app_config::AppConfig;
use crate::constants::{DEFAULT_API_BASE_URL, ERROR_DISPLAY_SECS, HEALTH_POLL_INTERVAL_SECS};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; missing ones take their defaults.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: u64| -> Result<u64, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Ok(default),
        }
    };

    let api_base_url = parse_base_url(&or_default("RANALYZER_API_BASE_URL", DEFAULT_API_BASE_URL))?;
    let request_timeout_secs = parse_u64("RANALYZER_REQUEST_TIMEOUT_SECS", 120)?;
    let health_poll_secs = parse_u64("RANALYZER_HEALTH_POLL_SECS", HEALTH_POLL_INTERVAL_SECS)?;
    let error_display_secs = parse_u64("RANALYZER_ERROR_DISPLAY_SECS", ERROR_DISPLAY_SECS)?;
    let user_agent = or_default("RANALYZER_USER_AGENT", "ranalyzer/0.1 (resume-analysis)");
    let log_level = or_default("RANALYZER_LOG_LEVEL", "info");

    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "RANALYZER_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    if health_poll_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "RANALYZER_HEALTH_POLL_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(AppConfig {
        api_base_url,
        request_timeout_secs,
        health_poll_secs,
        error_display_secs,
        user_agent,
        log_level,
    })
}

/// Accepts `http://` and `https://` addresses with a host, without a trailing slash.
fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let host = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"));

    match host {
        Some(host) if !host.is_empty() => Ok(trimmed.to_string()),
        _ => Err(ConfigError::InvalidEnvVar {
            var: "RANALYZER_API_BASE_URL".to_string(),
            reason: format!("expected an http(s) URL, got '{raw}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
