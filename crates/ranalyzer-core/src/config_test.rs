use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_app_config_uses_defaults_when_env_is_empty() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_base_url, "http://localhost:8000");
    assert_eq!(cfg.request_timeout_secs, 120);
    assert_eq!(cfg.health_poll_secs, 30);
    assert_eq!(cfg.error_display_secs, 6);
    assert_eq!(cfg.user_agent, "ranalyzer/0.1 (resume-analysis)");
    assert_eq!(cfg.log_level, "info");
}

#[test]
fn build_app_config_base_url_override_strips_trailing_slash() {
    let mut map = HashMap::new();
    map.insert("RANALYZER_API_BASE_URL", "https://resume.example.com/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_base_url, "https://resume.example.com");
}

#[test]
fn build_app_config_rejects_non_http_base_url() {
    for raw in ["localhost:8000", "ftp://host", "http://"] {
        let mut map = HashMap::new();
        map.insert("RANALYZER_API_BASE_URL", raw);
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "RANALYZER_API_BASE_URL"),
            "expected InvalidEnvVar(RANALYZER_API_BASE_URL) for {raw}, got: {result:?}"
        );
    }
}

#[test]
fn build_app_config_request_timeout_override() {
    let mut map = HashMap::new();
    map.insert("RANALYZER_REQUEST_TIMEOUT_SECS", "45");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 45);
    assert_eq!(cfg.request_timeout(), std::time::Duration::from_secs(45));
}

#[test]
fn build_app_config_request_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("RANALYZER_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "RANALYZER_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(RANALYZER_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_poll_interval() {
    let mut map = HashMap::new();
    map.insert("RANALYZER_HEALTH_POLL_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "RANALYZER_HEALTH_POLL_SECS"),
        "expected InvalidEnvVar(RANALYZER_HEALTH_POLL_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_error_display_override() {
    let mut map = HashMap::new();
    map.insert("RANALYZER_ERROR_DISPLAY_SECS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.error_display(), std::time::Duration::from_secs(5));
}

#[test]
fn build_app_config_user_agent_and_log_level_override() {
    let mut map = HashMap::new();
    map.insert("RANALYZER_USER_AGENT", "custom-agent/2.0");
    map.insert("RANALYZER_LOG_LEVEL", "debug");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.user_agent, "custom-agent/2.0");
    assert_eq!(cfg.log_level, "debug");
}
