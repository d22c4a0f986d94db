use std::collections::HashMap;
use std::time::Duration;

use pretty_assertions::assert_eq;
use uploader_engine::{
    ConfigError, UploaderConfig, DEFAULT_ENDPOINT, ENDPOINT_VAR, GATEWAY_VAR, LEGACY_TOKEN_VAR,
    TIMEOUT_VAR, TOKEN_VAR,
};

fn load(vars: &[(&str, &str)]) -> Result<UploaderConfig, ConfigError> {
    let env: HashMap<String, String> = vars
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    UploaderConfig::from_lookup(|key| env.get(key).cloned())
}

#[test]
fn defaults_apply_when_only_token_is_set() {
    let config = load(&[(TOKEN_VAR, "tok")]).unwrap();

    assert_eq!(config.token, "tok");
    assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(config.gateway_host, "dweb.link");
    assert_eq!(config.request_timeout, Duration::from_secs(300));
}

#[test]
fn missing_or_blank_token_is_an_error() {
    assert_eq!(load(&[]), Err(ConfigError::MissingToken));
    assert_eq!(load(&[(TOKEN_VAR, "   ")]), Err(ConfigError::MissingToken));
}

#[test]
fn legacy_token_variable_is_a_fallback() {
    let config = load(&[(LEGACY_TOKEN_VAR, "old")]).unwrap();
    assert_eq!(config.token, "old");

    let config = load(&[(LEGACY_TOKEN_VAR, "old"), (TOKEN_VAR, "new")]).unwrap();
    assert_eq!(config.token, "new");
}

#[test]
fn overrides_are_read() {
    let config = load(&[
        (TOKEN_VAR, "tok"),
        (ENDPOINT_VAR, "http://localhost:9000"),
        (GATEWAY_VAR, "w3s.link"),
        (TIMEOUT_VAR, "42"),
    ])
    .unwrap();

    assert_eq!(config.endpoint, "http://localhost:9000");
    assert_eq!(config.gateway_host, "w3s.link");
    assert_eq!(config.request_timeout, Duration::from_secs(42));

    let settings = config.client_settings();
    assert_eq!(settings.endpoint, "http://localhost:9000");
    assert_eq!(settings.token, "tok");
    assert_eq!(settings.request_timeout, Duration::from_secs(42));
}

#[test]
fn invalid_timeout_is_rejected() {
    assert_eq!(
        load(&[(TOKEN_VAR, "tok"), (TIMEOUT_VAR, "soon")]),
        Err(ConfigError::InvalidTimeout("soon".to_string()))
    );
    assert_eq!(
        load(&[(TOKEN_VAR, "tok"), (TIMEOUT_VAR, "0")]),
        Err(ConfigError::InvalidTimeout("0".to_string()))
    );
}

#[test]
fn debug_output_hides_token() {
    let config = load(&[(TOKEN_VAR, "super-secret")]).unwrap();
    let debug = format!("{config:?}");

    assert!(!debug.contains("super-secret"));
    assert!(debug.contains("<redacted>"));
}
