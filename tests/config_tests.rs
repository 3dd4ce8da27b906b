use std::collections::HashMap;
use std::time::Duration;

use yt_tldr::core::config::{
    AppConfig, DEFAULT_SUMMARIZER_API_URL, DEFAULT_SUMMARIZER_MODEL, DEFAULT_YOUTUBE_BASE_URL,
};

fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig, String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    AppConfig::from_lookup(|key| map.get(key).cloned())
}

#[test]
fn test_defaults_when_nothing_is_set() {
    let config = config_from(&[]).unwrap();
    assert_eq!(config.hf_api_token, None);
    assert_eq!(config.summarizer_model, DEFAULT_SUMMARIZER_MODEL);
    assert_eq!(config.summarizer_api_url, DEFAULT_SUMMARIZER_API_URL);
    assert_eq!(config.youtube_base_url, DEFAULT_YOUTUBE_BASE_URL);
    assert_eq!(config.transcript_language, "en");
    assert_eq!(config.http_timeout(), Duration::from_secs(60));
    assert_eq!(config.upstream_max_retries, 3);
}

#[test]
fn test_values_are_read_from_lookup() {
    let config = config_from(&[
        ("HF_API_TOKEN", "hf_secret"),
        ("SUMMARIZER_MODEL", "facebook/bart-large-cnn"),
        ("TRANSCRIPT_LANGUAGE", "de"),
        ("HTTP_TIMEOUT_SECS", "15"),
        ("UPSTREAM_MAX_RETRIES", "0"),
    ])
    .unwrap();
    assert_eq!(config.hf_api_token.as_deref(), Some("hf_secret"));
    assert_eq!(config.summarizer_model, "facebook/bart-large-cnn");
    assert_eq!(config.transcript_language, "de");
    assert_eq!(config.http_timeout(), Duration::from_secs(15));
    assert_eq!(config.upstream_max_retries, 0);
}

#[test]
fn test_blank_values_fall_back_to_defaults() {
    let config = config_from(&[("HF_API_TOKEN", "  "), ("SUMMARIZER_MODEL", "")]).unwrap();
    assert_eq!(config.hf_api_token, None);
    assert_eq!(config.summarizer_model, DEFAULT_SUMMARIZER_MODEL);
}

#[test]
fn test_bad_numbers_name_the_variable() {
    let err = config_from(&[("HTTP_TIMEOUT_SECS", "soon")]).unwrap_err();
    assert!(err.starts_with("HTTP_TIMEOUT_SECS"));

    let err = config_from(&[("UPSTREAM_MAX_RETRIES", "-1")]).unwrap_err();
    assert!(err.starts_with("UPSTREAM_MAX_RETRIES"));
}
