use std::env;
use std::time::Duration;

pub const DEFAULT_SUMMARIZER_MODEL: &str = "sshleifer/distilbart-cnn-12-6";
pub const DEFAULT_SUMMARIZER_API_URL: &str = "https://api-inference.huggingface.co";
pub const DEFAULT_YOUTUBE_BASE_URL: &str = "https://www.youtube.com";
pub const DEFAULT_TRANSCRIPT_LANGUAGE: &str = "en";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_UPSTREAM_MAX_RETRIES: usize = 3;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub hf_api_token: Option<String>,
    pub summarizer_model: String,
    pub summarizer_api_url: String,
    pub youtube_base_url: String,
    pub transcript_language: String,
    pub http_timeout_secs: u64,
    pub upstream_max_retries: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup, so tests never touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let http_timeout_secs = match non_empty("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| format!("HTTP_TIMEOUT_SECS: {}", e))?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        let upstream_max_retries = match non_empty("UPSTREAM_MAX_RETRIES") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|e| format!("UPSTREAM_MAX_RETRIES: {}", e))?,
            None => DEFAULT_UPSTREAM_MAX_RETRIES,
        };

        Ok(Self {
            hf_api_token: non_empty("HF_API_TOKEN"),
            summarizer_model: non_empty("SUMMARIZER_MODEL")
                .unwrap_or_else(|| DEFAULT_SUMMARIZER_MODEL.to_string()),
            summarizer_api_url: non_empty("SUMMARIZER_API_URL")
                .unwrap_or_else(|| DEFAULT_SUMMARIZER_API_URL.to_string()),
            youtube_base_url: non_empty("YOUTUBE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_YOUTUBE_BASE_URL.to_string()),
            transcript_language: non_empty("TRANSCRIPT_LANGUAGE")
                .unwrap_or_else(|| DEFAULT_TRANSCRIPT_LANGUAGE.to_string()),
            http_timeout_secs,
            upstream_max_retries,
        })
    }

    #[must_use]
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
