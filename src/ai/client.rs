//! Hosted summarization model client (Hugging Face Inference API).
//!
//! Encapsulates all model API interactions for the abstractive path.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{info, warn};

use crate::core::config::AppConfig;
use crate::errors::SummaryError;
use crate::summarize::Summarizer;

#[derive(Debug, Deserialize)]
struct SummaryOutput {
    summary_text: String,
}

/// Builds the request body for one summarization call.
#[must_use]
pub fn build_request_body(text: &str, max_length: u32) -> Value {
    json!({
        "inputs": text,
        "parameters": { "max_length": max_length },
        "options": { "wait_for_model": true }
    })
}

/// Extracts the summary from a response body.
///
/// The API answers with a one-element array; a bare object is accepted as well.
pub fn parse_summary_response(body: &Value) -> Result<String, SummaryError> {
    let first = match body {
        Value::Array(items) => items.first(),
        Value::Object(_) => Some(body),
        _ => None,
    };

    first
        .cloned()
        .ok_or_else(|| SummaryError::ModelError("Empty response from model".to_string()))
        .and_then(|v| {
            serde_json::from_value::<SummaryOutput>(v).map_err(|e| {
                SummaryError::ModelError(format!("Failed to parse model response: {}", e))
            })
        })
        .map(|out| out.summary_text)
}

fn is_transient(status: StatusCode) -> bool {
    status == StatusCode::SERVICE_UNAVAILABLE
        || status == StatusCode::TOO_MANY_REQUESTS
        || status == StatusCode::BAD_GATEWAY
        || status == StatusCode::GATEWAY_TIMEOUT
}

/// Model API client for generating summaries
pub struct InferenceClient {
    http: Client,
    endpoint: String,
    api_token: Option<String>,
    max_retries: usize,
}

impl InferenceClient {
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        let http = Client::builder()
            .timeout(config.http_timeout())
            .build()
            .unwrap_or_else(|_| Client::new());

        let endpoint = format!(
            "{}/models/{}",
            config.summarizer_api_url.trim_end_matches('/'),
            config.summarizer_model
        );

        Self {
            http,
            endpoint,
            api_token: config.hf_api_token.clone(),
            max_retries: config.upstream_max_retries,
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn request_once(&self, body: &Value) -> Result<String, SummaryError> {
        let mut request = self.http.post(&self.endpoint).json(body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SummaryError::HttpError(format!("Model API request failed: {}", e)))?;

        let status = response.status();
        if is_transient(status) {
            return Err(SummaryError::HttpError(format!(
                "Model API temporarily unavailable: {}",
                status
            )));
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SummaryError::ModelError(format!(
                "Model API error ({}): {}",
                status, error_text
            )));
        }

        let response_json: Value = response.json().await.map_err(|e| {
            SummaryError::ModelError(format!("Failed to parse model response: {}", e))
        })?;

        parse_summary_response(&response_json)
    }
}

#[async_trait]
impl Summarizer for InferenceClient {
    async fn summarize(&self, text: &str, max_length: u32) -> Result<String, SummaryError> {
        info!(
            chars = text.chars().count(),
            max_length, "Requesting model summary"
        );

        let body = build_request_body(text, max_length);
        let strategy = ExponentialBackoff::from_millis(250)
            .map(jitter)
            .take(self.max_retries);

        RetryIf::spawn(
            strategy,
            || self.request_once(&body),
            |e: &SummaryError| {
                let transient = matches!(e, SummaryError::HttpError(_));
                if transient {
                    warn!("Model call failed, retrying: {}", e);
                }
                transient
            },
        )
        .await
    }
}
