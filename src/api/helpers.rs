//! Response builders for the API handler.
//!
//! Every response is an API Gateway proxy payload with a plain-text body.

use serde_json::{Value, json};

use crate::errors::SummaryError;

/// Fixed body returned whenever transcript retrieval fails, whatever the cause.
pub const NO_SUBTITLES_MESSAGE: &str = "No subtitles available for this video";

const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Returns a plain-text response with the given status code.
#[must_use]
pub fn text_response(status_code: u16, body: &str) -> Value {
    json!({
        "statusCode": status_code,
        "headers": { "Content-Type": TEXT_CONTENT_TYPE },
        "body": body
    })
}

/// Returns a 200 OK response carrying the summary.
#[must_use]
pub fn ok_text(body: &str) -> Value {
    text_response(200, body)
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status_code: u16, message: &str) -> Value {
    text_response(status_code, message)
}

/// Maps a summarization failure onto its response.
///
/// Retrieval failures always produce the fixed 404 body; the underlying reason is
/// left to the logs.
#[must_use]
pub fn error_response(error: &SummaryError) -> Value {
    match error {
        SummaryError::TranscriptUnavailable { .. } => {
            err_response(error.status_code(), NO_SUBTITLES_MESSAGE)
        }
        other => err_response(other.status_code(), &other.to_string()),
    }
}
