//! API Lambda handler for `GET /summary`.
//!
//! This module handles:
//! - Routing (path and method checks)
//! - Query validation (`url`, `max_length`)
//! - Mapping summarization outcomes onto status codes

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::{helpers, parsing};
use crate::app::SummaryApp;
use crate::errors::SummaryError;

pub use self::function_handler as handler;

const SUMMARY_ROUTE: &str = "/summary";

fn is_summary_path(path: &str) -> bool {
    path.trim_end_matches('/').ends_with(SUMMARY_ROUTE)
}

/// Lambda handler for the API entrypoint.
///
/// # Errors
///
/// Never fails on bad input; every outcome becomes a response payload. The `Result`
/// is what the Lambda runtime expects.
#[tracing::instrument(level = "info", skip(app, event), fields(request_id = %Uuid::new_v4()))]
pub async fn function_handler(
    app: &SummaryApp,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    Ok(handle_request(app, &event.payload).await)
}

/// Produces the response payload for one API Gateway event.
pub async fn handle_request(app: &SummaryApp, payload: &Value) -> Value {
    let path = parsing::request_path(payload);
    let method = parsing::request_method(payload).unwrap_or("GET");
    info!(path = path.unwrap_or(""), method, "API Lambda received request");

    // ========================================================================
    // Routing
    // ========================================================================

    if let Some(path) = path
        && !is_summary_path(path)
    {
        warn!(path, "Unknown route");
        return helpers::err_response(404, "Not Found");
    }

    if !method.eq_ignore_ascii_case("GET") {
        warn!(method, "Method not allowed");
        return helpers::err_response(405, "Method Not Allowed");
    }

    // ========================================================================
    // Query validation
    // ========================================================================

    let request = match parsing::parse_summary_request(payload) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected request: {}", e);
            return helpers::error_response(&e);
        }
    };

    info!(
        video_id = %request.video_id,
        max_length = request.max_length,
        "Summarizing video"
    );

    // ========================================================================
    // Summarize
    // ========================================================================

    match app.summarize_video(&request).await {
        Ok(summary) => {
            info!(
                strategy = %summary.strategy,
                chars = summary.text.chars().count(),
                "Summary generated"
            );
            helpers::ok_text(&summary.text)
        }
        Err(e) => {
            match &e {
                SummaryError::TranscriptUnavailable { video_id, reason } => {
                    warn!(video_id = %video_id, reason = %reason, "Transcript retrieval failed");
                }
                other => error!("Failed to generate summary: {}", other),
            }
            helpers::error_response(&e)
        }
    }
}
