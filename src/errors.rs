use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("Malformed video url: {0}")]
    MalformedUrl(String),

    #[error("Invalid request parameter: {0}")]
    InvalidParameter(String),

    #[error("Transcript unavailable for video {video_id}: {reason}")]
    TranscriptUnavailable { video_id: String, reason: String },

    #[error("Transcript contains no sentences to summarize")]
    EmptyInput,

    #[error("Transcript has no usable vocabulary after stop-word removal")]
    DegenerateInput,

    #[error("Failed to rank sentences: {0}")]
    NumericFailure(String),

    #[error("Failed to access summarization model: {0}")]
    ModelError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),
}

impl SummaryError {
    /// Wraps any retrieval failure for `video_id`; the reason is kept for logs only.
    pub fn transcript_unavailable(video_id: &str, reason: impl std::fmt::Display) -> Self {
        SummaryError::TranscriptUnavailable {
            video_id: video_id.to_string(),
            reason: reason.to_string(),
        }
    }

    /// HTTP status code the request handler answers with for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            SummaryError::MalformedUrl(_) | SummaryError::InvalidParameter(_) => 400,
            SummaryError::TranscriptUnavailable { .. } => 404,
            SummaryError::EmptyInput | SummaryError::DegenerateInput => 422,
            SummaryError::NumericFailure(_) => 500,
            SummaryError::ModelError(_) | SummaryError::HttpError(_) => 502,
        }
    }
}

impl From<reqwest::Error> for SummaryError {
    fn from(error: reqwest::Error) -> Self {
        SummaryError::HttpError(error.to_string())
    }
}
