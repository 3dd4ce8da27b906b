use serde::{Deserialize, Serialize};

/// Summary length forwarded to the abstractive model when the request omits `max_length`.
pub const DEFAULT_MAX_LENGTH: u32 = 150;

/// One timed caption line as returned by transcript retrieval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionFragment {
    pub text: String,
    #[serde(default)]
    pub start: f64,
    #[serde(default)]
    pub duration: f64,
}

impl CaptionFragment {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            start: 0.0,
            duration: 0.0,
        }
    }
}

/// A validated inbound `GET /summary` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRequest {
    pub video_id: String,
    pub max_length: u32,
}

/// Which summarizer the dispatcher routed a transcript to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Extractive,
    Abstractive,
}

/// Summary text together with the path that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub strategy: Strategy,
    pub text: String,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Extractive => write!(f, "extractive"),
            Strategy::Abstractive => write!(f, "abstractive"),
        }
    }
}
