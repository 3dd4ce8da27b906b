use std::sync::Arc;

use crate::ai::InferenceClient;
use crate::core::config::AppConfig;
use crate::core::models::{Summary, SummaryRequest};
use crate::errors::SummaryError;
use crate::summarize::{LsaRanker, Summarizer, SummaryDispatcher, TextRanker};
use crate::transcript::{TranscriptSource, YoutubeTranscriptClient, assemble_transcript};

/// Everything a request needs, built once at startup and shared by reference.
pub struct SummaryApp {
    transcripts: Arc<dyn TranscriptSource>,
    dispatcher: SummaryDispatcher,
}

impl SummaryApp {
    /// Wires the production collaborators from configuration.
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        Self::from_parts(
            Arc::new(YoutubeTranscriptClient::new(config)),
            Arc::new(InferenceClient::new(config)),
            Arc::new(LsaRanker::default()),
        )
    }

    /// Builds the app from explicit collaborators.
    pub fn from_parts(
        transcripts: Arc<dyn TranscriptSource>,
        model: Arc<dyn Summarizer>,
        ranker: Arc<dyn TextRanker>,
    ) -> Self {
        Self {
            transcripts,
            dispatcher: SummaryDispatcher::new(model, ranker),
        }
    }

    /// Fetches the transcript, assembles it and summarizes it.
    ///
    /// # Errors
    ///
    /// `TranscriptUnavailable` if retrieval fails, otherwise whatever the chosen
    /// summarizer reports.
    pub async fn summarize_video(&self, request: &SummaryRequest) -> Result<Summary, SummaryError> {
        let fragments = self
            .transcripts
            .fetch_transcript(&request.video_id)
            .await
            .map_err(|e| match e {
                SummaryError::TranscriptUnavailable { .. } => e,
                other => SummaryError::transcript_unavailable(&request.video_id, other),
            })?;

        let transcript = assemble_transcript(&fragments);
        self.dispatcher.dispatch(&transcript, request.max_length).await
    }
}
