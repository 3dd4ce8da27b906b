use std::sync::Arc;

use tracing::info;

use super::{ChunkedSummarizer, ExtractiveSummarizer, Summarizer, TextRanker};
use crate::core::models::{Strategy, Summary};
use crate::errors::SummaryError;

/// Transcripts with more words than this go to the extractive path.
pub const EXTRACTIVE_WORD_THRESHOLD: usize = 3000;

/// Whitespace-delimited token count.
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Extractive strictly above [`EXTRACTIVE_WORD_THRESHOLD`] words, abstractive otherwise.
#[must_use]
pub fn choose_strategy(transcript: &str) -> Strategy {
    if word_count(transcript) > EXTRACTIVE_WORD_THRESHOLD {
        Strategy::Extractive
    } else {
        Strategy::Abstractive
    }
}

/// Routes each transcript to exactly one summarizer and passes its error through untouched.
pub struct SummaryDispatcher {
    abstractive: ChunkedSummarizer<Arc<dyn Summarizer>>,
    extractive: ExtractiveSummarizer<Arc<dyn TextRanker>>,
}

impl SummaryDispatcher {
    pub fn new(model: Arc<dyn Summarizer>, ranker: Arc<dyn TextRanker>) -> Self {
        Self {
            abstractive: ChunkedSummarizer::new(model),
            extractive: ExtractiveSummarizer::new(ranker),
        }
    }

    /// # Errors
    ///
    /// Whatever the selected summarizer fails with.
    pub async fn dispatch(&self, transcript: &str, max_length: u32) -> Result<Summary, SummaryError> {
        let strategy = choose_strategy(transcript);
        info!(%strategy, words = word_count(transcript), "Dispatching transcript");

        let text = match strategy {
            Strategy::Extractive => {
                // CPU-bound; keep it off the async workers.
                let extractive = self.extractive.clone();
                let transcript = transcript.to_string();
                tokio::task::spawn_blocking(move || extractive.summarize(&transcript))
                    .await
                    .map_err(|e| SummaryError::NumericFailure(format!("ranking task failed: {e}")))??
            }
            Strategy::Abstractive => self.abstractive.summarize(transcript, max_length).await?,
        };

        Ok(Summary { strategy, text })
    }
}
