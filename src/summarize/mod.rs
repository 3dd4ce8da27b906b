//! Transcript summarization: a length gate in front of an extractive (LSA) path and an
//! abstractive (external model) path.

pub mod abstractive;
pub mod dispatcher;
pub mod extractive;
pub mod lsa;
pub mod segment;
pub mod stop_words;
pub mod vectorize;

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::SummaryError;

pub use abstractive::ChunkedSummarizer;
pub use dispatcher::{SummaryDispatcher, choose_strategy, word_count};
pub use extractive::ExtractiveSummarizer;
pub use lsa::LsaRanker;

/// Text-to-text summarization model.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str, max_length: u32) -> Result<String, SummaryError>;
}

/// Scores sentences by importance; one score per sentence, in sentence order.
pub trait TextRanker: Send + Sync {
    fn rank(&self, sentences: &[String]) -> Result<Vec<f64>, SummaryError>;
}

#[async_trait]
impl<T: Summarizer + ?Sized> Summarizer for Arc<T> {
    async fn summarize(&self, text: &str, max_length: u32) -> Result<String, SummaryError> {
        (**self).summarize(text, max_length).await
    }
}

impl<T: TextRanker + ?Sized> TextRanker for Arc<T> {
    fn rank(&self, sentences: &[String]) -> Result<Vec<f64>, SummaryError> {
        (**self).rank(sentences)
    }
}
