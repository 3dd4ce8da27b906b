use async_trait::async_trait;
use tracing::info;

use super::Summarizer;
use crate::errors::SummaryError;

/// Window size, in characters, of each piece forwarded to the model.
pub const CHUNK_CHARS: usize = 1000;

/// Splits `text` into consecutive windows of `chunk_chars` characters; the last may be
/// shorter. Never splits inside a UTF-8 sequence and never yields an empty window.
#[must_use]
pub fn chunk_text(text: &str, chunk_chars: usize) -> Vec<&str> {
    let chunk_chars = chunk_chars.max(1);
    let mut chunks = Vec::new();
    let mut start = 0;

    for (count, (idx, _)) in text.char_indices().enumerate() {
        if count > 0 && count % chunk_chars == 0 {
            chunks.push(&text[start..idx]);
            start = idx;
        }
    }
    if start < text.len() {
        chunks.push(&text[start..]);
    }

    chunks
}

/// Runs a model over fixed-size windows and concatenates the per-window summaries in
/// window order. No merging across windows.
#[derive(Debug, Clone)]
pub struct ChunkedSummarizer<S> {
    model: S,
    chunk_chars: usize,
}

impl<S: Summarizer> ChunkedSummarizer<S> {
    pub fn new(model: S) -> Self {
        Self::with_chunk_size(model, CHUNK_CHARS)
    }

    pub fn with_chunk_size(model: S, chunk_chars: usize) -> Self {
        Self {
            model,
            chunk_chars: chunk_chars.max(1),
        }
    }
}

#[async_trait]
impl<S: Summarizer> Summarizer for ChunkedSummarizer<S> {
    async fn summarize(&self, text: &str, max_length: u32) -> Result<String, SummaryError> {
        if text.trim().is_empty() {
            return Err(SummaryError::EmptyInput);
        }

        let chunks = chunk_text(text, self.chunk_chars);
        info!(chunks = chunks.len(), max_length, "Abstractive summary requested");

        let mut parts = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            #[cfg(feature = "debug-logs")]
            tracing::debug!("Forwarding chunk to model:\n{}", chunk);

            let summary = self.model.summarize(chunk, max_length).await?;
            let summary = summary.trim();
            if !summary.is_empty() {
                parts.push(summary.to_string());
            }
        }

        Ok(parts.join(" "))
    }
}
