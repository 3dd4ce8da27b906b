//! Extractive summarization: keep the highest-ranked sentences verbatim, in their
//! original order.
//!
//! This path never looks at `max_length`; only the abstractive path is length-bounded.

use std::cmp::Ordering;

use tracing::info;

use super::TextRanker;
use super::segment::split_sentences;
use crate::errors::SummaryError;

/// Number of sentences kept out of `sentence_count`: `floor(0.4 × N)`, at least one
/// whenever there is a sentence to keep.
#[must_use]
pub fn selection_size(sentence_count: usize) -> usize {
    if sentence_count == 0 {
        return 0;
    }
    (sentence_count * 2 / 5).max(1)
}

/// Sentence indices by descending score. Equal scores keep their original order.
#[must_use]
pub fn rank_order(scores: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].partial_cmp(&scores[a]).unwrap_or(Ordering::Equal));
    order
}

/// Indices to keep, in ascending (transcript) order.
#[must_use]
pub fn select_indices(scores: &[f64]) -> Vec<usize> {
    let mut selected = rank_order(scores);
    selected.truncate(selection_size(scores.len()));
    selected.sort_unstable();
    selected
}

#[derive(Debug, Clone)]
pub struct ExtractiveSummarizer<R> {
    ranker: R,
}

impl<R: TextRanker> ExtractiveSummarizer<R> {
    pub fn new(ranker: R) -> Self {
        Self { ranker }
    }

    /// # Errors
    ///
    /// `EmptyInput` when the transcript has no sentences; whatever the ranker reports
    /// otherwise, and `NumericFailure` when it returns the wrong number of scores or a
    /// non-finite one.
    pub fn summarize(&self, transcript: &str) -> Result<String, SummaryError> {
        let sentences = split_sentences(transcript);
        if sentences.is_empty() {
            return Err(SummaryError::EmptyInput);
        }

        let scores = self.ranker.rank(&sentences)?;
        if scores.len() != sentences.len() {
            return Err(SummaryError::NumericFailure(format!(
                "ranker returned {} scores for {} sentences",
                scores.len(),
                sentences.len()
            )));
        }
        if scores.iter().any(|s| !s.is_finite()) {
            return Err(SummaryError::NumericFailure(
                "ranker returned a non-finite score".to_string(),
            ));
        }

        let selected = select_indices(&scores);
        info!(
            sentences = sentences.len(),
            selected = selected.len(),
            "Extractive summary assembled"
        );

        Ok(selected
            .iter()
            .map(|&idx| sentences[idx].as_str())
            .collect::<Vec<_>>()
            .join(" "))
    }
}
