#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};
use yt_tldr::SummaryApp;
use yt_tldr::core::models::CaptionFragment;
use yt_tldr::errors::SummaryError;
use yt_tldr::summarize::{LsaRanker, Summarizer, TextRanker};
use yt_tldr::transcript::TranscriptSource;

/// Serves the same fragments for every video id.
pub struct StaticTranscripts(pub Vec<CaptionFragment>);

#[async_trait]
impl TranscriptSource for StaticTranscripts {
    async fn fetch_transcript(&self, _video_id: &str) -> Result<Vec<CaptionFragment>, SummaryError> {
        Ok(self.0.clone())
    }
}

/// Fails every fetch, as a video without captions would.
pub struct UnavailableTranscripts;

#[async_trait]
impl TranscriptSource for UnavailableTranscripts {
    async fn fetch_transcript(&self, video_id: &str) -> Result<Vec<CaptionFragment>, SummaryError> {
        Err(SummaryError::transcript_unavailable(video_id, "captions disabled"))
    }
}

/// Records every call and answers with a fixed summary.
pub struct RecordingSummarizer {
    reply: String,
    calls: Mutex<Vec<(String, u32)>>,
}

impl RecordingSummarizer {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Summarizer for RecordingSummarizer {
    async fn summarize(&self, text: &str, max_length: u32) -> Result<String, SummaryError> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), max_length));
        Ok(self.reply.clone())
    }
}

/// Model that is always down.
pub struct FailingSummarizer;

#[async_trait]
impl Summarizer for FailingSummarizer {
    async fn summarize(&self, _text: &str, _max_length: u32) -> Result<String, SummaryError> {
        Err(SummaryError::ModelError("model offline".to_string()))
    }
}

/// Returns pre-set scores, ignoring sentence content.
pub struct FixedScores(pub Vec<f64>);

impl TextRanker for FixedScores {
    fn rank(&self, _sentences: &[String]) -> Result<Vec<f64>, SummaryError> {
        Ok(self.0.clone())
    }
}

/// Gives every sentence the same score.
pub struct FlatRanker;

impl TextRanker for FlatRanker {
    fn rank(&self, sentences: &[String]) -> Result<Vec<f64>, SummaryError> {
        Ok(vec![1.0; sentences.len()])
    }
}

pub fn fragments(texts: &[&str]) -> Vec<CaptionFragment> {
    texts.iter().map(|t| CaptionFragment::new(*t)).collect()
}

/// `count` distinct whitespace-separated words with no sentence punctuation.
pub fn words(count: usize) -> String {
    (0..count)
        .map(|i| format!("word{i}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// A long lecture-style transcript (well over 3000 words) mixing two topics.
pub fn long_transcript() -> String {
    let topic_a = [
        "Rust ownership rules guarantee memory safety without a garbage collector.",
        "The borrow checker enforces ownership and borrowing rules at compile time.",
        "Lifetimes describe how long references stay valid under the ownership model.",
    ];
    let topic_b = [
        "Cooking pasta needs plenty of salted boiling water.",
        "Fresh basil gives tomato sauce a bright flavor.",
    ];

    let mut sentences = Vec::new();
    let mut i = 0;
    while sentences.iter().map(|s: &String| s.split_whitespace().count()).sum::<usize>() <= 3200 {
        let base = if i % 2 == 0 {
            topic_a[i % topic_a.len()]
        } else {
            topic_b[i % topic_b.len()]
        };
        sentences.push(format!("Part {i} says {base}"));
        i += 1;
    }
    sentences.join(" ")
}

pub fn app_with(
    transcripts: impl TranscriptSource + 'static,
    model: Arc<dyn Summarizer>,
) -> SummaryApp {
    SummaryApp::from_parts(Arc::new(transcripts), model, Arc::new(LsaRanker::default()))
}

/// HTTP API v2 event for `GET {path}?{raw_query}` with the parameters left unparsed.
pub fn http_event(method: &str, path: &str, raw_query: &str) -> Value {
    json!({
        "version": "2.0",
        "rawPath": path,
        "rawQueryString": raw_query,
        "headers": { "accept": "*/*" },
        "requestContext": { "http": { "method": method, "path": path } }
    })
}

pub fn summary_event(raw_query: &str) -> Value {
    http_event("GET", "/summary", raw_query)
}
