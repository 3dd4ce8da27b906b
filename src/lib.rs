//! yt-tldr - summarizes YouTube videos from their caption transcripts.
//!
//! A single Lambda behind an HTTP API answers `GET /summary?url=...&max_length=...`:
//! 1. The video id is taken from the `url` parameter and its captions are fetched
//! 2. Caption fragments are joined into one transcript
//! 3. Transcripts over 3000 words get an extractive summary (LSA sentence ranking);
//!    shorter ones are summarized abstractively by a hosted model, 1000 characters
//!    at a time
//!
//! # Architecture
//!
//! The system uses:
//! - AWS Lambda for serverless execution
//! - reqwest for caption retrieval and the Hugging Face Inference API
//! - ndarray for the count matrix and truncated SVD
//! - Tokio for async runtime
//!
//! # Example
//!
//! ```no_run
//! use yt_tldr::SummaryApp;
//! use yt_tldr::core::config::AppConfig;
//! use yt_tldr::core::models::SummaryRequest;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     yt_tldr::setup_logging();
//!
//!     let config = AppConfig::from_env()?;
//!     let app = SummaryApp::new(&config);
//!
//!     let summary = app
//!         .summarize_video(&SummaryRequest {
//!             video_id: "dQw4w9WgXcQ".to_string(),
//!             max_length: 150,
//!         })
//!         .await?;
//!
//!     println!("{} summary: {}", summary.strategy, summary.text);
//!     Ok(())
//! }
//! ```
// Module declarations
pub mod ai;
pub mod api;
pub mod app;
pub mod core;
pub mod errors;
pub mod summarize;
pub mod transcript;

pub use app::SummaryApp;
pub use errors::SummaryError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// Sets up tracing-subscriber with a JSON formatter suitable for `CloudWatch` Logs,
/// filtered by `RUST_LOG` (default `info`). Call it once at Lambda start; later calls
/// leave the first subscriber in place.
///
/// # Example
///
/// ```
/// yt_tldr::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
