//! Transcript retrieval and assembly

pub mod assemble;
pub mod youtube;

use async_trait::async_trait;

use crate::core::models::CaptionFragment;
use crate::errors::SummaryError;

pub use assemble::assemble_transcript;
pub use youtube::YoutubeTranscriptClient;

/// Source of timed captions for a video.
///
/// Every failure (bad id, no captions, network) is reported as
/// [`SummaryError::TranscriptUnavailable`].
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    async fn fetch_transcript(&self, video_id: &str) -> Result<Vec<CaptionFragment>, SummaryError>;
}
