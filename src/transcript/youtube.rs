//! YouTube caption retrieval.
//!
//! Loads the watch page for its innertube API key, asks the innertube player endpoint
//! for the caption track list, picks a track in the configured language and downloads
//! it in the `json3` timed-text format. Pages without a key, or player answers without
//! tracks, fall back to the track list embedded in the watch page.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, info, warn};
use url::Url;

use super::TranscriptSource;
use crate::core::config::AppConfig;
use crate::core::models::CaptionFragment;
use crate::errors::SummaryError;

const CAPTION_TRACKS_MARKER: &str = "\"captionTracks\":";
const AUTO_GENERATED_KIND: &str = "asr";
const PLAYABLE_STATUS: &str = "OK";
const INNERTUBE_CLIENT_NAME: &str = "ANDROID";
const INNERTUBE_CLIENT_VERSION: &str = "20.10.38";

static INNERTUBE_API_KEY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""INNERTUBE_API_KEY":\s*"([A-Za-z0-9_-]+)""#).expect("static regex compile")
});

#[derive(Debug, Clone, Deserialize)]
pub struct CaptionTrack {
    #[serde(rename = "baseUrl")]
    pub base_url: String,
    #[serde(rename = "languageCode", default)]
    pub language_code: String,
    #[serde(default)]
    pub kind: Option<String>,
}

impl CaptionTrack {
    fn is_auto_generated(&self) -> bool {
        self.kind.as_deref() == Some(AUTO_GENERATED_KIND)
    }
}

#[derive(Debug, Deserialize)]
struct PlayerResponse {
    #[serde(rename = "playabilityStatus")]
    playability_status: Option<PlayabilityStatus>,
    captions: Option<PlayerCaptions>,
}

#[derive(Debug, Deserialize)]
struct PlayabilityStatus {
    #[serde(default)]
    status: String,
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlayerCaptions {
    #[serde(rename = "playerCaptionsTracklistRenderer")]
    tracklist: Option<CaptionTracklist>,
}

#[derive(Debug, Deserialize)]
struct CaptionTracklist {
    #[serde(rename = "captionTracks", default)]
    caption_tracks: Vec<CaptionTrack>,
}

#[derive(Debug, Deserialize)]
struct TimedText {
    #[serde(default)]
    events: Vec<TimedTextEvent>,
}

#[derive(Debug, Deserialize)]
struct TimedTextEvent {
    #[serde(rename = "tStartMs", default)]
    start_ms: u64,
    #[serde(rename = "dDurationMs", default)]
    duration_ms: u64,
    segs: Option<Vec<TimedTextSegment>>,
}

#[derive(Debug, Deserialize)]
struct TimedTextSegment {
    #[serde(default)]
    utf8: String,
}

/// Pulls the `captionTracks` array out of a watch page.
///
/// Returns `None` when the page carries no captions at all.
#[must_use]
pub fn extract_caption_tracks(page: &str) -> Option<Vec<CaptionTrack>> {
    let start = page.find(CAPTION_TRACKS_MARKER)? + CAPTION_TRACKS_MARKER.len();
    serde_json::Deserializer::from_str(&page[start..])
        .into_iter::<Vec<CaptionTrack>>()
        .next()?
        .ok()
}

/// The innertube API key a watch page carries, if any.
#[must_use]
pub fn extract_innertube_api_key(page: &str) -> Option<&str> {
    INNERTUBE_API_KEY_RE
        .captures(page)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Request body for the innertube player endpoint.
#[must_use]
pub fn build_player_request(video_id: &str) -> Value {
    json!({
        "context": {
            "client": {
                "clientName": INNERTUBE_CLIENT_NAME,
                "clientVersion": INNERTUBE_CLIENT_VERSION
            }
        },
        "videoId": video_id
    })
}

/// Caption tracks from an innertube player response. An empty list means the video
/// plays but has no captions.
///
/// # Errors
///
/// `TranscriptUnavailable` when the body is not a player response or the video is not
/// playable (private, removed, age-gated).
pub fn parse_player_response(body: &str) -> Result<Vec<CaptionTrack>, SummaryError> {
    let response: PlayerResponse = serde_json::from_str(body)
        .map_err(|e| SummaryError::transcript_unavailable("", format!("player response: {e}")))?;

    if let Some(playability) = &response.playability_status
        && playability.status != PLAYABLE_STATUS
    {
        return Err(SummaryError::transcript_unavailable(
            "",
            format!(
                "video is not playable ({}): {}",
                playability.status,
                playability.reason.as_deref().unwrap_or("no reason given")
            ),
        ));
    }

    Ok(response
        .captions
        .and_then(|captions| captions.tracklist)
        .map(|tracklist| tracklist.caption_tracks)
        .unwrap_or_default())
}

/// Absolute `json3` download URL for a track. Any `fmt` the track URL already names is
/// replaced.
pub fn timed_text_url(base_url: &str, track_url: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(base_url)?.join(track_url)?;
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != "fmt")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(pairs)
        .append_pair("fmt", "json3");
    Ok(url)
}

/// Picks the best track for `language`: manual captions first, then auto-generated,
/// then a regional variant (`en-GB` for `en`), then whatever track comes first.
#[must_use]
pub fn select_track<'a>(tracks: &'a [CaptionTrack], language: &str) -> Option<&'a CaptionTrack> {
    let exact = |t: &&CaptionTrack| t.language_code.eq_ignore_ascii_case(language);
    let regional = |t: &&CaptionTrack| {
        t.language_code
            .split('-')
            .next()
            .is_some_and(|primary| primary.eq_ignore_ascii_case(language))
    };

    tracks
        .iter()
        .filter(exact)
        .find(|t| !t.is_auto_generated())
        .or_else(|| tracks.iter().find(exact))
        .or_else(|| tracks.iter().find(regional))
        .or_else(|| tracks.first())
}

/// Converts a `json3` timed-text document into caption fragments.
///
/// Events without text segments are window/style markers and are skipped.
pub fn parse_timed_text(body: &str) -> Result<Vec<CaptionFragment>, serde_json::Error> {
    let doc: TimedText = serde_json::from_str(body)?;

    Ok(doc
        .events
        .into_iter()
        .filter_map(|event| {
            let text = event
                .segs?
                .iter()
                .map(|seg| seg.utf8.as_str())
                .collect::<String>()
                .replace('\n', " ");
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            Some(CaptionFragment {
                text: text.to_string(),
                start: event.start_ms as f64 / 1000.0,
                duration: event.duration_ms as f64 / 1000.0,
            })
        })
        .collect())
}

/// Fetches captions over plain HTTP from a YouTube-compatible host.
pub struct YoutubeTranscriptClient {
    http: Client,
    base_url: String,
    language: String,
    max_retries: usize,
}

impl YoutubeTranscriptClient {
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        let http = Client::builder()
            .timeout(config.http_timeout())
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http,
            base_url: config.youtube_base_url.trim_end_matches('/').to_string(),
            language: config.transcript_language.clone(),
            max_retries: config.upstream_max_retries,
        }
    }

    async fn with_retry<F, Fut, T>(&self, operation: F) -> Result<T, SummaryError>
    where
        F: FnMut() -> Fut + Send,
        Fut: std::future::Future<Output = Result<T, SummaryError>> + Send,
        T: Send,
    {
        let strategy = ExponentialBackoff::from_millis(100)
            .map(jitter)
            .take(self.max_retries);

        RetryIf::spawn(strategy, operation, |e: &SummaryError| {
            let transient = matches!(e, SummaryError::HttpError(_));
            if transient {
                warn!("Transient transcript fetch failure, retrying: {}", e);
            }
            transient
        })
        .await
    }

    async fn send_for_text(
        &self,
        request: RequestBuilder,
        label: &str,
    ) -> Result<String, SummaryError> {
        let response = request
            .header("Accept-Language", format!("{},en;q=0.8", self.language))
            .send()
            .await?;

        let status = response.status();
        if status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SummaryError::HttpError(format!("{label} returned {status}")));
        }
        if !status.is_success() {
            return Err(SummaryError::transcript_unavailable(
                "",
                format!("{label} returned {status}"),
            ));
        }

        Ok(response.text().await?)
    }

    async fn get_text(&self, url: &Url) -> Result<String, SummaryError> {
        let label = format!("GET {}", url.path());
        self.send_for_text(self.http.get(url.clone()), &label).await
    }

    async fn post_json(&self, url: &Url, body: &Value) -> Result<String, SummaryError> {
        let label = format!("POST {}", url.path());
        self.send_for_text(self.http.post(url.clone()).json(body), &label)
            .await
    }

    /// Tracks from the innertube player endpoint. A refused request yields an empty list
    /// so the caller can use the watch page instead.
    async fn player_caption_tracks(
        &self,
        video_id: &str,
        api_key: &str,
    ) -> Result<Vec<CaptionTrack>, SummaryError> {
        let player_url = Url::parse_with_params(
            &format!("{}/youtubei/v1/player", self.base_url),
            &[("key", api_key)],
        )
        .map_err(|e| SummaryError::transcript_unavailable(video_id, e))?;
        let body = build_player_request(video_id);

        let response = match self.with_retry(|| self.post_json(&player_url, &body)).await {
            Ok(response) => response,
            Err(SummaryError::TranscriptUnavailable { reason, .. }) => {
                warn!(video_id, %reason, "Player endpoint refused, using watch page tracks");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        parse_player_response(&response)
    }

    async fn fetch_inner(&self, video_id: &str) -> Result<Vec<CaptionFragment>, SummaryError> {
        let watch_url = Url::parse_with_params(&format!("{}/watch", self.base_url), &[("v", video_id)])
            .map_err(|e| SummaryError::transcript_unavailable(video_id, e))?;

        let page = self.with_retry(|| self.get_text(&watch_url)).await?;

        let mut tracks = match extract_innertube_api_key(&page) {
            Some(api_key) => self.player_caption_tracks(video_id, api_key).await?,
            None => Vec::new(),
        };
        if tracks.is_empty() {
            debug!(video_id, "No player caption tracks, reading the watch page");
            tracks = extract_caption_tracks(&page).unwrap_or_default();
        }

        let track = select_track(&tracks, &self.language)
            .ok_or_else(|| SummaryError::transcript_unavailable(video_id, "no caption tracks"))?;

        debug!(
            language = %track.language_code,
            auto_generated = track.is_auto_generated(),
            "Selected caption track"
        );

        let track_url = timed_text_url(&self.base_url, &track.base_url)
            .map_err(|e| SummaryError::transcript_unavailable(video_id, e))?;

        let body = self.with_retry(|| self.get_text(&track_url)).await?;

        parse_timed_text(&body).map_err(|e| SummaryError::transcript_unavailable(video_id, e))
    }
}

#[async_trait]
impl TranscriptSource for YoutubeTranscriptClient {
    async fn fetch_transcript(&self, video_id: &str) -> Result<Vec<CaptionFragment>, SummaryError> {
        match self.fetch_inner(video_id).await {
            Ok(fragments) => {
                info!(video_id, fragments = fragments.len(), "Fetched transcript");
                Ok(fragments)
            }
            Err(SummaryError::TranscriptUnavailable { reason, .. }) => {
                Err(SummaryError::transcript_unavailable(video_id, reason))
            }
            Err(e) => Err(SummaryError::transcript_unavailable(video_id, e)),
        }
    }
}
