use percent_encoding::percent_decode_str;
use serde_json::Value;

use crate::core::models::{DEFAULT_MAX_LENGTH, SummaryRequest};
use crate::errors::SummaryError;

pub fn v_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = root;
    for key in path {
        cur = cur.get(*key)?;
    }
    Some(cur)
}

pub fn v_str<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    v_path(root, path).and_then(|v| v.as_str())
}

/// Request path from an HTTP API v2 (`rawPath`) or REST v1 (`path`) event.
pub fn request_path(payload: &Value) -> Option<&str> {
    v_str(payload, &["rawPath"]).or_else(|| v_str(payload, &["path"]))
}

/// HTTP method from an HTTP API v2 or REST v1 event.
pub fn request_method(payload: &Value) -> Option<&str> {
    v_str(payload, &["requestContext", "http", "method"])
        .or_else(|| v_str(payload, &["httpMethod"]))
}

/// Decodes one query-string component (`+` is a space).
///
/// # Examples
///
/// ```
/// use yt_tldr::api::parsing::decode_query_component;
///
/// assert_eq!(decode_query_component("hello%20world").unwrap(), "hello world");
/// assert_eq!(decode_query_component("a+b%2Bc").unwrap(), "a b+c");
/// ```
pub fn decode_query_component(input: &str) -> Result<String, SummaryError> {
    let spaced = input.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|s| s.to_string())
        .map_err(|e| {
            SummaryError::InvalidParameter(format!("Failed to decode query component: {}", e))
        })
}

/// Looks up a query parameter, preferring the gateway's pre-parsed map and falling back
/// to `rawQueryString`. In the raw form, pairs split on `&` and the first `=` separates
/// key from value, so an unencoded `url=https://host/watch?v=ID` survives intact.
pub fn query_param(payload: &Value, name: &str) -> Result<Option<String>, SummaryError> {
    if let Some(value) = v_str(payload, &["queryStringParameters", name]) {
        return Ok(Some(value.to_string()));
    }

    let Some(raw) = v_str(payload, &["rawQueryString"]) else {
        return Ok(None);
    };

    for pair in raw.split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if decode_query_component(key)? == name {
            return decode_query_component(value).map(Some);
        }
    }

    Ok(None)
}

/// Video id from a watch URL: the text between the first and second `=`.
///
/// # Errors
///
/// `MalformedUrl` when the URL contains no `=`.
///
/// # Examples
///
/// ```
/// use yt_tldr::api::parsing::extract_video_id;
///
/// assert_eq!(
///     extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap(),
///     "dQw4w9WgXcQ"
/// );
/// assert!(extract_video_id("https://youtu.be/dQw4w9WgXcQ").is_err());
/// ```
pub fn extract_video_id(url: &str) -> Result<String, SummaryError> {
    url.split('=')
        .nth(1)
        .map(ToString::to_string)
        .ok_or_else(|| SummaryError::MalformedUrl(format!("no '=' in {url:?}")))
}

/// Parses `max_length`, defaulting to [`DEFAULT_MAX_LENGTH`].
///
/// # Errors
///
/// `InvalidParameter` unless the value is a positive integer.
pub fn parse_max_length(raw: Option<&str>) -> Result<u32, SummaryError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(DEFAULT_MAX_LENGTH);
    };

    match raw.parse::<u32>() {
        Ok(0) => Err(SummaryError::InvalidParameter(
            "max_length must be greater than zero".to_string(),
        )),
        Ok(value) => Ok(value),
        Err(e) => Err(SummaryError::InvalidParameter(format!(
            "max_length {raw:?} is not a valid integer: {e}"
        ))),
    }
}

/// Builds a [`SummaryRequest`] from the query of a `GET /summary` event.
pub fn parse_summary_request(payload: &Value) -> Result<SummaryRequest, SummaryError> {
    let url = query_param(payload, "url")?.unwrap_or_default();
    let video_id = extract_video_id(&url)?;
    let max_length = parse_max_length(query_param(payload, "max_length")?.as_deref())?;

    Ok(SummaryRequest {
        video_id,
        max_length,
    })
}
