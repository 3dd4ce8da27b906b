use crate::core::models::CaptionFragment;

/// Joins caption fragments into one transcript, single-space separated, in input order.
///
/// Nothing is filtered or reordered. An empty slice yields an empty string; the
/// summarizers treat that as a degenerate transcript.
///
/// # Examples
///
/// ```
/// use yt_tldr::core::models::CaptionFragment;
/// use yt_tldr::transcript::assemble_transcript;
///
/// let fragments = vec![
///     CaptionFragment::new("a"),
///     CaptionFragment::new("b"),
///     CaptionFragment::new("c"),
/// ];
/// assert_eq!(assemble_transcript(&fragments), "a b c");
/// ```
#[must_use]
pub fn assemble_transcript(fragments: &[CaptionFragment]) -> String {
    fragments
        .iter()
        .map(|fragment| fragment.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
