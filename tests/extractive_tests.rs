mod common;

use common::{FixedScores, FlatRanker, long_transcript};
use yt_tldr::errors::SummaryError;
use yt_tldr::summarize::extractive::selection_size;
use yt_tldr::summarize::segment::split_sentences;
use yt_tldr::summarize::vectorize::count_matrix;
use yt_tldr::summarize::{ExtractiveSummarizer, LsaRanker, TextRanker, word_count};

fn positions_in(original: &[String], summary: &str) -> Vec<usize> {
    split_sentences(summary)
        .iter()
        .map(|s| {
            original
                .iter()
                .position(|o| o == s)
                .unwrap_or_else(|| panic!("summary sentence {s:?} not in transcript"))
        })
        .collect()
}

/// Fifteen-word sentences whose vocabulary keeps growing with the transcript, one
/// recurring topic word in every sentence.
fn hours_long_transcript(words: usize) -> String {
    let distinct = words / 4;
    (0..words)
        .map(|k| {
            let word = if k % 5 == 0 {
                "caching".to_string()
            } else {
                format!("term{}", (k * 7919) % distinct)
            };
            if k % 15 == 14 { format!("{word}.") } else { word }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn test_selected_sentences_keep_transcript_order() {
    let transcript = "Alpha one. Beta two. Gamma three. Delta four. Epsilon five.";
    // Highest scores on the last and second sentences; 2 of 5 are kept.
    let summarizer = ExtractiveSummarizer::new(FixedScores(vec![0.1, 0.8, 0.2, 0.3, 0.9]));
    assert_eq!(summarizer.summarize(transcript).unwrap(), "Beta two. Epsilon five.");
}

#[test]
fn test_ties_prefer_earlier_sentences() {
    let transcript = "One. Two. Three. Four. Five.";
    let summary = ExtractiveSummarizer::new(FlatRanker).summarize(transcript).unwrap();
    assert_eq!(summary, "One. Two.");
}

#[test]
fn test_single_sentence_round_trips() {
    let summarizer = ExtractiveSummarizer::new(LsaRanker::default());
    let sentence = "Rust makes systems programming approachable.";
    assert_eq!(summarizer.summarize(sentence).unwrap(), sentence);
}

#[test]
fn test_two_sentences_keep_one() {
    let summary = ExtractiveSummarizer::new(FixedScores(vec![0.2, 0.7]))
        .summarize("First idea here. Second idea here.")
        .unwrap();
    assert_eq!(summary, "Second idea here.");
}

#[test]
fn test_lsa_summary_on_long_transcript() {
    let transcript = long_transcript();
    let sentences = split_sentences(&transcript);
    let summarizer = ExtractiveSummarizer::new(LsaRanker::default());

    let summary = summarizer.summarize(&transcript).unwrap();
    let positions = positions_in(&sentences, &summary);

    assert_eq!(positions.len(), selection_size(sentences.len()));
    assert!(
        positions.windows(2).all(|w| w[0] < w[1]),
        "summary sentences must follow transcript order: {positions:?}"
    );
}

#[test]
fn test_lsa_summary_is_deterministic() {
    let transcript = long_transcript();
    let summarizer = ExtractiveSummarizer::new(LsaRanker::default());
    let first = summarizer.summarize(&transcript).unwrap();
    let second = summarizer.summarize(&transcript).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_blank_transcript_is_empty_input() {
    let summarizer = ExtractiveSummarizer::new(LsaRanker::default());
    assert!(matches!(
        summarizer.summarize("   "),
        Err(SummaryError::EmptyInput)
    ));
}

#[test]
fn test_stop_words_only_is_degenerate() {
    let summarizer = ExtractiveSummarizer::new(LsaRanker::default());
    assert!(matches!(
        summarizer.summarize("It is what it is. And so on."),
        Err(SummaryError::DegenerateInput)
    ));
}

#[test]
fn test_ranker_with_wrong_score_count_is_numeric_failure() {
    let summarizer = ExtractiveSummarizer::new(FixedScores(vec![1.0]));
    assert!(matches!(
        summarizer.summarize("One. Two. Three."),
        Err(SummaryError::NumericFailure(_))
    ));
}

#[test]
fn test_non_finite_scores_are_numeric_failure() {
    let summarizer = ExtractiveSummarizer::new(FixedScores(vec![1.0, f64::NAN]));
    assert!(matches!(
        summarizer.summarize("One. Two."),
        Err(SummaryError::NumericFailure(_))
    ));
}

#[test]
fn test_lsa_ranks_twenty_thousand_word_transcript() {
    let transcript = hours_long_transcript(21_000);
    assert_eq!(word_count(&transcript), 21_000);

    let sentences = split_sentences(&transcript);
    assert_eq!(sentences.len(), 1_400);

    let matrix = count_matrix(&sentences).unwrap();
    let (rows, cols) = matrix.counts.dim();
    assert_eq!(rows, 1_400);
    assert!(cols > 4_000, "vocabulary should grow with the transcript: {cols}");
    assert!(matrix.counts.nnz() <= 21_000);

    let scores = LsaRanker::default().rank(&sentences).unwrap();
    assert_eq!(scores.len(), 1_400);
    assert!(scores.iter().all(|s| s.is_finite()));

    let summary = ExtractiveSummarizer::new(LsaRanker::default())
        .summarize(&transcript)
        .unwrap();
    assert_eq!(split_sentences(&summary).len(), selection_size(1_400));
}
