//! Rule-based English sentence segmentation.

use super::stop_words::is_stop_word;

/// Titles that precede a name, so a period after them never ends a sentence (compared
/// lowercase, without the final period).
const TITLES: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "st", "gen", "gov", "lt", "mt", "sgt", "fig", "vs",
];

/// Abbreviations that may also close a sentence.
const ABBREVIATIONS: &[&str] = &[
    "sr", "jr", "etc", "e.g", "i.e", "inc", "ltd", "co", "corp", "approx", "dept", "jan",
    "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec", "u.s", "u.k",
];

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

fn is_closer(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '\u{201D}' | '\u{2019}')
}

fn is_opener(c: char) -> bool {
    matches!(c, '"' | '\'' | '(' | '[' | '\u{201C}' | '\u{2018}')
}

fn is_initial(word: &str) -> bool {
    let mut chars = word.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic())
}

fn is_abbreviation(word: &str) -> bool {
    is_initial(word) || ABBREVIATIONS.contains(&word)
}

/// True when the period closing `prefix` belongs to a title, abbreviation or initial
/// and `rest` carries on the same sentence.
///
/// After a title the sentence always continues. After an initial or other abbreviation
/// it continues unless the next word is capitalized and a common sentence opener
/// ("It", "Then", "We"), so "J. R. Tolkien" stays whole while "Vitamin A. It matters."
/// splits.
fn continues_after_period(prefix: &str, rest: &str) -> bool {
    let word = prefix
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or("")
        .trim_start_matches(is_opener)
        .to_lowercase();

    if TITLES.contains(&word.as_str()) {
        return true;
    }
    if !is_abbreviation(&word) {
        return false;
    }

    let next = rest
        .split_whitespace()
        .next()
        .unwrap_or("")
        .trim_start_matches(is_opener);
    let Some(first) = next.chars().next() else {
        return false;
    };
    if !first.is_uppercase() {
        return true;
    }

    let next = next.to_lowercase();
    if let Some(stem) = next.strip_suffix('.')
        && (is_abbreviation(stem) || TITLES.contains(&stem))
    {
        return true;
    }

    !is_stop_word(next.trim_end_matches(|c: char| !c.is_alphanumeric()))
}

fn push_sentence(sentences: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}

/// Splits `text` into sentences in reading order.
///
/// A sentence ends at `.`, `!` or `?` (plus any trailing terminators and closing
/// quotes or brackets) followed by whitespace or end of input. A lone period after a
/// title does not end a sentence, nor does one after an abbreviation or initial unless
/// the next word opens a new sentence. Sentences are trimmed and blank
/// ones dropped, so joining the result with spaces gives back the input up to
/// whitespace.
#[must_use]
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if !is_terminator(ch) {
            continue;
        }

        let mut end = idx + ch.len_utf8();
        let mut only_period = ch == '.';
        while let Some(&(next_idx, next)) = chars.peek() {
            if is_terminator(next) {
                only_period &= next == '.';
            } else if !is_closer(next) {
                break;
            }
            end = next_idx + next.len_utf8();
            chars.next();
        }

        let at_boundary = chars.peek().is_none_or(|&(_, next)| next.is_whitespace());
        if !at_boundary {
            continue;
        }
        if only_period && continues_after_period(&text[start..idx], &text[end..]) {
            continue;
        }

        push_sentence(&mut sentences, &text[start..end]);
        start = end;
    }

    push_sentence(&mut sentences, &text[start..]);
    sentences
}
