//! Bag-of-words count matrix over a sentence set.
//!
//! Rows are stored sparsely: a transcript's vocabulary grows with its length, but each
//! sentence only touches a handful of terms.

use ndarray::{Array1, ArrayView2};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};

use super::stop_words::is_stop_word;
use crate::errors::SummaryError;

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("static regex compile"));

/// Row-major sparse matrix. Each row lists its non-zero `(column, value)` entries in
/// ascending column order.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseCounts {
    cols: usize,
    rows: Vec<Vec<(usize, f64)>>,
}

impl SparseCounts {
    /// Keeps the non-zero entries of a dense matrix.
    #[must_use]
    pub fn from_dense(dense: ArrayView2<'_, f64>) -> Self {
        let rows: Vec<Vec<(usize, f64)>> = dense
            .rows()
            .into_iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .filter(|&(_, &value)| value != 0.0)
                    .map(|(col, &value)| (col, value))
                    .collect()
            })
            .collect();

        Self {
            cols: dense.ncols(),
            rows,
        }
    }

    #[must_use]
    pub fn dim(&self) -> (usize, usize) {
        (self.rows.len(), self.cols)
    }

    /// Number of stored non-zero entries.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.rows
            .get(row)
            .and_then(|entries| {
                entries
                    .binary_search_by_key(&col, |&(c, _)| c)
                    .ok()
                    .map(|idx| entries[idx].1)
            })
            .unwrap_or(0.0)
    }

    /// `X · v`, one entry per row.
    #[must_use]
    pub fn mul_vec(&self, v: &Array1<f64>) -> Array1<f64> {
        debug_assert_eq!(v.len(), self.cols);
        self.rows
            .iter()
            .map(|entries| entries.iter().map(|&(col, value)| value * v[col]).sum::<f64>())
            .collect()
    }

    /// `Xᵀ · y`, one entry per column.
    #[must_use]
    pub fn t_mul_vec(&self, y: &Array1<f64>) -> Array1<f64> {
        debug_assert_eq!(y.len(), self.rows.len());
        let mut out = Array1::<f64>::zeros(self.cols);
        for (entries, &weight) in self.rows.iter().zip(y.iter()) {
            if weight == 0.0 {
                continue;
            }
            for &(col, value) in entries {
                out[col] += value * weight;
            }
        }
        out
    }
}

/// Sentence-by-term counts. Row `i` is sentence `i`; column `j` is `vocabulary[j]`.
#[derive(Debug, Clone)]
pub struct CountMatrix {
    pub vocabulary: Vec<String>,
    pub counts: SparseCounts,
}

/// Lowercased tokens of two or more word characters, stop words removed.
#[must_use]
pub fn tokenize(sentence: &str) -> Vec<String> {
    let lowered = sentence.to_lowercase();
    TOKEN_RE
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|token| !is_stop_word(token))
        .map(ToString::to_string)
        .collect()
}

/// Builds the count matrix with one vocabulary shared by every sentence.
///
/// The vocabulary is sorted lexicographically so column order does not depend on
/// sentence order.
///
/// # Errors
///
/// `EmptyInput` when there are no sentences, `DegenerateInput` when no sentence has a
/// single non-stop-word token.
pub fn count_matrix(sentences: &[String]) -> Result<CountMatrix, SummaryError> {
    if sentences.is_empty() {
        return Err(SummaryError::EmptyInput);
    }

    let tokenized: Vec<Vec<String>> = sentences.iter().map(|s| tokenize(s)).collect();

    let vocabulary: Vec<String> = tokenized
        .iter()
        .flatten()
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    if vocabulary.is_empty() {
        return Err(SummaryError::DegenerateInput);
    }

    let column: BTreeMap<&str, usize> = vocabulary
        .iter()
        .enumerate()
        .map(|(idx, term)| (term.as_str(), idx))
        .collect();

    let rows: Vec<Vec<(usize, f64)>> = tokenized
        .iter()
        .map(|tokens| {
            let mut row: BTreeMap<usize, f64> = BTreeMap::new();
            for token in tokens {
                if let Some(&col) = column.get(token.as_str()) {
                    *row.entry(col).or_insert(0.0) += 1.0;
                }
            }
            row.into_iter().collect()
        })
        .collect();

    let counts = SparseCounts {
        cols: vocabulary.len(),
        rows,
    };

    Ok(CountMatrix { vocabulary, counts })
}
