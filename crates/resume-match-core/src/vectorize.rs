//! Two-document TF-IDF vectorizer.
//!
//! The corpus is always exactly the pair being compared, so IDF weights are
//! relative to that pair only. Each call builds a fresh [`VectorSpace`].
//!
//! # Weighting
//!
//! - `tf(t, d)` = raw count of term `t` in document `d`
//! - `idf(t)` = `ln((1 + N) / (1 + df(t))) + 1`, with `N = 2`
//! - `w(t, d)` = `tf(t, d) × idf(t)`
//!
//! A term present in both documents gets `idf = 1`; a term present in one
//! gets `idf = ln(3/2) + 1 ≈ 1.405`. Absent terms weigh 0.
//!
//! Inputs are whitespace-separated token strings (see
//! [`TokenSequence::join`](crate::models::TokenSequence::join)). Terms
//! shorter than `min_term_len` characters are ignored, mirroring the
//! two-character minimum of the common `\w\w+` vectorizer token pattern.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Number of documents in every vector space.
pub const CORPUS_SIZE: usize = 2;

/// Shortest term (in characters) the default vectorizer keeps.
pub const DEFAULT_MIN_TERM_LEN: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VectorizeError {
    #[error("empty vocabulary: neither text has a term of at least {min_term_len} characters")]
    EmptyVocabulary { min_term_len: usize },
}

/// Shared vocabulary plus one dense TF-IDF vector per document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VectorSpace {
    vocabulary: Vec<String>,
    idf: Vec<f64>,
    vector_a: Vec<f64>,
    vector_b: Vec<f64>,
}

impl VectorSpace {
    /// Distinct terms of both documents, sorted.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    pub fn vector_a(&self) -> &[f64] {
        &self.vector_a
    }

    pub fn vector_b(&self) -> &[f64] {
        &self.vector_b
    }

    pub fn dimensions(&self) -> usize {
        self.vocabulary.len()
    }

    /// `(term, weight_a, weight_b)` in vocabulary order.
    pub fn terms(&self) -> impl Iterator<Item = (&str, f64, f64)> + '_ {
        self.vocabulary
            .iter()
            .zip(self.vector_a.iter().zip(self.vector_b.iter()))
            .map(|(term, (a, b))| (term.as_str(), *a, *b))
    }

    /// Weights of `term` in both documents, if it is in the vocabulary.
    pub fn weights(&self, term: &str) -> Option<(f64, f64)> {
        let idx = self
            .vocabulary
            .binary_search_by(|probe| probe.as_str().cmp(term))
            .ok()?;
        Some((self.vector_a[idx], self.vector_b[idx]))
    }
}

/// Smoothed inverse document frequency for a term seen in `df` of
/// [`CORPUS_SIZE`] documents.
pub fn smoothed_idf(df: usize) -> f64 {
    let n = CORPUS_SIZE as f64;
    ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0
}

/// Vectorize a pair of token strings with [`DEFAULT_MIN_TERM_LEN`].
pub fn vectorize_pair(text_a: &str, text_b: &str) -> Result<VectorSpace, VectorizeError> {
    vectorize_pair_with(text_a, text_b, DEFAULT_MIN_TERM_LEN)
}

/// Vectorize a pair of token strings, keeping terms of at least
/// `min_term_len` characters (a value of 0 behaves like 1).
pub fn vectorize_pair_with(
    text_a: &str,
    text_b: &str,
    min_term_len: usize,
) -> Result<VectorSpace, VectorizeError> {
    let min_term_len = min_term_len.max(1);

    let mut counts: BTreeMap<&str, [u32; CORPUS_SIZE]> = BTreeMap::new();
    for (doc, text) in [text_a, text_b].into_iter().enumerate() {
        for term in text.split_whitespace() {
            if term.chars().count() < min_term_len {
                continue;
            }
            counts.entry(term).or_insert([0; CORPUS_SIZE])[doc] += 1;
        }
    }

    if counts.is_empty() {
        return Err(VectorizeError::EmptyVocabulary { min_term_len });
    }

    let dims = counts.len();
    let mut vocabulary = Vec::with_capacity(dims);
    let mut idf = Vec::with_capacity(dims);
    let mut vector_a = Vec::with_capacity(dims);
    let mut vector_b = Vec::with_capacity(dims);

    for (term, [count_a, count_b]) in counts {
        let df = usize::from(count_a > 0) + usize::from(count_b > 0);
        let term_idf = smoothed_idf(df);
        vocabulary.push(term.to_string());
        idf.push(term_idf);
        vector_a.push(f64::from(count_a) * term_idf);
        vector_b.push(f64::from(count_b) * term_idf);
    }

    debug!(dimensions = dims, min_term_len, "built pair vector space");

    Ok(VectorSpace {
        vocabulary,
        idf,
        vector_a,
        vector_b,
    })
}
