//! Data types that flow through the scoring pipeline.
//!
//! Every value here is built once and never mutated afterwards. A comparison
//! produces a fresh [`TokenSequence`] per document and drops them once the
//! [`SimilarityScore`] has been computed.

use serde::Serialize;
use std::fmt;

/// Plain text extracted from one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RawText(String);

impl RawText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters (not bytes).
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for RawText {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for RawText {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

/// Normalized tokens of one document, in input order.
///
/// Every token is lowercase, purely alphabetic, and not a stopword.
/// Downstream stages treat the sequence as a bag of words; the order is
/// kept only so results are reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TokenSequence(Vec<String>);

impl TokenSequence {
    pub(crate) fn from_tokens(tokens: Vec<String>) -> Self {
        Self(tokens)
    }

    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Rejoin the tokens with single spaces, the form the vectorizer takes.
    pub fn join(&self) -> String {
        self.0.join(" ")
    }
}

/// Cosine similarity scaled to a percentage, always within `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct SimilarityScore(f64);

impl SimilarityScore {
    pub const MIN: SimilarityScore = SimilarityScore(0.0);
    pub const MAX: SimilarityScore = SimilarityScore(100.0);

    /// Build a score from a cosine value, clamping drift outside `[0, 1]`.
    ///
    /// NaN maps to 0.
    pub fn from_cosine(cosine: f64) -> Self {
        if cosine.is_nan() {
            return Self::MIN;
        }
        Self((cosine * 100.0).clamp(0.0, 100.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for SimilarityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_clamps_float_drift() {
        assert_eq!(SimilarityScore::from_cosine(1.000_000_000_2).value(), 100.0);
        assert_eq!(SimilarityScore::from_cosine(-1e-12).value(), 0.0);
        assert_eq!(SimilarityScore::from_cosine(f64::NAN).value(), 0.0);
    }

    #[test]
    fn score_displays_two_decimals() {
        assert_eq!(SimilarityScore::from_cosine(0.5).to_string(), "50.00%");
    }

    #[test]
    fn token_sequence_join_uses_single_spaces() {
        let seq = TokenSequence::from_tokens(vec!["rust".into(), "engineer".into()]);
        assert_eq!(seq.join(), "rust engineer");
        assert_eq!(seq.len(), 2);
    }

    #[test]
    fn raw_text_counts_chars_not_bytes() {
        let text = RawText::new("café");
        assert_eq!(text.char_count(), 4);
        assert!(!text.is_empty());
    }

    #[test]
    fn models_serialize_transparently() {
        let seq = TokenSequence::from_tokens(vec!["rust".into()]);
        assert_eq!(serde_json::to_string(&seq).unwrap(), "[\"rust\"]");
        let s = SimilarityScore::from_cosine(0.25);
        assert_eq!(serde_json::to_string(&s).unwrap(), "25.0");
    }
}
