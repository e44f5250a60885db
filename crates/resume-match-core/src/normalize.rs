//! Token normalizer.
//!
//! Turns raw document text into a [`TokenSequence`]:
//!
//! 1. Lowercase the whole text.
//! 2. Tokenize with [`word_tokenize`](crate::tokenize::word_tokenize).
//! 3. Keep only tokens made entirely of alphabetic characters.
//! 4. Drop English stopwords, plus any extra stopwords the normalizer was
//!    built with.
//!
//! Empty input yields an empty sequence, never an error.

use std::collections::HashSet;

use crate::models::TokenSequence;
use crate::stopwords;
use crate::tokenize::word_tokenize;

/// Normalizes text with the bundled stopword set and optional extras.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    extra_stopwords: HashSet<String>,
}

impl Normalizer {
    /// A normalizer using only the bundled English stopwords.
    pub fn new() -> Self {
        Self::default()
    }

    /// A normalizer that also drops `words` (matched case-insensitively).
    pub fn with_extra_stopwords<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extra_stopwords = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { extra_stopwords }
    }

    pub fn extra_stopwords(&self) -> &HashSet<String> {
        &self.extra_stopwords
    }

    pub fn normalize(&self, text: &str) -> TokenSequence {
        let lowered = text.to_lowercase();
        let tokens = word_tokenize(&lowered)
            .into_iter()
            .filter(|t| is_alphabetic(t))
            .filter(|t| !self.is_stopword(t))
            .collect();
        TokenSequence::from_tokens(tokens)
    }

    fn is_stopword(&self, token: &str) -> bool {
        stopwords::is_stopword(token) || self.extra_stopwords.contains(token)
    }
}

/// Normalize `text` with the default English normalizer.
pub fn normalize(text: &str) -> TokenSequence {
    Normalizer::new().normalize(text)
}

fn is_alphabetic(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphabetic)
}
