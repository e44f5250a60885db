//! # resume-match core
//!
//! Pure text-similarity logic for resume-match: data models, tokenizer,
//! stopword set, normalizer, two-document TF-IDF vectorizer, cosine scorer,
//! and term explanation.
//!
//! This crate does no file, format, or network I/O. Callers hand it plain
//! text and get back tokens, vectors, and scores.
//!
//! ```rust
//! use resume_match_core::{normalize, score, vectorize_pair};
//!
//! let resume = normalize("Rust engineer who likes distributed systems");
//! let job = normalize("Distributed systems engineer, Rust");
//! let space = vectorize_pair(&resume.join(), &job.join()).unwrap();
//! let s = score(space.vector_a(), space.vector_b());
//! assert!(s.value() > 50.0);
//! ```

pub mod explain;
pub mod models;
pub mod normalize;
pub mod score;
pub mod stopwords;
pub mod tokenize;
pub mod vectorize;

pub use explain::{explain, MatchExplanation, TermContribution, TermWeight};
pub use models::{RawText, SimilarityScore, TokenSequence};
pub use normalize::{normalize, Normalizer};
pub use score::{cosine_similarity, score};
pub use vectorize::{vectorize_pair, vectorize_pair_with, VectorSpace, VectorizeError};
