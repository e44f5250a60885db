//! # resume-match
//!
//! Scores how well a resume matches a job description.
//!
//! Both documents are reduced to plain text, normalized into content-word
//! tokens, projected into a shared two-document TF-IDF space, and compared
//! by cosine similarity. The result is a score from 0 to 100 plus the terms
//! that produced it.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────────────┐
//! │ PDF / DOCX   │──▶│   extract    │──▶│ resume-match-core    │
//! │  Document    │   │  (RawText)   │   │ normalize ▸ vectorize│
//! └──────────────┘   └──────────────┘   │ ▸ score ▸ explain    │
//!                                       └──────────┬───────────┘
//!                          ┌───────────────────────┤
//!                          ▼                       ▼
//!                    ┌──────────┐           ┌──────────────┐
//!                    │ compare  │           │ rank (rayon) │
//!                    └──────────┘           └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! rmatch compare cv.pdf job.docx
//! rmatch compare cv.pdf --job-text "Senior Rust engineer, distributed systems"
//! rmatch rank --job job.docx alice.pdf bob.docx carol.pdf
//! rmatch inspect cv.pdf
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Documents, reports, rankings |
//! | [`error`] | Error taxonomy with document and stage |
//! | [`extract`] | PDF and DOCX text extraction |
//! | [`compare`] | The [`Matcher`] pipeline and `rmatch compare` |
//! | [`rank`] | Parallel multi-resume ranking |
//! | [`inspect`] | Per-document extraction summary |

pub mod compare;
pub mod config;
pub mod error;
pub mod extract;
pub mod inspect;
pub mod models;
pub mod rank;

#[cfg(test)]
mod test_support;

pub use compare::{compare, JobSource, Matcher};
pub use error::{MatchError, Stage};
pub use extract::{extract_text, DocumentFormat, ExtractError};
pub use models::{Document, MatchReport, Ranking, SimilarityScore};
