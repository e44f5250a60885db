//! Data types exchanged between the caller and the matching pipeline.
//!
//! A [`Document`] goes in; a [`MatchReport`] or a [`Ranking`] comes out.
//! Text-level types ([`RawText`], [`TokenSequence`], [`SimilarityScore`])
//! come from the core crate.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

pub use resume_match_core::{
    MatchExplanation, RawText, SimilarityScore, TermContribution, TermWeight, TokenSequence,
};

use crate::error::Stage;

/// Raw document bytes plus the format tag the caller declared for them.
///
/// The tag is resolved only at extraction time, so an unknown tag surfaces
/// as an unsupported-format error from the comparison rather than here.
#[derive(Debug, Clone)]
pub struct Document {
    label: String,
    format_tag: String,
    bytes: Vec<u8>,
}

impl Document {
    pub fn new(label: impl Into<String>, format_tag: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            label: label.into(),
            format_tag: format_tag.into(),
            bytes,
        }
    }

    /// Read a file, labelling it by file name and tagging it by extension.
    ///
    /// A file without an extension gets an empty tag.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let label = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let format_tag = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        Ok(Self::new(label, format_tag, bytes))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn format_tag(&self) -> &str {
        &self.format_tag
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Result of comparing one resume against one job description.
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub resume: String,
    pub job: String,
    pub score: SimilarityScore,
    /// Normalized token counts of each side.
    pub resume_tokens: usize,
    pub job_tokens: usize,
    /// Size of the shared vocabulary.
    pub vocabulary: usize,
    #[serde(flatten)]
    pub explanation: MatchExplanation,
}

/// A scored resume and its 1-based position.
#[derive(Debug, Clone, Serialize)]
pub struct RankedCandidate {
    pub rank: usize,
    #[serde(flatten)]
    pub report: MatchReport,
}

/// A resume that could not be scored.
#[derive(Debug, Clone, Serialize)]
pub struct FailedCandidate {
    pub resume: String,
    pub stage: Stage,
    pub error: String,
}

/// Resumes ordered by score against one job description.
#[derive(Debug, Clone, Serialize)]
pub struct Ranking {
    pub job: String,
    pub generated_at: DateTime<Utc>,
    /// Highest score first; equal scores ordered by resume label.
    pub ranked: Vec<RankedCandidate>,
    pub failed: Vec<FailedCandidate>,
}

/// Extraction and normalization summary for a single document.
#[derive(Debug, Clone, Serialize)]
pub struct Inspection {
    pub document: String,
    pub format: String,
    pub characters: usize,
    pub distinct_tokens: usize,
    pub tokens: TokenSequence,
}
