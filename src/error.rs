//! Error taxonomy for a comparison.
//!
//! Every failure names the document it came from (when there is one) and
//! the pipeline stage that failed, so a caller can show a specific message.
//! None of these are retried: they come from deterministic properties of
//! the input.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use resume_match_core::VectorizeError;

use crate::extract::{DocumentFormat, ExtractError};

/// Pipeline stage a [`MatchError`] was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Format,
    Extraction,
    Vectorization,
    Ranking,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Format => "format",
            Stage::Extraction => "extraction",
            Stage::Vectorization => "vectorization",
            Stage::Ranking => "ranking",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("{document}: unsupported document format '{tag}' (supported: {supported})", supported = DocumentFormat::supported_tags())]
    UnsupportedFormat { document: String, tag: String },

    #[error("{document}: {format} text extraction failed: {message}")]
    Extraction {
        document: String,
        format: DocumentFormat,
        message: String,
    },

    /// Neither document produced a usable term. Callers should report
    /// "no comparable content" rather than a 0% score.
    #[error("no comparable content: {0}")]
    EmptyVocabulary(#[from] VectorizeError),

    #[error("failed to start ranking worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

impl MatchError {
    /// Attach the document label to a low-level extraction error.
    pub fn from_extract(document: &str, err: ExtractError) -> Self {
        let document = document.to_string();
        match err {
            ExtractError::UnsupportedFormat(tag) => MatchError::UnsupportedFormat { document, tag },
            ExtractError::Pdf(message) => MatchError::Extraction {
                document,
                format: DocumentFormat::Pdf,
                message,
            },
            ExtractError::Docx(message) => MatchError::Extraction {
                document,
                format: DocumentFormat::Docx,
                message,
            },
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            MatchError::UnsupportedFormat { .. } => Stage::Format,
            MatchError::Extraction { .. } => Stage::Extraction,
            MatchError::EmptyVocabulary(_) => Stage::Vectorization,
            MatchError::WorkerPool(_) => Stage::Ranking,
        }
    }

    /// Label of the offending document, for per-document errors.
    pub fn document(&self) -> Option<&str> {
        match self {
            MatchError::UnsupportedFormat { document, .. }
            | MatchError::Extraction { document, .. } => Some(document),
            MatchError::EmptyVocabulary(_) | MatchError::WorkerPool(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_format_names_document_and_tag() {
        let err = MatchError::from_extract(
            "cv.txt",
            ExtractError::UnsupportedFormat("txt".to_string()),
        );
        assert_eq!(err.stage(), Stage::Format);
        assert_eq!(err.document(), Some("cv.txt"));
        let msg = err.to_string();
        assert!(msg.contains("cv.txt"), "{msg}");
        assert!(msg.contains("'txt'"), "{msg}");
        assert!(msg.contains("pdf, docx"), "{msg}");
    }

    #[test]
    fn extraction_error_keeps_format() {
        let err = MatchError::from_extract("cv.docx", ExtractError::Docx("bad zip".to_string()));
        assert_eq!(err.stage(), Stage::Extraction);
        assert_eq!(err.to_string(), "cv.docx: docx text extraction failed: bad zip");
    }

    #[test]
    fn empty_vocabulary_has_no_document() {
        let err = MatchError::from(VectorizeError::EmptyVocabulary { min_term_len: 2 });
        assert_eq!(err.stage(), Stage::Vectorization);
        assert_eq!(err.document(), None);
        assert!(err.to_string().starts_with("no comparable content"));
    }

    #[test]
    fn stage_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Stage::Extraction).unwrap(), "\"extraction\"");
        assert_eq!(Stage::Vectorization.to_string(), "vectorization");
    }
}
