//! The comparison pipeline and the `rmatch compare` command.
//!
//! ```text
//! Document ─► extract_text ─► RawText ─► normalize ─► TokenSequence ─┐
//! Document ─► extract_text ─► RawText ─► normalize ─► TokenSequence ─┤
//!                                                                     ▼
//!                                  vectorize_pair ─► score ─► SimilarityScore
//! ```
//!
//! A [`Matcher`] carries the tunables (extra stopwords, minimum term
//! length, explanation size, ranking threads). It holds no mutable state,
//! so one matcher can serve any number of comparisons concurrently.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

use resume_match_core::vectorize::DEFAULT_MIN_TERM_LEN;
use resume_match_core::{explain, score, vectorize_pair_with, Normalizer};

use crate::config::{default_top_terms, Config};
use crate::error::MatchError;
use crate::extract::extract_text;
use crate::models::{Document, MatchReport, RawText, SimilarityScore, TokenSequence};

/// Label given to a job description passed inline rather than as a file.
pub const JOB_TEXT_LABEL: &str = "job description (text)";

/// Compares resumes with job descriptions.
#[derive(Debug, Clone)]
pub struct Matcher {
    pub(crate) normalizer: Normalizer,
    pub(crate) min_term_len: usize,
    pub(crate) top_terms: usize,
    pub(crate) threads: Option<usize>,
}

impl Default for Matcher {
    fn default() -> Self {
        Self {
            normalizer: Normalizer::new(),
            min_term_len: DEFAULT_MIN_TERM_LEN,
            top_terms: default_top_terms(),
            threads: None,
        }
    }
}

impl Matcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            normalizer: Normalizer::with_extra_stopwords(&config.normalize.extra_stopwords),
            min_term_len: config.vectorize.min_term_len,
            top_terms: config.report.top_terms,
            threads: config.rank.threads,
        }
    }

    /// Number of shared and missing terms kept in each report.
    pub fn with_top_terms(mut self, top_terms: usize) -> Self {
        self.top_terms = top_terms.max(1);
        self
    }

    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads.filter(|n| *n > 0);
        self
    }

    pub fn extract(&self, document: &Document) -> Result<RawText, MatchError> {
        extract_text(document).map_err(|e| MatchError::from_extract(document.label(), e))
    }

    /// Extract and normalize one document.
    pub fn prepare(&self, document: &Document) -> Result<TokenSequence, MatchError> {
        let raw = self.extract(document)?;
        let tokens = self.normalizer.normalize(raw.as_str());
        debug!(
            document = document.label(),
            chars = raw.char_count(),
            tokens = tokens.len(),
            "normalized document"
        );
        Ok(tokens)
    }

    /// Similarity of two documents on a 0–100 scale.
    pub fn compare(&self, a: &Document, b: &Document) -> Result<SimilarityScore, MatchError> {
        let tokens_a = self.prepare(a)?;
        let tokens_b = self.prepare(b)?;
        self.score_tokens(&tokens_a, &tokens_b)
    }

    /// Like [`Matcher::compare`] for text that is already extracted.
    pub fn compare_texts(&self, a: &str, b: &str) -> Result<SimilarityScore, MatchError> {
        let tokens_a = self.normalizer.normalize(a);
        let tokens_b = self.normalizer.normalize(b);
        self.score_tokens(&tokens_a, &tokens_b)
    }

    /// Score a resume against a job description and explain the score.
    pub fn analyze(&self, resume: &Document, job: &Document) -> Result<MatchReport, MatchError> {
        let resume_tokens = self.prepare(resume)?;
        let job_tokens = self.prepare(job)?;
        self.report(resume.label(), &resume_tokens, job.label(), &job_tokens)
    }

    /// [`Matcher::analyze`] with the job description given as text.
    pub fn analyze_job_text(
        &self,
        resume: &Document,
        job_label: &str,
        job_text: &str,
    ) -> Result<MatchReport, MatchError> {
        let resume_tokens = self.prepare(resume)?;
        let job_tokens = self.normalizer.normalize(job_text);
        self.report(resume.label(), &resume_tokens, job_label, &job_tokens)
    }

    /// [`Matcher::analyze`] for two texts.
    pub fn analyze_texts(
        &self,
        resume_label: &str,
        resume_text: &str,
        job_label: &str,
        job_text: &str,
    ) -> Result<MatchReport, MatchError> {
        let resume_tokens = self.normalizer.normalize(resume_text);
        let job_tokens = self.normalizer.normalize(job_text);
        self.report(resume_label, &resume_tokens, job_label, &job_tokens)
    }

    fn score_tokens(
        &self,
        a: &TokenSequence,
        b: &TokenSequence,
    ) -> Result<SimilarityScore, MatchError> {
        let space = vectorize_pair_with(&a.join(), &b.join(), self.min_term_len)?;
        Ok(score(space.vector_a(), space.vector_b()))
    }

    pub(crate) fn report(
        &self,
        resume_label: &str,
        resume_tokens: &TokenSequence,
        job_label: &str,
        job_tokens: &TokenSequence,
    ) -> Result<MatchReport, MatchError> {
        let space = vectorize_pair_with(&resume_tokens.join(), &job_tokens.join(), self.min_term_len)?;
        let score = score(space.vector_a(), space.vector_b());
        debug!(resume = resume_label, job = job_label, %score, "scored pair");
        Ok(MatchReport {
            resume: resume_label.to_string(),
            job: job_label.to_string(),
            score,
            resume_tokens: resume_tokens.len(),
            job_tokens: job_tokens.len(),
            vocabulary: space.dimensions(),
            explanation: explain(&space, self.top_terms),
        })
    }
}

/// Compare two documents with default settings.
pub fn compare(a: &Document, b: &Document) -> Result<SimilarityScore, MatchError> {
    Matcher::default().compare(a, b)
}

/// Where the job description for a command comes from.
#[derive(Debug, Clone)]
pub enum JobSource {
    File(PathBuf),
    Text(String),
}

pub(crate) fn read_document(path: &Path) -> Result<Document> {
    Document::from_path(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Run `rmatch compare`.
pub fn run_compare(
    config: &Config,
    resume: &Path,
    job: &JobSource,
    top: Option<usize>,
    json: bool,
) -> Result<()> {
    let mut matcher = Matcher::from_config(config);
    if let Some(n) = top {
        matcher = matcher.with_top_terms(n);
    }

    let resume = read_document(resume)?;
    let report = match job {
        JobSource::File(path) => matcher.analyze(&resume, &read_document(path)?)?,
        JobSource::Text(text) => matcher.analyze_job_text(&resume, JOB_TEXT_LABEL, text)?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

pub(crate) fn print_report(report: &MatchReport) {
    println!("Match score: {}", report.score);
    println!("  resume: {} ({} terms)", report.resume, report.resume_tokens);
    println!("  job:    {} ({} terms)", report.job, report.job_tokens);
    println!("  vocabulary: {} terms", report.vocabulary);

    if !report.explanation.shared_terms.is_empty() {
        println!();
        println!("Shared terms:");
        for t in &report.explanation.shared_terms {
            println!(
                "  {:<24} resume {:.3}  job {:.3}",
                t.term, t.weight_a, t.weight_b
            );
        }
    }

    if !report.explanation.missing_terms.is_empty() {
        println!();
        println!("Missing from resume:");
        for t in &report.explanation.missing_terms {
            println!("  {:<24} {:.3}", t.term, t.weight);
        }
    }
}
