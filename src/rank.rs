//! Score many resumes against one job description.
//!
//! The job description is extracted and normalized once. Resumes are then
//! scored independently on a rayon pool, so a bad resume only drops its own
//! entry. A job description that cannot be read fails the whole ranking.

use anyhow::Result;
use chrono::Utc;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::compare::{print_report, read_document, JobSource, Matcher, JOB_TEXT_LABEL};
use crate::config::Config;
use crate::error::MatchError;
use crate::models::{Document, FailedCandidate, MatchReport, RankedCandidate, Ranking, TokenSequence};

impl Matcher {
    /// Rank `resumes` by similarity to `job`.
    pub fn rank(&self, job: &Document, resumes: &[Document]) -> Result<Ranking, MatchError> {
        let job_tokens = self.prepare(job)?;
        self.rank_tokens(job.label(), &job_tokens, resumes)
    }

    /// [`Matcher::rank`] with the job description given as text.
    pub fn rank_job_text(
        &self,
        job_label: &str,
        job_text: &str,
        resumes: &[Document],
    ) -> Result<Ranking, MatchError> {
        let job_tokens = self.normalizer.normalize(job_text);
        self.rank_tokens(job_label, &job_tokens, resumes)
    }

    fn rank_tokens(
        &self,
        job_label: &str,
        job_tokens: &TokenSequence,
        resumes: &[Document],
    ) -> Result<Ranking, MatchError> {
        let score_all = || -> Vec<Result<MatchReport, MatchError>> {
            resumes
                .par_iter()
                .map(|resume| {
                    let tokens = self.prepare(resume)?;
                    self.report(resume.label(), &tokens, job_label, job_tokens)
                })
                .collect()
        };

        let outcomes = match self.threads {
            Some(n) => rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()?
                .install(score_all),
            None => score_all(),
        };

        let mut reports = Vec::with_capacity(resumes.len());
        let mut failed = Vec::new();
        for (resume, outcome) in resumes.iter().zip(outcomes) {
            match outcome {
                Ok(report) => reports.push(report),
                Err(err) => {
                    warn!(
                        resume = resume.label(),
                        stage = %err.stage(),
                        error = %err,
                        "resume could not be scored"
                    );
                    failed.push(FailedCandidate {
                        resume: resume.label().to_string(),
                        stage: err.stage(),
                        error: err.to_string(),
                    });
                }
            }
        }

        reports.sort_by(|a, b| {
            b.score
                .value()
                .partial_cmp(&a.score.value())
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.resume.cmp(&b.resume))
        });

        let ranked: Vec<RankedCandidate> = reports
            .into_iter()
            .enumerate()
            .map(|(i, report)| RankedCandidate { rank: i + 1, report })
            .collect();

        info!(
            job = job_label,
            ranked = ranked.len(),
            failed = failed.len(),
            "ranking complete"
        );

        Ok(Ranking {
            job: job_label.to_string(),
            generated_at: Utc::now(),
            ranked,
            failed,
        })
    }
}

/// Run `rmatch rank`.
pub fn run_rank(
    config: &Config,
    job: &JobSource,
    resumes: &[PathBuf],
    top: Option<usize>,
    json: bool,
) -> Result<()> {
    let mut matcher = Matcher::from_config(config);
    if let Some(n) = top {
        matcher = matcher.with_top_terms(n);
    }

    let documents = resumes
        .iter()
        .map(|p| read_document(p))
        .collect::<Result<Vec<_>>>()?;

    let ranking = match job {
        JobSource::File(path) => matcher.rank(&read_document(path)?, &documents)?,
        JobSource::Text(text) => matcher.rank_job_text(JOB_TEXT_LABEL, text, &documents)?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&ranking)?);
        return Ok(());
    }

    println!("Ranking against {}", ranking.job);
    if ranking.ranked.is_empty() {
        println!("No resumes could be scored.");
    }
    for candidate in &ranking.ranked {
        println!(
            "{:>3}. {:>7}  {}",
            candidate.rank,
            candidate.report.score.to_string(),
            candidate.report.resume
        );
    }
    if !ranking.failed.is_empty() {
        println!();
        println!("Not scored:");
        for f in &ranking.failed {
            println!("  {} ({}): {}", f.resume, f.stage, f.error);
        }
    }
    if let [best] = &ranking.ranked[..] {
        println!();
        print_report(&best.report);
    }
    Ok(())
}
