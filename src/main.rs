//! # resume-match CLI (`rmatch`)
//!
//! Scores resumes against a job description with TF-IDF cosine similarity.
//!
//! ## Usage
//!
//! ```bash
//! rmatch --config ./config/rmatch.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `rmatch compare <RESUME> <JOB>` | Score one resume against one job description |
//! | `rmatch rank --job <JOB> <RESUME>...` | Rank several resumes, best first |
//! | `rmatch inspect <FILE>` | Show extracted text size and normalized tokens |
//!
//! `compare` and `rank` accept `--job-text "<text>"` instead of a job file.
//!
//! ## Examples
//!
//! ```bash
//! # Score a PDF resume against a DOCX posting
//! rmatch compare cv.pdf posting.docx
//!
//! # Paste the posting instead of pointing at a file
//! rmatch compare cv.pdf --job-text "Backend engineer, Rust, PostgreSQL"
//!
//! # Rank a folder of resumes and emit JSON
//! rmatch --json rank --job posting.docx resumes/*.pdf
//! ```

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_match::compare::{run_compare, JobSource};
use resume_match::config::resolve_config;
use resume_match::inspect::run_inspect;
use resume_match::rank::run_rank;

/// Score resumes against a job description.
#[derive(Parser)]
#[command(
    name = "rmatch",
    about = "Score resumes against a job description with TF-IDF cosine similarity",
    version,
    long_about = "rmatch extracts text from PDF and DOCX documents, removes stopwords, \
    and compares a resume with a job description by cosine similarity of their TF-IDF \
    vectors. Scores range from 0 to 100."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/rmatch.toml`; built-in defaults are used when
    /// that file does not exist.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print machine-readable JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    /// Number of shared and missing terms to list (overrides `report.top_terms`).
    #[arg(long, global = true, value_parser = parse_top)]
    top: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Score one resume against one job description.
    Compare {
        /// Resume file (.pdf or .docx).
        resume: PathBuf,

        #[command(flatten)]
        job: JobArgs,
    },

    /// Rank resumes by similarity to a job description.
    ///
    /// Resumes that cannot be read are listed separately and do not stop
    /// the ranking.
    Rank {
        #[command(flatten)]
        job: RankJobArgs,

        /// Resume files (.pdf or .docx).
        #[arg(required = true)]
        resumes: Vec<PathBuf>,
    },

    /// Show the extracted text size and normalized tokens of a document.
    Inspect {
        /// Document file (.pdf or .docx).
        file: PathBuf,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct JobArgs {
    /// Job description file (.pdf or .docx).
    job: Option<PathBuf>,

    /// Job description text.
    #[arg(long)]
    job_text: Option<String>,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct RankJobArgs {
    /// Job description file (.pdf or .docx).
    #[arg(long)]
    job: Option<PathBuf>,

    /// Job description text.
    #[arg(long)]
    job_text: Option<String>,
}

fn job_source(file: Option<PathBuf>, text: Option<String>) -> Result<JobSource> {
    match (file, text) {
        (Some(path), None) => Ok(JobSource::File(path)),
        (None, Some(text)) => Ok(JobSource::Text(text)),
        _ => anyhow::bail!("exactly one of a job description file or --job-text is required"),
    }
}

fn parse_top(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = resolve_config(cli.config.as_deref())?;
    init_tracing(&cfg.logging.level);

    match cli.command {
        Commands::Compare { resume, job } => {
            let job = job_source(job.job, job.job_text)?;
            run_compare(&cfg, &resume, &job, cli.top, cli.json)?;
        }
        Commands::Rank { job, resumes } => {
            let job = job_source(job.job, job.job_text)?;
            run_rank(&cfg, &job, &resumes, cli.top, cli.json)?;
        }
        Commands::Inspect { file } => {
            run_inspect(&cfg, &file, cli.json)?;
        }
    }

    Ok(())
}
