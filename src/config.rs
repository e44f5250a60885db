//! TOML configuration for the matcher and the `rmatch` binary.
//!
//! Every section is optional; a missing section or key takes the default
//! shown below.
//!
//! ```toml
//! [normalize]
//! extra_stopwords = ["resume", "curriculum", "vitae"]
//!
//! [vectorize]
//! min_term_len = 2
//!
//! [report]
//! top_terms = 10
//!
//! [rank]
//! threads = 4
//!
//! [logging]
//! level = "warn"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use resume_match_core::vectorize::DEFAULT_MIN_TERM_LEN;

/// Config path used when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "./config/rmatch.toml";

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub normalize: NormalizeConfig,
    #[serde(default)]
    pub vectorize: VectorizeConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub rank: RankConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct NormalizeConfig {
    /// Removed in addition to the built-in English stopwords.
    #[serde(default)]
    pub extra_stopwords: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct VectorizeConfig {
    #[serde(default = "default_min_term_len")]
    pub min_term_len: usize,
}

impl Default for VectorizeConfig {
    fn default() -> Self {
        Self {
            min_term_len: default_min_term_len(),
        }
    }
}

fn default_min_term_len() -> usize {
    DEFAULT_MIN_TERM_LEN
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportConfig {
    /// Shared and missing terms listed per report.
    #[serde(default = "default_top_terms")]
    pub top_terms: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_terms: default_top_terms(),
        }
    }
}

pub(crate) fn default_top_terms() -> usize {
    10
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct RankConfig {
    /// Worker threads for `rank`. Unset uses the global rayon pool.
    #[serde(default)]
    pub threads: Option<usize>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Tracing filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    validate(&config)?;
    Ok(config)
}

/// Load `--config` when given. Otherwise load the default path if it
/// exists, falling back to built-in defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => load_config(path),
        None => {
            let path = Path::new(DEFAULT_CONFIG_PATH);
            if path.exists() {
                load_config(path)
            } else {
                Ok(Config::default())
            }
        }
    }
}

fn validate(config: &Config) -> Result<()> {
    if config.vectorize.min_term_len == 0 {
        anyhow::bail!("vectorize.min_term_len must be >= 1");
    }

    if config.report.top_terms == 0 {
        anyhow::bail!("report.top_terms must be >= 1");
    }

    if config.rank.threads == Some(0) {
        anyhow::bail!("rank.threads must be >= 1 when set");
    }

    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        anyhow::bail!(
            "Unknown logging.level: '{}'. Must be one of {}.",
            config.logging.level,
            LOG_LEVELS.join(", ")
        );
    }

    Ok(())
}
