//! `rmatch inspect`: show what the pipeline sees in one document.

use anyhow::Result;
use std::collections::HashSet;
use std::path::Path;

use crate::compare::{read_document, Matcher};
use crate::config::Config;
use crate::error::MatchError;
use crate::extract::DocumentFormat;
use crate::models::{Document, Inspection};

impl Matcher {
    /// Extract and normalize `document` without comparing it.
    pub fn inspect(&self, document: &Document) -> Result<Inspection, MatchError> {
        let format = DocumentFormat::from_tag(document.format_tag())
            .map_err(|e| MatchError::from_extract(document.label(), e))?;
        let raw = self.extract(document)?;
        let tokens = self.normalizer.normalize(raw.as_str());
        let distinct_tokens = tokens
            .tokens()
            .iter()
            .map(String::as_str)
            .collect::<HashSet<_>>()
            .len();

        Ok(Inspection {
            document: document.label().to_string(),
            format: format.tag().to_string(),
            characters: raw.char_count(),
            distinct_tokens,
            tokens,
        })
    }
}

pub fn run_inspect(config: &Config, path: &Path, json: bool) -> Result<()> {
    let document = read_document(path)?;
    let inspection = Matcher::from_config(config).inspect(&document)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&inspection)?);
        return Ok(());
    }

    println!("{} ({})", inspection.document, inspection.format);
    println!("  characters: {}", inspection.characters);
    println!(
        "  tokens:     {} ({} distinct)",
        inspection.tokens.len(),
        inspection.distinct_tokens
    );
    if !inspection.tokens.is_empty() {
        println!();
        println!("{}", inspection.tokens.join());
    }
    Ok(())
}
