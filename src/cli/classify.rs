//! Classify and batch commands

use super::{read_source, RunContext};
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use moatscope::classifier::{classify_batch, classify_query_with, Tables};
use moatscope::reporters::Report;
use std::path::Path;
use tracing::info;

/// Classify one query
pub fn run(ctx: &RunContext, text: &str, hint: Option<&str>) -> Result<()> {
    let tables = Tables::from_config(&ctx.config)?;
    let result = classify_query_with(&tables, &ctx.config.classifier, text, hint);
    info!(
        "Classified as {} / {}",
        result.industry.category_id, result.intent.category_id
    );
    ctx.emit(Report::Classification(&result))
}

/// Classify every non-empty, non-comment line of a file
pub fn run_batch(ctx: &RunContext, file: &Path) -> Result<()> {
    let queries = parse_queries(&read_source(file)?);
    if queries.is_empty() {
        anyhow::bail!("No queries found in {}", file.display());
    }
    let tables = Tables::from_config(&ctx.config)?;

    let bar = ProgressBar::new(queries.len() as u64);
    bar.set_style(create_bar_style());
    bar.set_message("classifying");
    let report = classify_batch(&tables, &ctx.config.classifier, &queries, || bar.inc(1));
    bar.finish_and_clear();

    info!(
        "Classified {} queries into {} industries",
        report.total,
        report.distribution.len()
    );
    ctx.emit(Report::Batch(&report))
}

fn parse_queries(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect()
}

fn create_bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .expect("valid template")
        .progress_chars("█▓▒░  ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_queries_skips_blanks_and_comments() {
        let queries = parse_queries("# header\nbest crm\n\n  tax software  \n#skip\n");
        assert_eq!(queries, vec!["best crm", "tax software"]);
    }
}
