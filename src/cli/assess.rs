//! Moat and E-E-A-T commands

use super::{read_json, read_source, RunContext};
use anyhow::Result;
use moatscope::classifier::Tables;
use moatscope::reporters::Report;
use moatscope::scoring::{assess_eeat, extract_moats_with, EeatInput, MoatInput, QuickEeatScore};
use std::path::PathBuf;
use tracing::info;

pub fn run_moats(ctx: &RunContext, input: &MoatInput) -> Result<()> {
    let tables = Tables::from_config(&ctx.config)?;
    let assessment = extract_moats_with(
        input,
        &tables.industries,
        &ctx.config.classifier,
        &ctx.config.moats,
    );
    info!(
        "{}: {} moats, overall {:.1} ({})",
        assessment.brand_name,
        assessment.moats.len(),
        assessment.overall_score,
        assessment.rating
    );
    ctx.emit(Report::Moats(&assessment))
}

pub fn run_eeat(
    ctx: &RunContext,
    input: Option<PathBuf>,
    content_file: Option<PathBuf>,
    url: Option<String>,
    author: Option<String>,
    quick: bool,
) -> Result<()> {
    let mut eeat_input: EeatInput = match (input, content_file) {
        (Some(path), _) => read_json(&path)?,
        (None, Some(path)) => EeatInput {
            content: read_source(&path)?,
            ..Default::default()
        },
        (None, None) => anyhow::bail!("Either --input or --content-file is required"),
    };
    if url.is_some() {
        eeat_input.url = url;
    }
    if author.is_some() {
        eeat_input.author_name = author;
    }

    let assessment = assess_eeat(&eeat_input, &ctx.config.eeat);
    info!(
        "E-E-A-T {:.1} ({}) over {} words",
        assessment.overall_score, assessment.rating, assessment.word_count
    );
    if quick {
        return ctx.emit(Report::QuickEeat(&QuickEeatScore::from(&assessment)));
    }
    ctx.emit(Report::Eeat(&assessment))
}
