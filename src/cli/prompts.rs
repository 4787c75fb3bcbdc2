//! Prompt selection and glossary commands

use super::RunContext;
use anyhow::Result;
use moatscope::classifier::Tables;
use moatscope::prompts::{
    glossary_entries, glossary_lookup, select_for_query_with, select_prompts_with, PromptRequest,
};
use moatscope::reporters::Report;
use tracing::info;

pub fn run(ctx: &RunContext, request: &PromptRequest) -> Result<()> {
    let tables = Tables::from_config(&ctx.config)?;
    let selection = select_prompts_with(&tables, request)?;
    info!(
        "Selected {} prompts for {}",
        selection.prompts.len(),
        selection.industry_id
    );
    ctx.emit(Report::Prompts(&selection))
}

pub fn run_for_query(ctx: &RunContext, query: &str, brand: Option<&str>, limit: usize) -> Result<()> {
    let tables = Tables::from_config(&ctx.config)?;
    let selection = select_for_query_with(&tables, &ctx.config.classifier, query, brand, limit)?;
    info!(
        "Selected {} prompts for {} / {}",
        selection.prompts.len(),
        selection.industry_id,
        selection.intent.as_deref().unwrap_or("-")
    );
    ctx.emit(Report::Prompts(&selection))
}

pub fn run_glossary(ctx: &RunContext, term: Option<&str>) -> Result<()> {
    match term {
        None => ctx.emit(Report::Glossary(glossary_entries())),
        Some(t) => {
            let entry = glossary_lookup(t)
                .ok_or_else(|| anyhow::anyhow!("Unknown term '{}'. Run `moatscope glossary` for the list", t))?;
            ctx.emit(Report::Glossary(std::slice::from_ref(entry)))
        }
    }
}
