//! Reward scoring and preference-pair commands

use super::{read_json, RunContext};
use anyhow::Result;
use moatscope::reporters::Report;
use moatscope::rlhf::{
    aggregate_feedback, mine_preference_pairs, score_response, ImplicitSignal, RewardInput,
};
use std::path::Path;
use tracing::info;

pub fn run_reward(ctx: &RunContext, input: &RewardInput) -> Result<()> {
    if input.response.trim().is_empty() {
        anyhow::bail!("Response text is empty");
    }
    let score = score_response(input, &ctx.config.reward);
    info!("Reward {:.3} (penalty {:.3})", score.total, score.penalty);
    ctx.emit(Report::Reward(&score))
}

pub fn run_pairs(ctx: &RunContext, file: &Path) -> Result<()> {
    let signals: Vec<ImplicitSignal> = read_json(file)?;
    let feedback = aggregate_feedback(&signals);
    let pairs = mine_preference_pairs(&feedback, &ctx.config.feedback);
    info!(
        "{} signals over {} responses gave {} preference pairs",
        signals.len(),
        feedback.len(),
        pairs.len()
    );
    ctx.emit(Report::Feedback {
        feedback: &feedback,
        pairs: &pairs,
    })
}
