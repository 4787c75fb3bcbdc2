//! Finance projection command

use super::RunContext;
use anyhow::{Context, Result};
use moatscope::finance::{project, FinanceInput};
use moatscope::reporters::Report;
use tracing::info;

pub fn run(ctx: &RunContext, input: &FinanceInput) -> Result<()> {
    let projection = project(input).context("Cannot project these inputs")?;
    info!(
        "Projected {} months, ending MRR {:.2}",
        projection.months.len(),
        projection.summary.ending_mrr
    );
    ctx.emit(Report::Finance(&projection))
}
