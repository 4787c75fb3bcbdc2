//! JSON reporter
//!
//! Outputs the full result as pretty-printed JSON.
//! Useful for machine consumption, piping to jq, or further processing.

use super::Report;
use anyhow::Result;
use serde_json::{json, Value};

fn to_value(report: Report<'_>) -> Result<Value> {
    Ok(match report {
        Report::Classification(c) => serde_json::to_value(c)?,
        Report::Batch(b) => serde_json::to_value(b)?,
        Report::Moats(m) => serde_json::to_value(m)?,
        Report::Eeat(e) => serde_json::to_value(e)?,
        Report::QuickEeat(q) => serde_json::to_value(q)?,
        Report::Reward(r) => serde_json::to_value(r)?,
        Report::Feedback { feedback, pairs } => json!({
            "feedback": feedback,
            "pairs": pairs,
        }),
        Report::Finance(f) => serde_json::to_value(f)?,
        Report::Prompts(p) => serde_json::to_value(p)?,
        Report::Glossary(g) => serde_json::to_value(g)?,
    })
}

/// Render result as JSON
pub fn render(report: Report<'_>) -> Result<String> {
    Ok(serde_json::to_string_pretty(&to_value(report)?)?)
}
