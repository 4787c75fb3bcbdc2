//! Markdown reporter for GitHub-flavored Markdown output
//!
//! Generates reports suitable for:
//! - Pull request comments
//! - Client briefs
//! - Documentation

use super::{money, Report};
use crate::classifier::{BatchReport, QueryClassification};
use crate::finance::FinanceProjection;
use crate::models::{DimensionScore, ScoreResult};
use crate::prompts::{GlossaryEntry, PromptSelection};
use crate::rlhf::{PreferencePair, ResponseFeedback, RewardScore};
use crate::scoring::{EeatAssessment, MoatAssessment, QuickEeatScore};
use anyhow::Result;
use chrono::Local;

/// Batch rows shown before the table is cut off
const MAX_BATCH_ROWS: usize = 50;

/// Render a result as GitHub-flavored Markdown
pub fn render(report: Report<'_>) -> Result<String> {
    let mut md = match report {
        Report::Classification(c) => render_classification(c),
        Report::Batch(b) => render_batch(b),
        Report::Moats(m) => render_moats(m),
        Report::Eeat(e) => render_eeat(e),
        Report::QuickEeat(q) => render_quick_eeat(q),
        Report::Reward(r) => render_reward(r),
        Report::Feedback { feedback, pairs } => render_feedback(feedback, pairs),
        Report::Finance(f) => render_finance(f),
        Report::Prompts(p) => render_prompts(p),
        Report::Glossary(g) => render_glossary(g),
    };
    md.push('\n');
    md.push_str(&render_footer());
    Ok(md)
}

fn render_header(title: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    format!("# {title}\n\nGenerated: {timestamp}\n\n")
}

fn render_result_row(label: &str, r: &ScoreResult) -> String {
    let signals = if r.matched_signals.is_empty() {
        "-".to_string()
    } else {
        r.matched_signals
            .iter()
            .map(|s| format!("`{}`", escape(s)))
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!(
        "| {label} | {} (`{}`) | {:.2} | {signals} |\n",
        r.category_name, r.category_id, r.confidence
    )
}

fn render_classification(c: &QueryClassification) -> String {
    let mut md = render_header("Query Classification");
    md.push_str(&format!("> {}\n\n", c.query));
    md.push_str("| | Category | Confidence | Signals |\n|--|----------|------------|---------|\n");
    md.push_str(&render_result_row("Industry", &c.industry));
    md.push_str(&render_result_row("Intent", &c.intent));
    md
}

fn render_batch(b: &BatchReport) -> String {
    let mut md = render_header(&format!("Batch Classification ({} queries)", b.total));

    md.push_str("## Industry Distribution\n\n| Industry | Queries | Share |\n|----------|---------|-------|\n");
    for (id, count) in &b.distribution {
        let share = if b.total > 0 {
            *count as f64 / b.total as f64 * 100.0
        } else {
            0.0
        };
        md.push_str(&format!("| `{id}` | {count} | {share:.1}% |\n"));
    }

    md.push_str("\n## Queries\n\n| Query | Industry | Intent |\n|-------|----------|--------|\n");
    for row in b.rows.iter().take(MAX_BATCH_ROWS) {
        md.push_str(&format!(
            "| {} | `{}` {:.2} | `{}` {:.2} |\n",
            escape(&row.query),
            row.industry_id,
            row.industry_confidence,
            row.intent_id,
            row.intent_confidence
        ));
    }
    if b.rows.len() > MAX_BATCH_ROWS {
        md.push_str(&format!(
            "\n*...and {} more*\n",
            b.rows.len() - MAX_BATCH_ROWS
        ));
    }
    md
}

fn render_dimension_table(dims: &[DimensionScore], first_column: &str) -> String {
    let mut md = format!(
        "| {first_column} | Score | Status | Bucket |\n|----------|-------|--------|--------|\n"
    );
    for d in dims {
        md.push_str(&format!(
            "| {} | {:.1}/100 | {} | {} |\n",
            d.name,
            d.score,
            score_indicator(d.score),
            d.bucket
        ));
    }
    md
}

fn render_recommendations(recommendations: &[String]) -> String {
    if recommendations.is_empty() {
        return String::new();
    }
    let mut md = String::from("\n## Recommendations\n\n");
    for (i, rec) in recommendations.iter().enumerate() {
        md.push_str(&format!("{}. {}\n", i + 1, rec));
    }
    md
}

fn render_moats(m: &MoatAssessment) -> String {
    let mut md = render_header(&format!("Moat Assessment: {}", m.brand_name));
    md.push_str(&format!(
        "**Moat: {}** | **Score: {:.1}/100** | Industry: {} (`{}`{})\n\n",
        capitalize(&m.rating.to_string()),
        m.overall_score,
        m.industry_name,
        m.industry_id,
        if m.industry_detected { ", detected" } else { "" }
    ));

    md.push_str("## Moats\n\n");
    if m.moats.is_empty() {
        md.push_str("No moat detected.\n");
    }
    for moat in &m.moats {
        md.push_str(&format!(
            "### {} ({})\n\n**Score:** {:.1}/100\n\n",
            moat.name,
            capitalize(&moat.strength.to_string()),
            moat.score
        ));
        for evidence in &moat.evidence {
            md.push_str(&format!("- {evidence}\n"));
        }
        md.push('\n');
    }

    md.push_str("## All Categories\n\n");
    md.push_str(&render_dimension_table(&m.dimensions, "Category"));
    md.push_str(&render_recommendations(&m.recommendations));
    md
}

fn render_eeat(e: &EeatAssessment) -> String {
    let mut md = render_header("E-E-A-T Assessment");
    md.push_str(&format!(
        "**Rating: {}** | **Score: {:.1}/100** | Words: {}\n\n",
        capitalize(&e.rating.to_string()),
        e.overall_score,
        e.word_count
    ));
    md.push_str("## Dimensions\n\n");
    md.push_str(&render_dimension_table(&e.dimensions, "Dimension"));

    for d in &e.dimensions {
        if d.evidence.is_empty() {
            continue;
        }
        md.push_str(&format!("\n**{}**\n\n", d.name));
        for evidence in &d.evidence {
            md.push_str(&format!("- {evidence}\n"));
        }
    }
    md.push_str(&render_recommendations(&e.recommendations));
    md
}

fn render_quick_eeat(q: &QuickEeatScore) -> String {
    let mut md = render_header("Quick E-E-A-T Score");
    md.push_str(&format!(
        "**Rating: {}** | **Score: {:.1}/100**\n\n",
        capitalize(&q.rating.to_string()),
        q.score
    ));
    md.push_str("| Dimension | Score | Status |\n|-----------|-------|--------|\n");
    for (name, score) in [
        ("Experience", q.experience),
        ("Expertise", q.expertise),
        ("Authoritativeness", q.authoritativeness),
        ("Trustworthiness", q.trustworthiness),
    ] {
        md.push_str(&format!(
            "| {name} | {score:.1}/100 | {} |\n",
            score_indicator(score)
        ));
    }
    md
}

fn render_reward(r: &RewardScore) -> String {
    let mut md = render_header("Response Reward");
    md.push_str(&format!(
        "**Reward: {:.3}** | Words: {}\n\n",
        r.total, r.word_count
    ));

    let c = &r.components;
    md.push_str(&format!(
        r#"| Component | Value |
|-----------|-------|
| Relevance | {:.3} |
| Length | {:.3} |
| Structure | {:.3} |
| Specificity | {:.3} |
| Grounding | {:.3} |
| **Penalty** | **-{:.3}** |
"#,
        c.relevance, c.length, c.structure, c.specificity, c.grounding, r.penalty
    ));

    if r.refusal {
        md.push_str("\n❌ The response reads as a refusal.\n");
    }
    if r.hedge_count > 0 {
        md.push_str(&format!("\n⚠️ {} hedging phrases.\n", r.hedge_count));
    }
    if let Some(mentioned) = r.brand_mentioned {
        md.push_str(&format!(
            "\nBrand mentioned: {}\n",
            if mentioned { "yes" } else { "no" }
        ));
    }
    md
}

fn render_feedback(feedback: &[ResponseFeedback], pairs: &[PreferencePair]) -> String {
    let mut md = render_header("Implicit Feedback");

    md.push_str("## Responses\n\n| Prompt | Response | Preference | Events | + | - |\n|--------|----------|------------|--------|---|---|\n");
    for f in feedback {
        md.push_str(&format!(
            "| `{}` | `{}` | {:+.3} | {} | {} | {} |\n",
            f.prompt_id, f.response_id, f.preference, f.signal_count, f.positive, f.negative
        ));
    }

    md.push_str(&format!("\n## Preference Pairs ({})\n\n", pairs.len()));
    if pairs.is_empty() {
        md.push_str("No pairs met the margin.\n");
        return md;
    }
    md.push_str("| Prompt | Chosen | Rejected | Margin |\n|--------|--------|----------|--------|\n");
    for p in pairs {
        md.push_str(&format!(
            "| `{}` | `{}` | `{}` | {:.3} |\n",
            p.prompt_id, p.chosen, p.rejected, p.margin
        ));
    }
    md
}

fn render_finance(f: &FinanceProjection) -> String {
    let mut md = render_header(&format!("MRR Projection ({} months)", f.months.len()));
    let s = &f.summary;

    md.push_str(&format!(
        r#"## Summary

| Metric | Value |
|--------|-------|
| Starting MRR | {} |
| Ending MRR | {} |
| Ending ARR | {} |
| Ending customers | {:.1} |
| MRR growth | {} |
| Net revenue retention | {:.1}% |
| LTV | {} |
| CAC payback | {} |
| LTV:CAC | {} |
"#,
        money(s.starting_mrr),
        money(s.ending_mrr),
        money(s.ending_arr),
        s.ending_customers,
        optional(s.mrr_growth_pct, |g| format!("{g:.1}%")),
        s.net_revenue_retention,
        optional(s.ltv, money),
        optional(s.cac_payback_months, |m| format!("{m:.1} months")),
        optional(s.ltv_to_cac, |r| format!("{r:.1}")),
    ));

    md.push_str("\n## Months\n\n| Month | Customers | New MRR | Churned MRR | Expansion MRR | MRR | ARR |\n|-------|-----------|---------|-------------|---------------|-----|-----|\n");
    for m in &f.months {
        md.push_str(&format!(
            "| {} | {:.1} | {} | {} | {} | {} | {} |\n",
            m.month,
            m.customers,
            money(m.new_mrr),
            money(m.churned_mrr),
            money(m.expansion_mrr),
            money(m.mrr),
            money(m.arr)
        ));
    }
    md
}

fn optional(value: Option<f64>, fmt: impl Fn(f64) -> String) -> String {
    value.map(fmt).unwrap_or_else(|| "n/a".to_string())
}

fn render_prompts(p: &PromptSelection) -> String {
    let mut md = render_header(&format!("Prompts: {}", p.industry_name));
    md.push_str(&format!("Industry: `{}`", p.industry_id));
    if let Some(intent) = &p.intent {
        md.push_str(&format!(" | Intent: `{intent}`"));
    }
    md.push_str("\n\n");
    if let Some(c) = &p.classification {
        md.push_str(&format!("Classified from: > {}\n\n", c.query));
    }
    for (i, prompt) in p.prompts.iter().enumerate() {
        md.push_str(&format!(
            "{}. {} *({})*\n",
            i + 1,
            prompt.text,
            prompt.intent
        ));
    }
    md
}

fn render_glossary(entries: &[GlossaryEntry]) -> String {
    let mut md = render_header("Glossary");
    for e in entries {
        md.push_str(&format!("**{}**: {}\n", e.term, e.definition));
        if !e.aliases.is_empty() {
            md.push_str(&format!("  *Also:* {}\n", e.aliases.join(", ")));
        }
        if !e.related.is_empty() {
            md.push_str(&format!("  *See:* {}\n", e.related.join(", ")));
        }
        md.push('\n');
    }
    md
}

fn render_footer() -> String {
    r#"---

*Generated by moatscope*
"#
    .to_string()
}

fn score_indicator(score: f64) -> &'static str {
    if score >= 80.0 {
        "✅ Strong"
    } else if score >= 60.0 {
        "⚠️ Fair"
    } else {
        "❌ Weak"
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// Table cells cannot hold pipes or newlines
fn escape(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::{test_eeat, test_feedback, test_moats, test_reward};

    #[test]
    fn test_markdown_moats_has_header_and_table() {
        let moats = test_moats();
        let md = render(Report::Moats(&moats)).expect("render markdown");
        assert!(md.starts_with("# Moat Assessment: Acme CRM"));
        assert!(md.contains("**Moat: Narrow**"));
        assert!(md.contains("### Network Effects (Strong)"));
        assert!(md.contains("| Category | Score | Status | Bucket |"));
        assert!(md.contains("*Generated by moatscope*"));
    }

    #[test]
    fn test_markdown_eeat_and_reward() {
        let eeat = test_eeat();
        let md = render(Report::Eeat(&eeat)).expect("render markdown");
        assert!(md.contains("## Dimensions"));
        assert!(md.contains("| Experience |"));

        let reward = test_reward();
        let md = render(Report::Reward(&reward)).expect("render markdown");
        assert!(md.contains("| Relevance |"));
        assert!(md.contains("Brand mentioned: yes"));
    }

    #[test]
    fn test_markdown_feedback_tables() {
        let (feedback, pairs) = test_feedback();
        let md = render(Report::Feedback {
            feedback: &feedback,
            pairs: &pairs,
        })
        .expect("render markdown");
        assert!(md.contains("## Preference Pairs (1)"));
        assert!(md.contains("| `p1` | `a` | `b` |"));
    }

    #[test]
    fn test_escape_table_cells() {
        assert_eq!(escape("a|b\nc"), "a\\|b c");
        assert_eq!(capitalize("narrow"), "Narrow");
        assert_eq!(capitalize(""), "");
    }
}
