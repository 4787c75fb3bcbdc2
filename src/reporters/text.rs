//! Text (terminal) reporter with colors and formatting

use super::{money, Report};
use crate::classifier::{BatchReport, QueryClassification};
use crate::finance::FinanceProjection;
use crate::models::{DimensionScore, ScoreResult};
use crate::prompts::{GlossaryEntry, PromptSelection};
use crate::rlhf::{PreferencePair, ResponseFeedback, RewardScore};
use crate::scoring::{EeatAssessment, MoatAssessment, QuickEeatScore};
use anyhow::Result;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const LIGHT_GREEN: &str = "\x1b[92m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const GRAY: &str = "\x1b[90m";

const RULE: &str = "──────────────────────────────────────";

/// Escape codes vanish when stdout is not a color terminal
fn ansi(code: &'static str) -> &'static str {
    if console::colors_enabled() {
        code
    } else {
        ""
    }
}

/// Color for a bucket name (strength, rating or moat width)
fn bucket_color(bucket: &str) -> &'static str {
    ansi(match bucket {
        "strong" | "excellent" | "wide" => GREEN,
        "moderate" | "good" | "narrow" => LIGHT_GREEN,
        "weak" | "needs-improvement" => YELLOW,
        "poor" => RED,
        _ => GRAY,
    })
}

/// Format a 0-100 score with color
fn format_score(score: f64) -> String {
    let color = ansi(if score >= 80.0 {
        GREEN
    } else if score >= 60.0 {
        LIGHT_GREEN
    } else if score >= 40.0 {
        YELLOW
    } else {
        RED
    });
    format!("{color}{score:.1}{}", ansi(RESET))
}

fn header(out: &mut String, title: &str) {
    let (bold, dim, reset) = (ansi(BOLD), ansi(DIM), ansi(RESET));
    out.push_str(&format!("\n{bold}{title}{reset}\n{dim}{RULE}{reset}\n"));
}

fn section(out: &mut String, title: &str) {
    out.push_str(&format!("\n{}{title}{}\n", ansi(BOLD), ansi(RESET)));
}

/// Render a result as formatted terminal output
pub fn render(report: Report<'_>) -> Result<String> {
    let mut out = String::new();
    match report {
        Report::Classification(c) => render_classification(&mut out, c),
        Report::Batch(b) => render_batch(&mut out, b),
        Report::Moats(m) => render_moats(&mut out, m),
        Report::Eeat(e) => render_eeat(&mut out, e),
        Report::QuickEeat(q) => render_quick_eeat(&mut out, q),
        Report::Reward(r) => render_reward(&mut out, r),
        Report::Feedback { feedback, pairs } => render_feedback(&mut out, feedback, pairs),
        Report::Finance(f) => render_finance(&mut out, f),
        Report::Prompts(p) => render_prompts(&mut out, p),
        Report::Glossary(g) => render_glossary(&mut out, g),
    }
    out.push('\n');
    Ok(out)
}

fn render_result(out: &mut String, label: &str, result: &ScoreResult) {
    let (bold, dim, reset) = (ansi(BOLD), ansi(DIM), ansi(RESET));
    out.push_str(&format!(
        "{label}: {bold}{}{reset} ({})  confidence {:.2}",
        result.category_name, result.category_id, result.confidence
    ));
    if result.used_fallback {
        out.push_str(&format!("  {dim}(no signals matched){reset}"));
    }
    out.push('\n');
    if !result.matched_signals.is_empty() {
        out.push_str(&format!(
            "  {dim}signals:{reset} {}\n",
            result.matched_signals.join(", ")
        ));
    }
    if !result.alternatives.is_empty() {
        let alts: Vec<String> = result
            .alternatives
            .iter()
            .map(|a| format!("{} {:.2}", a.category_id, a.confidence))
            .collect();
        out.push_str(&format!("  {dim}alternatives:{reset} {}\n", alts.join(", ")));
    }
}

fn render_classification(out: &mut String, c: &QueryClassification) {
    header(out, "Query classification");
    out.push_str(&format!("Query: \"{}\"\n\n", c.query));
    render_result(out, "Industry", &c.industry);
    render_result(out, "Intent", &c.intent);
}

fn render_batch(out: &mut String, b: &BatchReport) {
    header(out, &format!("Batch classification ({} queries)", b.total));

    section(out, "INDUSTRIES");
    for (id, count) in &b.distribution {
        let share = if b.total > 0 {
            *count as f64 / b.total as f64 * 100.0
        } else {
            0.0
        };
        out.push_str(&format!("  {id:<14} {count:>5}  {share:>5.1}%\n"));
    }

    section(out, "QUERIES");
    for row in &b.rows {
        out.push_str(&format!(
            "  {:<14} {:.2}  {:<14} {:.2}  {}\n",
            row.industry_id, row.industry_confidence, row.intent_id, row.intent_confidence, row.query
        ));
    }
}

fn render_dimension_line(out: &mut String, d: &DimensionScore) {
    out.push_str(&format!(
        "  {:<20} {:>6}  {}{}{}\n",
        d.name,
        format_score(d.score),
        bucket_color(&d.bucket),
        d.bucket,
        ansi(RESET)
    ));
}

fn render_recommendations(out: &mut String, recommendations: &[String]) {
    if recommendations.is_empty() {
        return;
    }
    section(out, "RECOMMENDATIONS");
    for (i, rec) in recommendations.iter().enumerate() {
        out.push_str(&format!("  {}. {rec}\n", i + 1));
    }
}

fn render_moats(out: &mut String, m: &MoatAssessment) {
    let (bold, dim, reset) = (ansi(BOLD), ansi(DIM), ansi(RESET));
    header(out, &format!("Moat assessment: {}", m.brand_name));
    out.push_str(&format!(
        "Industry: {} ({}){}\n",
        m.industry_name,
        m.industry_id,
        if m.industry_detected { "  detected" } else { "" }
    ));
    let rating = m.rating.to_string();
    out.push_str(&format!(
        "Overall: {bold}{:.1}/100{reset}  Moat: {}{bold}{rating}{reset}\n",
        m.overall_score,
        bucket_color(&rating)
    ));

    section(out, "MOATS");
    if m.moats.is_empty() {
        out.push_str(&format!("  {dim}No moat detected{reset}\n"));
    }
    for moat in &m.moats {
        let strength = moat.strength.to_string();
        out.push_str(&format!(
            "  {:<20} {:>5.1}  {}{strength}{reset}\n",
            moat.name,
            moat.score,
            bucket_color(&strength)
        ));
        for evidence in &moat.evidence {
            out.push_str(&format!("    {dim}- {evidence}{reset}\n"));
        }
    }

    section(out, "ALL CATEGORIES");
    for d in &m.dimensions {
        render_dimension_line(out, d);
    }
    render_recommendations(out, &m.recommendations);
}

fn render_eeat(out: &mut String, e: &EeatAssessment) {
    let (bold, reset) = (ansi(BOLD), ansi(RESET));
    header(out, "E-E-A-T assessment");
    let rating = e.rating.to_string();
    out.push_str(&format!(
        "Score: {bold}{:.1}/100{reset}  Rating: {}{bold}{rating}{reset}  Words: {}\n",
        e.overall_score,
        bucket_color(&rating),
        e.word_count
    ));

    section(out, "DIMENSIONS");
    for d in &e.dimensions {
        render_dimension_line(out, d);
    }
    render_recommendations(out, &e.recommendations);
}

fn render_quick_eeat(out: &mut String, q: &QuickEeatScore) {
    let (bold, reset) = (ansi(BOLD), ansi(RESET));
    header(out, "Quick E-E-A-T score");
    let rating = q.rating.to_string();
    out.push_str(&format!(
        "Score: {bold}{:.1}/100{reset}  Rating: {}{bold}{rating}{reset}\n",
        q.score,
        bucket_color(&rating)
    ));
    out.push_str(&format!(
        "  Experience: {}  Expertise: {}  Authoritativeness: {}  Trustworthiness: {}\n",
        format_score(q.experience),
        format_score(q.expertise),
        format_score(q.authoritativeness),
        format_score(q.trustworthiness)
    ));
}

fn render_reward(out: &mut String, r: &RewardScore) {
    let (bold, dim, reset) = (ansi(BOLD), ansi(DIM), ansi(RESET));
    header(out, "Response reward");
    out.push_str(&format!(
        "Reward: {bold}{:.3}{reset}  Words: {}\n",
        r.total, r.word_count
    ));

    section(out, "COMPONENTS");
    let c = &r.components;
    for (name, value) in [
        ("relevance", c.relevance),
        ("length", c.length),
        ("structure", c.structure),
        ("specificity", c.specificity),
        ("grounding", c.grounding),
    ] {
        out.push_str(&format!("  {name:<12} {value:.3}\n"));
    }

    if r.penalty > 0.0 {
        section(out, "PENALTIES");
        if r.refusal {
            out.push_str(&format!("  {}refusal{reset}\n", ansi(RED)));
        }
        if r.hedge_count > 0 {
            out.push_str(&format!("  {} hedging phrases\n", r.hedge_count));
        }
        out.push_str(&format!("  {dim}total -{:.3}{reset}\n", r.penalty));
    }

    if let Some(mentioned) = r.brand_mentioned {
        out.push_str(&format!(
            "\nBrand mentioned: {}\n",
            if mentioned { "yes" } else { "no" }
        ));
    }
}

fn render_feedback(out: &mut String, feedback: &[ResponseFeedback], pairs: &[PreferencePair]) {
    let dim = ansi(DIM);
    let reset = ansi(RESET);
    header(out, "Implicit feedback");

    section(out, "RESPONSES");
    for f in feedback {
        out.push_str(&format!(
            "  {:<12} {:<12} {:>+7.3}  {dim}{} events (+{} / -{}){reset}\n",
            f.prompt_id, f.response_id, f.preference, f.signal_count, f.positive, f.negative
        ));
    }

    section(out, &format!("PREFERENCE PAIRS ({})", pairs.len()));
    if pairs.is_empty() {
        out.push_str(&format!("  {dim}No pairs met the margin{reset}\n"));
    }
    for p in pairs {
        out.push_str(&format!(
            "  {:<12} {} > {}  margin {:.3}\n",
            p.prompt_id, p.chosen, p.rejected, p.margin
        ));
    }
}

fn render_finance(out: &mut String, f: &FinanceProjection) {
    let (bold, dim, reset) = (ansi(BOLD), ansi(DIM), ansi(RESET));
    header(out, &format!("MRR projection ({} months)", f.months.len()));

    out.push_str(&format!(
        "{dim}  {:>5}  {:>10}  {:>14}  {:>16}{reset}\n",
        "month", "customers", "MRR", "ARR"
    ));
    for m in &f.months {
        out.push_str(&format!(
            "  {:>5}  {:>10.1}  {:>14}  {:>16}\n",
            m.month,
            m.customers,
            money(m.mrr),
            money(m.arr)
        ));
    }

    let s = &f.summary;
    section(out, "SUMMARY");
    out.push_str(&format!(
        "  Ending MRR: {bold}{}{reset}  Ending ARR: {bold}{}{reset}\n",
        money(s.ending_mrr),
        money(s.ending_arr)
    ));
    if let Some(growth) = s.mrr_growth_pct {
        out.push_str(&format!("  MRR growth: {growth:.1}%\n"));
    }
    out.push_str(&format!(
        "  Net revenue retention: {:.1}%\n",
        s.net_revenue_retention
    ));
    if let Some(ltv) = s.ltv {
        out.push_str(&format!("  LTV: {}\n", money(ltv)));
    }
    if let Some(payback) = s.cac_payback_months {
        out.push_str(&format!("  CAC payback: {payback:.1} months\n"));
    }
    if let Some(ratio) = s.ltv_to_cac {
        out.push_str(&format!("  LTV:CAC: {ratio:.1}\n"));
    }
}

fn render_prompts(out: &mut String, p: &PromptSelection) {
    let (dim, reset) = (ansi(DIM), ansi(RESET));
    header(out, &format!("Prompts for {} ({})", p.industry_name, p.industry_id));
    if let Some(intent) = &p.intent {
        out.push_str(&format!("Intent: {intent}\n"));
    }
    if let Some(c) = &p.classification {
        out.push_str(&format!(
            "{dim}Classified from \"{}\" (industry {:.2}, intent {:.2}){reset}\n",
            c.query, c.industry.confidence, c.intent.confidence
        ));
    }
    out.push('\n');
    for (i, prompt) in p.prompts.iter().enumerate() {
        out.push_str(&format!(
            "  {:>2}. {}  {dim}[{}]{reset}\n",
            i + 1,
            prompt.text,
            prompt.intent
        ));
    }
}

fn render_glossary(out: &mut String, entries: &[GlossaryEntry]) {
    let (bold, dim, reset) = (ansi(BOLD), ansi(DIM), ansi(RESET));
    header(out, "Glossary");
    for e in entries {
        out.push_str(&format!("{bold}{}{reset}: {}\n", e.term, e.definition));
        if !e.aliases.is_empty() {
            out.push_str(&format!("  {dim}also: {}{reset}\n", e.aliases.join(", ")));
        }
        if !e.related.is_empty() {
            out.push_str(&format!("  {dim}see: {}{reset}\n", e.related.join(", ")));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::{test_eeat, test_feedback, test_moats, test_reward};

    fn plain(s: &str) -> String {
        console::strip_ansi_codes(s).into_owned()
    }

    #[test]
    fn test_text_moats() {
        let moats = test_moats();
        let out = plain(&render(Report::Moats(&moats)).expect("render"));
        assert!(out.contains("Moat assessment: Acme CRM"));
        assert!(out.contains("Network Effects"));
        assert!(out.contains("500,000 customers"));
        assert!(out.contains("RECOMMENDATIONS"));
    }

    #[test]
    fn test_text_eeat_and_reward() {
        let eeat = test_eeat();
        let out = plain(&render(Report::Eeat(&eeat)).expect("render"));
        assert!(out.contains("Trustworthiness"));

        let reward = test_reward();
        let out = plain(&render(Report::Reward(&reward)).expect("render"));
        assert!(out.contains("Brand mentioned: yes"));
    }

    #[test]
    fn test_text_feedback_pairs() {
        let (feedback, pairs) = test_feedback();
        let out = plain(
            &render(Report::Feedback {
                feedback: &feedback,
                pairs: &pairs,
            })
            .expect("render"),
        );
        assert!(out.contains("PREFERENCE PAIRS (1)"));
        assert!(out.contains("a > b"));
    }

    #[test]
    fn test_glossary_lists_terms() {
        let out = plain(&render(Report::Glossary(crate::prompts::glossary_entries())).expect("render"));
        assert!(out.contains("MRR: Monthly Recurring Revenue"));
    }
}
