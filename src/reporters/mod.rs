//! Output reporters for moatscope results
//!
//! Supports multiple output formats:
//! - `text` - Terminal output with colors
//! - `json` - Machine-readable JSON
//! - `markdown` - GitHub-flavored Markdown

mod json;
mod markdown;
mod text;

use crate::classifier::{BatchReport, QueryClassification};
use crate::finance::FinanceProjection;
use crate::prompts::{GlossaryEntry, PromptSelection};
use crate::rlhf::{PreferencePair, ResponseFeedback, RewardScore};
use crate::scoring::{EeatAssessment, MoatAssessment, QuickEeatScore};
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: text, json, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Anything a command can print
#[derive(Debug, Clone, Copy)]
pub enum Report<'a> {
    Classification(&'a QueryClassification),
    Batch(&'a BatchReport),
    Moats(&'a MoatAssessment),
    Eeat(&'a EeatAssessment),
    QuickEeat(&'a QuickEeatScore),
    Reward(&'a RewardScore),
    Feedback {
        feedback: &'a [ResponseFeedback],
        pairs: &'a [PreferencePair],
    },
    Finance(&'a FinanceProjection),
    Prompts(&'a PromptSelection),
    Glossary(&'a [GlossaryEntry]),
}

/// Render a result in the named format
pub fn report(report: Report<'_>, format: &str) -> Result<String> {
    let fmt = OutputFormat::from_str(format)?;
    report_with_format(report, fmt)
}

/// Render a result using an OutputFormat enum
pub fn report_with_format(report: Report<'_>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(report),
        OutputFormat::Json => json::render(report),
        OutputFormat::Markdown => markdown::render(report),
    }
}

/// 12345.678 -> "12,345.68"
pub(crate) fn money(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}{grouped}.{:02}", cents % 100)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::{FeedbackSettings, MoatSettings, RewardWeights};
    use crate::rlhf::{aggregate_feedback, mine_preference_pairs, ImplicitSignal, SignalKind};
    use crate::scoring::{assess_eeat, extract_moats, EeatInput, MoatInput};

    pub(crate) fn test_moats() -> MoatAssessment {
        extract_moats(
            &MoatInput {
                brand_name: "Acme CRM".into(),
                industry_slug: Some("saas".into()),
                customer_count: Some(500_000),
                ..Default::default()
            },
            &MoatSettings::default(),
        )
    }

    pub(crate) fn test_eeat() -> EeatAssessment {
        assess_eeat(
            &EeatInput {
                content: "I tested it for 3 weeks.\n\n- fast\n- cheap".into(),
                url: Some("https://example.com".into()),
                author_name: Some("Sam".into()),
                ..Default::default()
            },
            &Default::default(),
        )
    }

    pub(crate) fn test_reward() -> RewardScore {
        crate::rlhf::score_response(
            &crate::rlhf::RewardInput {
                prompt: "best crm".into(),
                response: "HubSpot is a popular CRM used by 200,000 teams.".into(),
                brand_name: Some("HubSpot".into()),
            },
            &RewardWeights::default(),
        )
    }

    pub(crate) fn test_feedback() -> (Vec<ResponseFeedback>, Vec<PreferencePair>) {
        let events: Vec<ImplicitSignal> = [
            ("a", SignalKind::ThumbsUp),
            ("a", SignalKind::Copy),
            ("b", SignalKind::Regenerate),
            ("b", SignalKind::Abandon),
        ]
        .into_iter()
        .map(|(response, kind)| ImplicitSignal {
            prompt_id: "p1".into(),
            response_id: response.into(),
            kind,
        })
        .collect();
        let feedback = aggregate_feedback(&events);
        let pairs = mine_preference_pairs(&feedback, &FeedbackSettings::default());
        (feedback, pairs)
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(OutputFormat::from_str("text").expect("text"), OutputFormat::Text);
        assert_eq!(OutputFormat::from_str("JSON").expect("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("md").expect("md"), OutputFormat::Markdown);
        assert!(OutputFormat::from_str("sarif").is_err());
        assert_eq!(OutputFormat::Markdown.to_string(), "markdown");
    }

    #[test]
    fn test_money() {
        assert_eq!(money(0.0), "0.00");
        assert_eq!(money(12345.678), "12,345.68");
        assert_eq!(money(-1500.0), "-1,500.00");
        assert_eq!(money(999.999), "1,000.00");
    }

    #[test]
    fn test_every_format_renders_every_report() {
        let moats = test_moats();
        let eeat = test_eeat();
        let reward = test_reward();
        let (feedback, pairs) = test_feedback();
        let reports = [
            Report::Moats(&moats),
            Report::Eeat(&eeat),
            Report::Reward(&reward),
            Report::Feedback {
                feedback: &feedback,
                pairs: &pairs,
            },
            Report::Glossary(crate::prompts::glossary_entries()),
        ];
        for r in reports {
            for fmt in ["text", "json", "markdown"] {
                let out = report(r, fmt).expect("render");
                assert!(!out.trim().is_empty());
            }
        }
    }
}
