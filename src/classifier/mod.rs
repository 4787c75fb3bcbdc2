//! Keyword/pattern classifier
//!
//! Scores free text against a [`SignalTable`]:
//!
//! ```text
//! score(category) = keyword_weight × matched keywords
//!                 + pattern_weight × matched patterns
//!                 + hint_bonus     (if the caller hinted this category)
//!
//! confidence = min(score(top) / Σ score, max_confidence)
//! ```
//!
//! Nothing matching means the table's fallback category with a fixed low
//! confidence. The classifier holds no state: the same text, hint, table and
//! settings always give the same result.

mod batch;
mod industry;
mod intent;

pub use batch::{classify_batch, BatchReport, BatchRow};
pub use industry::{detect_industry, detect_industry_with, IndustryQuery};
pub use intent::{detect_intent, detect_intent_with};

use crate::config::{ClassifierSettings, ProjectConfig, MAX_ALTERNATIVES};
use crate::error::Result;
use crate::models::{round3, Alternative, ScoreResult};
use crate::signals::{industry_table, intent_table, normalize, SignalTable};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use tracing::debug;

/// Scores text against one signal table
pub struct Classifier<'a> {
    table: &'a SignalTable,
    settings: &'a ClassifierSettings,
}

struct Candidate {
    index: usize,
    score: f64,
    signals: Vec<String>,
}

impl<'a> Classifier<'a> {
    pub fn new(table: &'a SignalTable, settings: &'a ClassifierSettings) -> Self {
        Self { table, settings }
    }

    /// Classify `text`, optionally nudged towards the `hint` category
    pub fn classify(&self, text: &str, hint: Option<&str>) -> ScoreResult {
        let normalized = normalize(text);

        let hinted = hint.filter(|h| !h.trim().is_empty()).and_then(|h| {
            let position = self.table.position(h);
            if position.is_none() {
                debug!("Ignoring unknown {} hint '{}'", self.table.kind(), h);
            }
            position
        });

        let mut candidates: Vec<Candidate> = self
            .table
            .entries()
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let matches = entry.matches(&normalized);
                let mut score = self.settings.keyword_weight * matches.keywords.len() as f64
                    + self.settings.pattern_weight * matches.patterns.len() as f64;
                let mut signals = matches.keywords;
                signals.extend(matches.patterns.into_iter().map(|p| format!("pattern:{p}")));
                if hinted == Some(index) {
                    score += self.settings.hint_bonus;
                    signals.push(format!("hint:{}", entry.id));
                }
                Candidate {
                    index,
                    score,
                    signals,
                }
            })
            .collect();

        // Highest score first; ties keep table order
        candidates.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then(a.index.cmp(&b.index))
        });

        let total: f64 = candidates.iter().map(|c| c.score.max(0.0)).sum();
        let Some(top) = candidates.first().filter(|c| c.score > 0.0 && total > 0.0) else {
            return self.fallback();
        };

        let winner = &self.table.entries()[top.index];
        let confidence = (top.score / total).clamp(0.0, self.settings.max_confidence);

        let alternatives = candidates
            .iter()
            .skip(1)
            .take(self.settings.max_alternatives.min(MAX_ALTERNATIVES))
            .filter(|c| c.score > 0.0)
            .map(|c| {
                let entry = &self.table.entries()[c.index];
                Alternative {
                    category_id: entry.id.clone(),
                    category_name: entry.name.clone(),
                    score: c.score,
                    confidence: round3(c.score / total),
                }
            })
            .collect();

        debug!(
            "Classified as {} '{}' (score {:.1} of {:.1}, signals: {:?})",
            self.table.kind(),
            winner.id,
            top.score,
            total,
            top.signals
        );

        ScoreResult {
            category_id: winner.id.clone(),
            category_name: winner.name.clone(),
            confidence: round3(confidence),
            raw_score: top.score,
            matched_signals: top.signals.clone(),
            alternatives,
            hint_applied: hinted == Some(top.index),
            used_fallback: false,
        }
    }

    fn fallback(&self) -> ScoreResult {
        let fallback = self.table.fallback();
        debug!(
            "No {} signals matched, falling back to '{}'",
            self.table.kind(),
            fallback.id
        );
        ScoreResult {
            category_id: fallback.id.clone(),
            category_name: fallback.name.clone(),
            confidence: self.settings.fallback_confidence,
            raw_score: 0.0,
            matched_signals: Vec::new(),
            alternatives: Vec::new(),
            hint_applied: false,
            used_fallback: true,
        }
    }
}

/// Industry and intent tables in effect for a run
#[derive(Debug, Clone)]
pub struct Tables {
    pub industries: Cow<'static, SignalTable>,
    pub intents: &'static SignalTable,
}

impl Tables {
    /// The built-in tables, unmodified
    pub fn builtin() -> Self {
        Self {
            industries: Cow::Borrowed(industry_table()),
            intents: intent_table(),
        }
    }

    /// Built-in tables with the config's industry extensions layered on
    pub fn from_config(config: &ProjectConfig) -> Result<Self> {
        if config.industries.is_empty() {
            return Ok(Self::builtin());
        }
        let extended = industry_table().with_extensions(&config.industries)?;
        debug!(
            "Extended industry table with {} config entries",
            config.industries.len()
        );
        Ok(Self {
            industries: Cow::Owned(extended),
            intents: intent_table(),
        })
    }
}

impl Default for Tables {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Industry and intent for one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryClassification {
    pub query: String,
    pub industry: ScoreResult,
    pub intent: ScoreResult,
}

/// Classify a query's industry (optionally hinted) and intent with built-in tables
pub fn classify_query(text: &str, hint: Option<&str>) -> QueryClassification {
    classify_query_with(&Tables::builtin(), &ClassifierSettings::default(), text, hint)
}

/// Classify a query's industry and intent with explicit tables and settings
pub fn classify_query_with(
    tables: &Tables,
    settings: &ClassifierSettings,
    text: &str,
    hint: Option<&str>,
) -> QueryClassification {
    QueryClassification {
        query: text.to_string(),
        industry: Classifier::new(&tables.industries, settings).classify(text, hint),
        intent: Classifier::new(tables.intents, settings).classify(text, None),
    }
}
