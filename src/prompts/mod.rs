//! Industry prompt selection and the metrics glossary
//!
//! Picks the prompts worth sending to AI assistants when measuring how a
//! brand shows up in their answers. Templates are tagged with an intent and
//! optionally an industry, and filled from the request or the industry's
//! defaults.

pub mod glossary;
mod library;

pub use glossary::{entries as glossary_entries, lookup as glossary_lookup, GlossaryEntry};

use crate::classifier::{classify_query_with, QueryClassification, Tables};
use crate::config::ClassifierSettings;
use crate::error::Result;
use crate::signals::SignalTable;
use library::{TemplateDef, TEMPLATES};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Prompts returned when the request does not say
pub const DEFAULT_LIMIT: usize = 10;

/// What prompts to select and how to fill them
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptRequest {
    /// Industry slug; unknown or missing means generic prompts only
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub intent: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    /// Overrides the industry's category noun
    #[serde(default)]
    pub category: Option<String>,
    /// Overrides the industry's audience
    #[serde(default)]
    pub audience: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedPrompt {
    pub template_id: String,
    pub intent: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptSelection {
    pub industry_id: String,
    pub industry_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    pub prompts: Vec<SelectedPrompt>,
    /// Set when the industry and intent came from classifying a query
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<QueryClassification>,
}

/// Select prompts with the built-in tables
pub fn select_prompts(request: &PromptRequest) -> Result<PromptSelection> {
    select_prompts_with(&Tables::builtin(), request)
}

/// Select and fill prompts.
///
/// Order: industry prompts with the requested intent, generic prompts with
/// that intent, then the remaining industry and generic prompts. Templates
/// that need `{brand}` are skipped without a brand. An unknown intent is an
/// error; an unknown industry falls back to generic prompts.
pub fn select_prompts_with(tables: &Tables, request: &PromptRequest) -> Result<PromptSelection> {
    let intent = match request.intent.as_deref().filter(|i| !i.trim().is_empty()) {
        Some(i) => Some(tables.intents.require(i)?.id.clone()),
        None => None,
    };

    let industries: &SignalTable = &tables.industries;
    let entry = request.industry.as_deref().and_then(|slug| {
        let found = industries.get(slug);
        if found.is_none() {
            debug!("Unknown industry '{}', using generic prompts", slug);
        }
        found
    });
    let (industry_id, industry_name, noun, audience) = match entry {
        Some(e) => (e.id.clone(), e.name.clone(), e.category_noun.clone(), e.audience.clone()),
        None => {
            let f = industries.fallback();
            (f.id.clone(), f.name.clone(), f.category_noun.clone(), f.audience.clone())
        }
    };
    let category = request.category.clone().unwrap_or(noun);
    let audience = request.audience.clone().unwrap_or(audience);
    let brand = request
        .brand
        .as_deref()
        .map(str::trim)
        .filter(|b| !b.is_empty());

    let rank = |t: &TemplateDef| -> Option<u8> {
        let specific = match t.industry {
            Some(id) if id == industry_id => true,
            Some(_) => return None,
            None => false,
        };
        let intent_match = intent.as_deref().is_some_and(|i| i == t.intent);
        Some(match (intent_match, specific) {
            (true, true) => 0,
            (true, false) => 1,
            (false, true) => 2,
            (false, false) => 3,
        })
    };

    let mut ranked: Vec<(u8, &TemplateDef)> = TEMPLATES
        .iter()
        .filter(|t| brand.is_some() || !t.text.contains("{brand}"))
        .filter_map(|t| rank(t).map(|r| (r, t)))
        .collect();
    // Stable sort keeps library order inside a tier
    ranked.sort_by_key(|(r, _)| *r);

    let limit = request.limit.unwrap_or(DEFAULT_LIMIT);
    let prompts = ranked
        .into_iter()
        .take(limit)
        .map(|(_, t)| SelectedPrompt {
            template_id: t.id.to_string(),
            intent: t.intent.to_string(),
            industry: t.industry.map(str::to_string),
            text: fill(t.text, brand.unwrap_or(""), &category, &audience),
        })
        .collect();

    Ok(PromptSelection {
        industry_id,
        industry_name,
        intent,
        prompts,
        classification: None,
    })
}

/// Classify `query`, then select prompts for its industry and intent
pub fn select_for_query(query: &str, brand: Option<&str>, limit: usize) -> Result<PromptSelection> {
    select_for_query_with(&Tables::builtin(), &ClassifierSettings::default(), query, brand, limit)
}

pub fn select_for_query_with(
    tables: &Tables,
    settings: &ClassifierSettings,
    query: &str,
    brand: Option<&str>,
    limit: usize,
) -> Result<PromptSelection> {
    let classification = classify_query_with(tables, settings, query, None);
    let request = PromptRequest {
        industry: Some(classification.industry.category_id.clone()),
        intent: Some(classification.intent.category_id.clone()),
        brand: brand.map(str::to_string),
        limit: Some(limit),
        ..Default::default()
    };
    let mut selection = select_prompts_with(tables, &request)?;
    selection.classification = Some(classification);
    Ok(selection)
}

fn fill(template: &str, brand: &str, category: &str, audience: &str) -> String {
    template
        .replace("{brand}", brand)
        .replace("{category}", category)
        .replace("{audience}", audience)
}
