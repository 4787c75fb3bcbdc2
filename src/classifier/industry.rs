//! Industry detection for queries and brand descriptions

use super::Classifier;
use crate::config::ClassifierSettings;
use crate::models::ScoreResult;
use crate::signals::{industry_table, SignalTable};
use serde::Deserialize;

/// What we know about the thing being classified
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryQuery {
    /// Free-text query (e.g. a prompt sent to an assistant)
    #[serde(default)]
    pub query: String,

    #[serde(default)]
    pub brand_name: Option<String>,

    #[serde(default)]
    pub domain: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Industry slug the caller believes applies
    #[serde(default)]
    pub industry_hint: Option<String>,
}

impl IndustryQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.industry_hint = Some(hint.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// All text fields joined for matching
    fn text(&self) -> String {
        [
            Some(self.query.as_str()),
            self.brand_name.as_deref(),
            self.domain.as_deref(),
            self.description.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|s| !s.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// Detect the industry with the built-in table and default settings
pub fn detect_industry(query: &IndustryQuery) -> ScoreResult {
    detect_industry_with(industry_table(), &ClassifierSettings::default(), query)
}

/// Detect the industry with an explicit table and settings
pub fn detect_industry_with(
    table: &SignalTable,
    settings: &ClassifierSettings,
    query: &IndustryQuery,
) -> ScoreResult {
    Classifier::new(table, settings).classify(&query.text(), query.industry_hint.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_saas_from_query() {
        let result = detect_industry(&IndustryQuery::new("Best CRM software for small business"));
        assert_eq!(result.category_id, "saas");
    }

    #[test]
    fn test_description_and_domain_contribute() {
        let query = IndustryQuery {
            brand_name: Some("Ledgerly".into()),
            domain: Some("ledgerly.com".into()),
            description: Some("Mortgage and loan comparison with credit score tracking".into()),
            ..Default::default()
        };
        let result = detect_industry(&query);
        assert_eq!(result.category_id, "fintech");
    }

    #[test]
    fn test_hint_breaks_a_tie() {
        // "shop" (ecommerce) vs "pizza" (food): equal keyword scores
        let plain = detect_industry(&IndustryQuery::new("pizza shop"));
        let hinted = detect_industry(&IndustryQuery::new("pizza shop").with_hint("food"));
        assert_eq!(plain.category_id, "ecommerce");
        assert_eq!(hinted.category_id, "food");
        assert!(hinted.hint_applied);
    }

    #[test]
    fn test_deserializes_camel_case() {
        let query: IndustryQuery = serde_json::from_str(
            r#"{"query": "best hotels in rome", "industryHint": "travel", "brandName": "X"}"#,
        )
        .expect("parse query");
        assert_eq!(query.industry_hint.as_deref(), Some("travel"));
        assert_eq!(detect_industry(&query).category_id, "travel");
    }
}
