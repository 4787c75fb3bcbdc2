//! Parallel classification of many queries

use super::{classify_query_with, Tables};
use crate::config::ClassifierSettings;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One classified query in a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRow {
    pub query: String,
    pub industry_id: String,
    pub industry_confidence: f64,
    pub intent_id: String,
    pub intent_confidence: f64,
}

/// Batch results plus the industry distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub total: usize,
    pub rows: Vec<BatchRow>,
    /// (industry id, count), most frequent first
    pub distribution: Vec<(String, usize)>,
}

/// Classify `queries` in parallel; rows keep the input order.
///
/// `on_each` is called once per classified query (from worker threads), which
/// the CLI uses to drive a progress bar.
pub fn classify_batch<F>(
    tables: &Tables,
    settings: &ClassifierSettings,
    queries: &[String],
    on_each: F,
) -> BatchReport
where
    F: Fn() + Sync,
{
    let rows: Vec<BatchRow> = queries
        .par_iter()
        .map(|query| {
            let result = classify_query_with(tables, settings, query, None);
            on_each();
            BatchRow {
                query: query.clone(),
                industry_id: result.industry.category_id,
                industry_confidence: result.industry.confidence,
                intent_id: result.intent.category_id,
                intent_confidence: result.intent.confidence,
            }
        })
        .collect();

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for row in &rows {
        *counts.entry(row.industry_id.as_str()).or_default() += 1;
    }
    let mut distribution: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(id, n)| (id.to_string(), n))
        .collect();
    distribution.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    BatchReport {
        total: rows.len(),
        rows,
        distribution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_batch_preserves_order_and_counts() {
        let queries: Vec<String> = [
            "Best CRM software for small business",
            "cheap flights to lisbon",
            "project management app for agencies",
            "",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        let calls = AtomicUsize::new(0);
        let report = classify_batch(
            &Tables::builtin(),
            &ClassifierSettings::default(),
            &queries,
            || {
                calls.fetch_add(1, Ordering::Relaxed);
            },
        );

        assert_eq!(report.total, 4);
        assert_eq!(calls.load(Ordering::Relaxed), 4);
        assert_eq!(report.rows[0].industry_id, "saas");
        assert_eq!(report.rows[1].industry_id, "travel");
        assert_eq!(report.rows[3].industry_id, "general");
        assert_eq!(report.distribution[0], ("saas".to_string(), 2));
    }
}
