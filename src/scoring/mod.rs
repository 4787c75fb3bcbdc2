//! Weighted-signal scoring
//!
//! Both assessors (competitive moats and E-E-A-T) share one shape: a
//! dimension is a list of weighted signals, each signal earns a credit in
//! `[0, 1]`, and the dimension score is the earned share of the total weight.
//!
//! # Scoring Formula
//!
//! ```text
//! Dimension = Σ(weight × credit) / Σ weight × 100
//!
//! Where credit is:
//!   structured signal  first tier whose threshold the value meets
//!   text signal        regex hits in the text (1 hit partial, 2+ full)
//!   missing input      0
//! ```
//!
//! Recommendations walk the weakest dimensions first and emit the advice of
//! the signals leaving the most weight on the table.

pub mod eeat;
pub mod moat;

pub use eeat::{assess_eeat, quick_eeat_score, EeatAssessment, EeatInput, QuickEeatScore};
pub use moat::{extract_moats, extract_moats_with, Moat, MoatAssessment, MoatInput, MOAT_CATEGORIES};

use crate::config::{EeatSettings, MoatSettings};
use crate::models::{round1, DimensionScore, Rating, SignalOutcome, Strength};
use crate::signals::LazyRegex;
use std::cmp::Ordering;

/// Credit for the first tier whose threshold `value` meets.
///
/// Tiers are `(threshold, credit)` pairs, highest threshold first.
pub(crate) fn tiered(value: Option<f64>, tiers: &[(f64, f64)]) -> f64 {
    value
        .and_then(|v| tiers.iter().find(|(threshold, _)| v >= *threshold))
        .map(|(_, credit)| *credit)
        .unwrap_or(0.0)
}

/// Builder-style constructor for a [`SignalOutcome`]
pub(crate) fn outcome(
    id: &str,
    label: &str,
    weight: f64,
    credit: f64,
    evidence: Option<String>,
    advice: &str,
) -> SignalOutcome {
    let credit = credit.clamp(0.0, 1.0);
    SignalOutcome {
        id: id.to_string(),
        label: label.to_string(),
        weight,
        // Evidence only makes sense for signals that earned something
        evidence: if credit > 0.0 { evidence } else { None },
        credit,
        advice: advice.to_string(),
    }
}

/// A regex signal over free text.
///
/// One distinct hit earns `partial` credit, two or more earn full credit.
pub(crate) fn text_signal(
    id: &str,
    label: &str,
    weight: f64,
    regex: &LazyRegex,
    text: &str,
    partial: f64,
    advice: &str,
) -> SignalOutcome {
    let hits = regex.distinct_matches(text);
    let credit = match hits.len() {
        0 => 0.0,
        1 => partial,
        _ => 1.0,
    };
    let evidence = (!hits.is_empty()).then(|| {
        let quoted: Vec<String> = hits.iter().take(3).map(|h| format!("\"{h}\"")).collect();
        format!("mentions {}", quoted.join(", "))
    });
    outcome(id, label, weight, credit, evidence, advice)
}

/// A yes/no signal; `None` counts as no
pub(crate) fn flag_signal(
    id: &str,
    label: &str,
    weight: f64,
    flag: Option<bool>,
    evidence: &str,
    advice: &str,
) -> SignalOutcome {
    let credit = if flag == Some(true) { 1.0 } else { 0.0 };
    outcome(id, label, weight, credit, Some(evidence.to_string()), advice)
}

/// Normalised 0-100 score of a list of signals
pub fn score_dimension(signals: &[SignalOutcome]) -> f64 {
    let total: f64 = signals.iter().map(|s| s.weight).sum();
    if total <= 0.0 {
        return 0.0;
    }
    let earned: f64 = signals.iter().map(SignalOutcome::earned).sum();
    round1((earned / total * 100.0).clamp(0.0, 100.0))
}

/// Assemble a [`DimensionScore`] from evaluated signals
pub(crate) fn build_dimension(
    id: &str,
    name: &str,
    signals: Vec<SignalOutcome>,
    bucket: impl FnOnce(f64) -> String,
) -> DimensionScore {
    let score = score_dimension(&signals);
    let evidence = signals.iter().filter_map(|s| s.evidence.clone()).collect();
    DimensionScore {
        id: id.to_string(),
        name: name.to_string(),
        bucket: bucket(score),
        score,
        signals,
        evidence,
    }
}

/// Strength bucket for a moat score
pub fn strength_for(score: f64, settings: &MoatSettings) -> Strength {
    if score >= settings.strong_threshold {
        Strength::Strong
    } else if score >= settings.moderate_threshold {
        Strength::Moderate
    } else if score >= settings.weak_threshold {
        Strength::Weak
    } else {
        Strength::Absent
    }
}

/// Rating band for an E-E-A-T score
pub fn rating_for(score: f64, settings: &EeatSettings) -> Rating {
    if score >= settings.excellent_threshold {
        Rating::Excellent
    } else if score >= settings.good_threshold {
        Rating::Good
    } else if score >= settings.needs_improvement_threshold {
        Rating::NeedsImprovement
    } else {
        Rating::Poor
    }
}

/// Advice for the signals leaving the most weight unearned.
///
/// `dimensions` must already be in priority order. At most `per_dimension`
/// signals are taken from each, and at most `limit` lines overall.
pub(crate) fn recommend<'a>(
    dimensions: impl IntoIterator<Item = &'a DimensionScore>,
    per_dimension: usize,
    limit: usize,
) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for dim in dimensions {
        let mut gaps: Vec<&SignalOutcome> = dim
            .signals
            .iter()
            .filter(|s| s.missing() > 0.0 && !s.advice.is_empty())
            .collect();
        gaps.sort_by(|a, b| b.missing().partial_cmp(&a.missing()).unwrap_or(Ordering::Equal));

        for signal in gaps.into_iter().take(per_dimension) {
            if out.len() >= limit {
                return out;
            }
            let line = format!("{}: {}", dim.name, signal.advice);
            if !out.contains(&line) {
                out.push(line);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    static NUMBERS: LazyRegex = LazyRegex::new(r"\b(one|two|three)\b");

    fn sig(weight: f64, credit: f64, advice: &str) -> SignalOutcome {
        outcome("s", "Signal", weight, credit, None, advice)
    }

    #[test]
    fn test_tiered_picks_first_met_threshold() {
        let tiers = [(100.0, 1.0), (10.0, 0.6), (1.0, 0.3)];
        assert_eq!(tiered(Some(500.0), &tiers), 1.0);
        assert_eq!(tiered(Some(10.0), &tiers), 0.6);
        assert_eq!(tiered(Some(2.0), &tiers), 0.3);
        assert_eq!(tiered(Some(0.5), &tiers), 0.0);
        assert_eq!(tiered(None, &tiers), 0.0);
    }

    #[test]
    fn test_score_dimension_is_earned_share() {
        let signals = vec![sig(50.0, 1.0, ""), sig(25.0, 1.0, ""), sig(25.0, 0.0, "")];
        assert_eq!(score_dimension(&signals), 75.0);
        assert_eq!(score_dimension(&[]), 0.0);
    }

    #[test]
    fn test_text_signal_partial_and_full() {
        let one = text_signal("t", "Text", 10.0, &NUMBERS, "only one here", 0.6, "");
        assert!((one.credit - 0.6).abs() < 1e-9);
        assert_eq!(one.evidence.as_deref(), Some("mentions \"one\""));

        let two = text_signal("t", "Text", 10.0, &NUMBERS, "one and two and one", 0.6, "");
        assert_eq!(two.credit, 1.0);

        let none = text_signal("t", "Text", 10.0, &NUMBERS, "nothing", 0.6, "");
        assert_eq!(none.credit, 0.0);
        assert!(none.evidence.is_none());
    }

    #[test]
    fn test_buckets() {
        let moats = MoatSettings::default();
        assert_eq!(strength_for(75.0, &moats), Strength::Strong);
        assert_eq!(strength_for(40.0, &moats), Strength::Moderate);
        assert_eq!(strength_for(15.0, &moats), Strength::Weak);
        assert_eq!(strength_for(14.9, &moats), Strength::Absent);

        let eeat = EeatSettings::default();
        assert_eq!(rating_for(80.0, &eeat), Rating::Excellent);
        assert_eq!(rating_for(60.0, &eeat), Rating::Good);
        assert_eq!(rating_for(40.0, &eeat), Rating::NeedsImprovement);
        assert_eq!(rating_for(0.0, &eeat), Rating::Poor);
    }

    #[test]
    fn test_recommend_largest_gap_first() {
        let dim = build_dimension(
            "d",
            "Dim",
            vec![sig(10.0, 0.0, "small gap"), sig(40.0, 0.5, "big gap"), sig(5.0, 1.0, "done")],
            |_| String::new(),
        );
        let recs = recommend([&dim], 2, 10);
        assert_eq!(recs, vec!["Dim: big gap".to_string(), "Dim: small gap".to_string()]);
        assert_eq!(recommend([&dim], 2, 1).len(), 1);
    }
}
