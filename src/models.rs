//! Core data models for moatscope
//!
//! These models are shared by the classifiers, the scorers and the
//! reporters. Everything here is derived per call and never persisted.

use serde::{Deserialize, Serialize};

/// A runner-up category from a classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    pub category_id: String,
    pub category_name: String,
    /// Raw weighted score
    pub score: f64,
    /// Share of the total matched weight (0.0 - 1.0)
    pub confidence: f64,
}

/// Result of scoring free text against a signal table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub category_id: String,
    pub category_name: String,
    /// Confidence from 0.0 to 1.0
    pub confidence: f64,
    /// Raw weighted score of the winning category
    pub raw_score: f64,
    /// Keywords, pattern labels and hints that contributed to the winner
    #[serde(default)]
    pub matched_signals: Vec<String>,
    #[serde(default)]
    pub alternatives: Vec<Alternative>,
    #[serde(default)]
    pub hint_applied: bool,
    /// True when nothing matched and the table's fallback was returned
    #[serde(default)]
    pub used_fallback: bool,
}

/// Qualitative strength of a moat (or any strength-bucketed dimension)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    #[default]
    Absent,
    Weak,
    Moderate,
    Strong,
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strength::Absent => write!(f, "absent"),
            Strength::Weak => write!(f, "weak"),
            Strength::Moderate => write!(f, "moderate"),
            Strength::Strong => write!(f, "strong"),
        }
    }
}

/// Content quality rating used by the E-E-A-T assessor
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum Rating {
    #[default]
    Poor,
    NeedsImprovement,
    Good,
    Excellent,
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rating::Poor => write!(f, "poor"),
            Rating::NeedsImprovement => write!(f, "needs-improvement"),
            Rating::Good => write!(f, "good"),
            Rating::Excellent => write!(f, "excellent"),
        }
    }
}

/// Overall width of a brand's competitive moat
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum MoatRating {
    #[default]
    None,
    Narrow,
    Wide,
}

impl std::fmt::Display for MoatRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoatRating::None => write!(f, "none"),
            MoatRating::Narrow => write!(f, "narrow"),
            MoatRating::Wide => write!(f, "wide"),
        }
    }
}

/// One evaluated signal inside a dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalOutcome {
    pub id: String,
    pub label: String,
    pub weight: f64,
    /// Fraction of the weight earned (0.0 - 1.0)
    pub credit: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
    /// Templated advice emitted when this signal is weak
    #[serde(skip)]
    pub advice: String,
}

impl SignalOutcome {
    /// Weight actually earned
    pub fn earned(&self) -> f64 {
        self.weight * self.credit
    }

    /// Weight left on the table
    pub fn missing(&self) -> f64 {
        self.weight * (1.0 - self.credit)
    }
}

/// Weighted-sum score for one dimension (a moat category or an E-E-A-T pillar)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub id: String,
    pub name: String,
    /// Normalised score, 0 - 100
    pub score: f64,
    /// Qualitative bucket (strength or rating, depending on the assessor)
    pub bucket: String,
    pub signals: Vec<SignalOutcome>,
    #[serde(default)]
    pub evidence: Vec<String>,
}

/// Round to one decimal place for stable, readable output
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to three decimal places (confidences, ratios)
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strength_ordering() {
        assert!(Strength::Strong > Strength::Moderate);
        assert!(Strength::Moderate > Strength::Weak);
        assert!(Strength::Weak > Strength::Absent);
    }

    #[test]
    fn test_rating_serializes_kebab_case() {
        let json = serde_json::to_string(&Rating::NeedsImprovement).expect("serialize rating");
        assert_eq!(json, "\"needs-improvement\"");
        assert_eq!(Rating::NeedsImprovement.to_string(), "needs-improvement");
    }

    #[test]
    fn test_signal_outcome_weights() {
        let outcome = SignalOutcome {
            id: "customers".into(),
            label: "Customer base".into(),
            weight: 50.0,
            credit: 0.6,
            evidence: None,
            advice: String::new(),
        };
        assert!((outcome.earned() - 30.0).abs() < 1e-9);
        assert!((outcome.missing() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round1(74.96), 75.0);
        assert_eq!(round3(0.12345), 0.123);
    }
}
