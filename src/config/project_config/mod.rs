//! Project-level configuration support
//!
//! Loads configuration from `moatscope.toml` or `.moatscoperc.json` in the
//! working directory, or from an explicit path.
//!
//! # Configuration Format
//!
//! ```toml
//! # moatscope.toml
//!
//! [classifier]
//! keyword_weight = 10.0
//! pattern_weight = 25.0
//! hint_bonus = 100.0
//!
//! [industries.saas]
//! extra_keywords = ["martech"]
//!
//! [industries.pet-care]
//! name = "Pet Care"
//! extra_keywords = ["dog food", "veterinary"]
//!
//! [moats]
//! strong_threshold = 70.0
//!
//! [eeat.weights]
//! experience = 0.2
//! expertise = 0.25
//! authoritativeness = 0.25
//! trustworthiness = 0.3
//!
//! [defaults]
//! format = "json"
//! ```
//!
//! Every threshold is an empirically chosen constant; the defaults below
//! are the values the scorers were tuned with.

use crate::error::{MoatscopeError, Result};
use crate::signals::TableExtension;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// Upper bound on runners-up a classification may report
pub const MAX_ALTERNATIVES: usize = 3;

/// Config file names searched in the working directory, in order
pub const CONFIG_FILE_NAMES: &[&str] = &["moatscope.toml", ".moatscoperc.json"];

/// Project-level configuration loaded from moatscope.toml or similar
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectConfig {
    /// Classifier weights
    #[serde(default)]
    pub classifier: ClassifierSettings,

    /// Extra signals per industry (new ids add industries)
    #[serde(default)]
    pub industries: BTreeMap<String, TableExtension>,

    /// Moat strength and rating thresholds
    #[serde(default)]
    pub moats: MoatSettings,

    /// E-E-A-T weights and rating bands
    #[serde(default)]
    pub eeat: EeatSettings,

    /// Reward model component weights
    #[serde(default)]
    pub reward: RewardWeights,

    /// Preference-pair mining limits
    #[serde(default)]
    pub feedback: FeedbackSettings,

    /// Default CLI flags
    #[serde(default)]
    pub defaults: CliDefaults,
}

/// Weights used by the keyword/pattern classifier
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierSettings {
    /// Score added per matched keyword (default: 10.0)
    #[serde(default = "default_keyword_weight")]
    pub keyword_weight: f64,

    /// Score added per matched regex pattern (default: 25.0)
    #[serde(default = "default_pattern_weight")]
    pub pattern_weight: f64,

    /// Score added to a hinted category (default: 100.0)
    #[serde(default = "default_hint_bonus")]
    pub hint_bonus: f64,

    /// Upper bound on reported confidence (default: 0.99)
    #[serde(default = "default_max_confidence")]
    pub max_confidence: f64,

    /// Confidence reported for the fallback category (default: 0.3)
    #[serde(default = "default_fallback_confidence")]
    pub fallback_confidence: f64,

    /// Runners-up returned as alternatives (default: 3)
    #[serde(default = "default_max_alternatives")]
    pub max_alternatives: usize,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            keyword_weight: default_keyword_weight(),
            pattern_weight: default_pattern_weight(),
            hint_bonus: default_hint_bonus(),
            max_confidence: default_max_confidence(),
            fallback_confidence: default_fallback_confidence(),
            max_alternatives: default_max_alternatives(),
        }
    }
}

fn default_keyword_weight() -> f64 {
    10.0
}
fn default_pattern_weight() -> f64 {
    25.0
}
fn default_hint_bonus() -> f64 {
    100.0
}
fn default_max_confidence() -> f64 {
    0.99
}
fn default_fallback_confidence() -> f64 {
    0.3
}
fn default_max_alternatives() -> usize {
    3
}

/// Moat bucketing thresholds (scores are 0-100)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MoatSettings {
    pub strong_threshold: f64,
    pub moderate_threshold: f64,
    pub weak_threshold: f64,
    /// Overall score at or above which the moat is "wide"
    pub wide_threshold: f64,
    /// Overall score at or above which the moat is "narrow"
    pub narrow_threshold: f64,
    /// Industry importance at or above which the industry-affinity signal fires
    pub affinity_importance: f64,
    /// How many of the strongest moats feed the overall score
    pub top_moats: usize,
    pub max_recommendations: usize,
}

impl Default for MoatSettings {
    fn default() -> Self {
        Self {
            strong_threshold: 70.0,
            moderate_threshold: 40.0,
            weak_threshold: 15.0,
            wide_threshold: 60.0,
            narrow_threshold: 30.0,
            affinity_importance: 1.2,
            top_moats: 3,
            max_recommendations: 5,
        }
    }
}

/// Weights for the four E-E-A-T dimensions
#[derive(Debug, Clone, Deserialize)]
pub struct EeatWeights {
    #[serde(default = "default_experience_weight")]
    pub experience: f64,

    #[serde(default = "default_expertise_weight")]
    pub expertise: f64,

    #[serde(default = "default_authoritativeness_weight")]
    pub authoritativeness: f64,

    #[serde(default = "default_trustworthiness_weight")]
    pub trustworthiness: f64,
}

impl Default for EeatWeights {
    fn default() -> Self {
        Self {
            experience: default_experience_weight(),
            expertise: default_expertise_weight(),
            authoritativeness: default_authoritativeness_weight(),
            trustworthiness: default_trustworthiness_weight(),
        }
    }
}

fn default_experience_weight() -> f64 {
    0.20
}
fn default_expertise_weight() -> f64 {
    0.25
}
fn default_authoritativeness_weight() -> f64 {
    0.25
}
fn default_trustworthiness_weight() -> f64 {
    0.30
}

impl EeatWeights {
    fn sum(&self) -> f64 {
        self.experience + self.expertise + self.authoritativeness + self.trustworthiness
    }

    /// Validate that weights sum to 1.0 (with tolerance)
    pub fn is_valid(&self) -> bool {
        (self.sum() - 1.0).abs() < 0.001
    }

    /// Normalize weights to sum to 1.0
    pub fn normalize(&mut self) {
        let sum = self.sum();
        if sum > 0.0 {
            self.experience /= sum;
            self.expertise /= sum;
            self.authoritativeness /= sum;
            self.trustworthiness /= sum;
        }
    }
}

/// E-E-A-T weights and rating bands
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EeatSettings {
    pub weights: EeatWeights,
    pub excellent_threshold: f64,
    pub good_threshold: f64,
    pub needs_improvement_threshold: f64,
    /// Content shorter than this gets no "free of spam markers" credit
    pub min_words_for_spam_check: usize,
    /// Content updated within this many days counts as fresh
    pub freshness_days: i64,
    pub max_recommendations: usize,
}

impl Default for EeatSettings {
    fn default() -> Self {
        Self {
            weights: EeatWeights::default(),
            excellent_threshold: 80.0,
            good_threshold: 60.0,
            needs_improvement_threshold: 40.0,
            min_words_for_spam_check: 50,
            freshness_days: 365,
            max_recommendations: 6,
        }
    }
}

/// Reward model component weights and penalties
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RewardWeights {
    pub relevance: f64,
    pub length: f64,
    pub structure: f64,
    pub specificity: f64,
    pub grounding: f64,
    /// Subtracted once when the response refuses
    pub refusal_penalty: f64,
    /// Subtracted per hedging phrase...
    pub hedge_penalty: f64,
    /// ...up to this much in total
    pub max_hedge_penalty: f64,
    pub ideal_min_words: usize,
    pub ideal_max_words: usize,
}

impl Default for RewardWeights {
    fn default() -> Self {
        Self {
            relevance: 0.35,
            length: 0.20,
            structure: 0.15,
            specificity: 0.15,
            grounding: 0.15,
            refusal_penalty: 0.30,
            hedge_penalty: 0.05,
            max_hedge_penalty: 0.20,
            ideal_min_words: 50,
            ideal_max_words: 400,
        }
    }
}

/// Preference-pair mining limits
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedbackSettings {
    /// Minimum preference gap between chosen and rejected
    pub min_margin: f64,
    /// Minimum implicit events per response before it can be paired
    pub min_signals: usize,
    pub max_pairs_per_prompt: usize,
}

impl Default for FeedbackSettings {
    fn default() -> Self {
        Self {
            min_margin: 0.3,
            min_signals: 2,
            max_pairs_per_prompt: 10,
        }
    }
}

/// Default CLI flags that can be set in project config
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CliDefaults {
    /// Default output format (text, json, markdown)
    #[serde(default)]
    pub format: Option<String>,
}

impl ProjectConfig {
    /// Check that thresholds are ordered and weights are usable.
    ///
    /// E-E-A-T weights that do not sum to 1.0 are normalised rather than
    /// rejected.
    pub fn validate(&mut self) -> Result<()> {
        let c = &self.classifier;
        if c.keyword_weight < 0.0 || c.pattern_weight < 0.0 || c.hint_bonus < 0.0 {
            return Err(MoatscopeError::Config(
                "classifier weights must not be negative".into(),
            ));
        }
        if !(0.0..=1.0).contains(&c.max_confidence) || !(0.0..=1.0).contains(&c.fallback_confidence)
        {
            return Err(MoatscopeError::Config(
                "classifier confidences must be between 0 and 1".into(),
            ));
        }

        if c.max_alternatives > MAX_ALTERNATIVES {
            return Err(MoatscopeError::Config(format!(
                "classifier.max_alternatives must be at most {} (got {})",
                MAX_ALTERNATIVES, c.max_alternatives
            )));
        }

        let m = &self.moats;
        if !(m.strong_threshold > m.moderate_threshold && m.moderate_threshold > m.weak_threshold)
        {
            return Err(MoatscopeError::Config(format!(
                "moat thresholds must satisfy strong > moderate > weak (got {} / {} / {})",
                m.strong_threshold, m.moderate_threshold, m.weak_threshold
            )));
        }
        if m.wide_threshold <= m.narrow_threshold {
            return Err(MoatscopeError::Config(
                "moat wide_threshold must be above narrow_threshold".into(),
            ));
        }
        if m.top_moats == 0 {
            return Err(MoatscopeError::Config("moats.top_moats must be at least 1".into()));
        }

        let e = &mut self.eeat;
        if !(e.excellent_threshold > e.good_threshold
            && e.good_threshold > e.needs_improvement_threshold)
        {
            return Err(MoatscopeError::Config(
                "eeat thresholds must satisfy excellent > good > needs_improvement".into(),
            ));
        }
        if e.weights.sum() <= 0.0 {
            return Err(MoatscopeError::Config("eeat weights must not all be zero".into()));
        }
        if !e.weights.is_valid() {
            warn!("E-E-A-T weights do not sum to 1.0, normalizing");
            e.weights.normalize();
        }

        if e.freshness_days < 0 {
            return Err(MoatscopeError::Config(
                "eeat.freshness_days must not be negative".into(),
            ));
        }

        let r = &self.reward;
        if r.refusal_penalty < 0.0 || r.hedge_penalty < 0.0 || r.max_hedge_penalty < 0.0 {
            return Err(MoatscopeError::Config(
                "reward penalties must not be negative".into(),
            ));
        }

        if self.feedback.min_margin < 0.0 {
            return Err(MoatscopeError::Config(
                "feedback.min_margin must not be negative".into(),
            ));
        }
        if self.reward.ideal_min_words >= self.reward.ideal_max_words {
            return Err(MoatscopeError::Config(
                "reward.ideal_min_words must be below ideal_max_words".into(),
            ));
        }
        Ok(())
    }
}

/// Load project configuration from a directory.
///
/// Searches for configuration files in this order:
/// 1. `moatscope.toml`
/// 2. `.moatscoperc.json`
///
/// Returns default configuration if no usable config file is found.
pub fn load_project_config(dir: &Path) -> ProjectConfig {
    for name in CONFIG_FILE_NAMES {
        let path = dir.join(name);
        if !path.exists() {
            continue;
        }
        match load_config_file(&path) {
            Ok(config) => {
                debug!("Loaded project config from {}", path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    ProjectConfig::default()
}

/// Load and validate one config file; the format follows the extension
pub fn load_config_file(path: &Path) -> Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    let mut config: ProjectConfig = if is_json {
        serde_json::from_str(&content)?
    } else {
        toml::from_str(&content)?
    };
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests;
