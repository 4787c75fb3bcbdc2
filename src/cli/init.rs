//! Init command - write a commented moatscope.toml

use anyhow::{Context, Result};
use console::style;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# moatscope configuration
# Every value below is the built-in default; delete what you don't change.

[classifier]
# Score per matched keyword and per matched regex pattern
keyword_weight = 10.0
pattern_weight = 25.0
# Added to the hinted industry (--hint)
hint_bonus = 100.0
max_confidence = 0.99
# Confidence reported when nothing matched
fallback_confidence = 0.3
max_alternatives = 3

# Extend a built-in industry, or add a new one by using a new slug
# [industries.saas]
# extra_keywords = ["workspace app"]
# extra_patterns = ['\bseat-based\b']
#
# [industries.petcare]
# name = "Pet Care"
# extra_keywords = ["dog groomer", "vet clinic"]

[moats]
# Moat strength bands (scores are 0-100)
strong_threshold = 70.0
moderate_threshold = 40.0
weak_threshold = 15.0
# Overall moat width
wide_threshold = 60.0
narrow_threshold = 30.0
# Industry importance that counts as "the industry rewards this moat"
affinity_importance = 1.2
top_moats = 3
max_recommendations = 5

[eeat]
excellent_threshold = 80.0
good_threshold = 60.0
needs_improvement_threshold = 40.0
min_words_for_spam_check = 50
freshness_days = 365
max_recommendations = 6

[eeat.weights]
# Normalised to sum to 1.0
experience = 0.20
expertise = 0.25
authoritativeness = 0.25
trustworthiness = 0.30

[reward]
relevance = 0.35
length = 0.20
structure = 0.15
specificity = 0.15
grounding = 0.15
refusal_penalty = 0.30
hedge_penalty = 0.05
max_hedge_penalty = 0.20
ideal_min_words = 50
ideal_max_words = 400

[feedback]
min_margin = 0.3
min_signals = 2
max_pairs_per_prompt = 10

[defaults]
# Output format when -f is not given (text, json, markdown)
# format = "text"
"#;

/// Run the init command
pub fn run(dir: &Path, force: bool) -> Result<()> {
    let dir = dir
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", dir.display()))?;
    if !dir.is_dir() {
        anyhow::bail!("Path is not a directory: {}", dir.display());
    }

    let config_path = dir.join("moatscope.toml");
    if config_path.exists() && !force {
        println!(
            "{} Already initialized: {} (use --force to overwrite)",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
        return Ok(());
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!(
        "{} Created {}",
        style("✓").green(),
        style(config_path.display()).cyan()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use moatscope::config::ProjectConfig;

    #[test]
    fn test_default_config_parses_and_validates() {
        let mut config: ProjectConfig = toml::from_str(DEFAULT_CONFIG).expect("parse template");
        config.validate().expect("valid template");
        assert_eq!(config.classifier.keyword_weight, 10.0);
        assert_eq!(config.moats.top_moats, 3);
        assert_eq!(config.feedback.max_pairs_per_prompt, 10);
        assert!(config.industries.is_empty());
    }
}
