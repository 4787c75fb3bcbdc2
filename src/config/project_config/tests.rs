use super::*;

#[test]
fn test_default_config() {
    let mut config = ProjectConfig::default();
    assert!(config.validate().is_ok());

    assert!((config.classifier.keyword_weight - 10.0).abs() < 0.001);
    assert!((config.classifier.pattern_weight - 25.0).abs() < 0.001);
    assert!((config.classifier.hint_bonus - 100.0).abs() < 0.001);
    assert_eq!(config.classifier.max_alternatives, 3);
    assert!((config.moats.strong_threshold - 70.0).abs() < 0.001);
    assert!(config.eeat.weights.is_valid());
    assert!(config.industries.is_empty());
    assert!(config.defaults.format.is_none());
}

#[test]
fn test_parse_toml_config() {
    let toml_content = r#"
[classifier]
keyword_weight = 5.0
max_alternatives = 2

[industries.saas]
extra_keywords = ["martech"]

[industries.pet-care]
name = "Pet Care"
extra_keywords = ["dog food"]
extra_patterns = ['\bvets?\b']

[moats]
strong_threshold = 75.0

[eeat.weights]
experience = 0.25
trustworthiness = 0.25

[feedback]
min_margin = 0.5

[defaults]
format = "json"
"#;

    let mut config: ProjectConfig = toml::from_str(toml_content).expect("parse project config");
    config.validate().expect("valid config");

    assert!((config.classifier.keyword_weight - 5.0).abs() < 0.001);
    // Unspecified fields keep their defaults
    assert!((config.classifier.pattern_weight - 25.0).abs() < 0.001);
    assert_eq!(config.classifier.max_alternatives, 2);

    assert_eq!(config.industries.len(), 2);
    assert_eq!(
        config.industries["pet-care"].name.as_deref(),
        Some("Pet Care")
    );

    assert!((config.moats.strong_threshold - 75.0).abs() < 0.001);
    assert!((config.moats.moderate_threshold - 40.0).abs() < 0.001);

    assert!((config.eeat.weights.experience - 0.25).abs() < 0.001);
    assert!((config.eeat.weights.expertise - 0.25).abs() < 0.001);
    assert!((config.feedback.min_margin - 0.5).abs() < 0.001);
    assert_eq!(config.defaults.format.as_deref(), Some("json"));
}

#[test]
fn test_eeat_weights_normalize() {
    let mut weights = EeatWeights {
        experience: 2.0,
        expertise: 1.0,
        authoritativeness: 1.0,
        trustworthiness: 0.0,
    };
    assert!(!weights.is_valid());
    weights.normalize();
    assert!(weights.is_valid());
    assert!((weights.experience - 0.5).abs() < 0.001);
}

#[test]
fn test_validate_normalizes_eeat_weights() {
    let mut config: ProjectConfig = toml::from_str(
        r#"
[eeat.weights]
experience = 1.0
expertise = 1.0
authoritativeness = 1.0
trustworthiness = 1.0
"#,
    )
    .expect("parse config");
    config.validate().expect("weights get normalized");
    assert!((config.eeat.weights.trustworthiness - 0.25).abs() < 0.001);
}

#[test]
fn test_validate_rejects_unordered_thresholds() {
    let mut config: ProjectConfig = toml::from_str(
        r#"
[moats]
strong_threshold = 30.0
moderate_threshold = 40.0
"#,
    )
    .expect("parse config");
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("strong > moderate > weak"));
}

#[test]
fn test_validate_rejects_negative_weights() {
    let mut config = ProjectConfig::default();
    config.classifier.pattern_weight = -1.0;
    assert!(config.validate().is_err());
}

#[test]
fn test_load_rejects_too_many_alternatives() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("moatscope.toml");
    std::fs::write(&path, "[classifier]\nmax_alternatives = 10\n").expect("write config");

    let err = load_config_file(&path).unwrap_err();
    assert!(err.to_string().contains("max_alternatives"));

    // Discovery falls back to the defaults
    let config = load_project_config(dir.path());
    assert_eq!(config.classifier.max_alternatives, MAX_ALTERNATIVES);
}

#[test]
fn test_validate_rejects_negative_penalties_and_freshness() {
    let mut config = ProjectConfig::default();
    config.reward.hedge_penalty = -0.05;
    assert!(config.validate().is_err());

    let mut config = ProjectConfig::default();
    config.reward.refusal_penalty = -0.3;
    assert!(config.validate().is_err());

    let mut config = ProjectConfig::default();
    config.reward.max_hedge_penalty = -0.2;
    assert!(config.validate().is_err());

    let mut config = ProjectConfig::default();
    config.eeat.freshness_days = -1;
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("freshness_days"));
}

#[test]
fn test_load_project_config_from_dir() {
    let dir = tempfile::tempdir().expect("temp dir");
    std::fs::write(
        dir.path().join("moatscope.toml"),
        "[classifier]\nhint_bonus = 50.0\n",
    )
    .expect("write config");

    let config = load_project_config(dir.path());
    assert!((config.classifier.hint_bonus - 50.0).abs() < 0.001);
}

#[test]
fn test_load_json_config() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join(".moatscoperc.json");
    std::fs::write(&path, r#"{"moats": {"wide_threshold": 70.0}}"#).expect("write config");

    let config = load_config_file(&path).expect("load json config");
    assert!((config.moats.wide_threshold - 70.0).abs() < 0.001);
}

#[test]
fn test_broken_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    std::fs::write(dir.path().join("moatscope.toml"), "[classifier\nbroken").expect("write");

    let config = load_project_config(dir.path());
    assert!((config.classifier.keyword_weight - 10.0).abs() < 0.001);
    assert!(load_config_file(&dir.path().join("moatscope.toml")).is_err());
}

#[test]
fn test_missing_config_uses_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = load_project_config(dir.path());
    assert_eq!(config.classifier.max_alternatives, 3);
}
