//! Configuration module for moatscope
//!
//! This module handles:
//! - Project-level configuration (moatscope.toml)
//! - Classifier weights and industry table extensions
//! - Scoring thresholds for moats, E-E-A-T, rewards and feedback mining
//! - User-level output defaults

mod project_config;
mod user_config;

pub use project_config::{
    load_config_file, load_project_config, ClassifierSettings, CliDefaults, EeatSettings,
    EeatWeights, FeedbackSettings, MoatSettings, ProjectConfig, RewardWeights,
    CONFIG_FILE_NAMES, MAX_ALTERNATIVES,
};
pub use user_config::{UserConfig, FORMAT_ENV_VAR};
