//! moatscope - brand and AI-perception scoring
//!
//! Classifies queries by industry and search intent, extracts competitive
//! moats, grades content against E-E-A-T, scores AI responses for reward
//! modelling and projects SaaS revenue. Every scorer is a pure function of
//! its input and a settings struct loaded from `moatscope.toml`.

pub mod classifier;
pub mod config;
pub mod error;
pub mod finance;
pub mod models;
pub mod prompts;
pub mod reporters;
pub mod rlhf;
pub mod scoring;
pub mod signals;

pub use error::{MoatscopeError, Result};
