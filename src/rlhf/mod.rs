//! Reward scoring and implicit-feedback utilities
//!
//! - [`score_response`]: heuristic reward for a (prompt, response) pair
//! - [`aggregate_feedback`]: fold implicit user events into a per-response
//!   preference in `[-1, 1]`
//! - [`mine_preference_pairs`]: chosen/rejected pairs for preference training

mod feedback;
mod pairs;
mod reward;

pub use feedback::{aggregate_feedback, ImplicitSignal, ResponseFeedback, SignalKind};
pub use pairs::{mine_preference_pairs, PreferencePair};
pub use reward::{score_response, RewardComponents, RewardInput, RewardScore};
