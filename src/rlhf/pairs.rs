//! Preference-pair mining

use super::ResponseFeedback;
use crate::config::FeedbackSettings;
use crate::models::round3;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::debug;

/// A chosen/rejected pair for the same prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferencePair {
    pub prompt_id: String,
    pub chosen: String,
    pub rejected: String,
    pub chosen_preference: f64,
    pub rejected_preference: f64,
    pub margin: f64,
}

/// Pair every response with each lower-rated response on the same prompt.
///
/// Both sides need at least `min_signals` events and the gap must be at
/// least `min_margin`. Pairs come out grouped by prompt id, largest margin
/// first, at most `max_pairs_per_prompt` each.
pub fn mine_preference_pairs(
    feedback: &[ResponseFeedback],
    settings: &FeedbackSettings,
) -> Vec<PreferencePair> {
    let mut by_prompt: BTreeMap<&str, Vec<&ResponseFeedback>> = BTreeMap::new();
    for f in feedback.iter().filter(|f| f.signal_count >= settings.min_signals) {
        by_prompt.entry(f.prompt_id.as_str()).or_default().push(f);
    }

    let mut pairs = Vec::new();
    for (prompt_id, responses) in by_prompt {
        let mut candidates: Vec<PreferencePair> = Vec::new();
        for chosen in &responses {
            for rejected in &responses {
                if chosen.response_id == rejected.response_id {
                    continue;
                }
                let margin = round3(chosen.preference - rejected.preference);
                if margin > 0.0 && margin >= settings.min_margin {
                    candidates.push(PreferencePair {
                        prompt_id: prompt_id.to_string(),
                        chosen: chosen.response_id.clone(),
                        rejected: rejected.response_id.clone(),
                        chosen_preference: chosen.preference,
                        rejected_preference: rejected.preference,
                        margin,
                    });
                }
            }
        }

        candidates.sort_by(|a, b| {
            b.margin
                .partial_cmp(&a.margin)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.chosen.cmp(&b.chosen))
                .then_with(|| a.rejected.cmp(&b.rejected))
        });
        candidates.truncate(settings.max_pairs_per_prompt);
        debug!("Prompt '{}': {} preference pairs", prompt_id, candidates.len());
        pairs.extend(candidates);
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fb(prompt: &str, response: &str, preference: f64, signal_count: usize) -> ResponseFeedback {
        ResponseFeedback {
            prompt_id: prompt.into(),
            response_id: response.into(),
            preference,
            signal_count,
            positive: 0,
            negative: 0,
        }
    }

    #[test]
    fn test_pairs_respect_margin_and_signals() {
        let feedback = vec![
            fb("p1", "a", 0.9, 3),
            fb("p1", "b", 0.7, 3),
            fb("p1", "c", -0.5, 2),
            fb("p1", "d", -0.9, 1),
        ];
        let pairs = mine_preference_pairs(&feedback, &FeedbackSettings::default());

        // a>b is under the margin, d has too few signals
        assert_eq!(pairs.len(), 2);
        assert_eq!((pairs[0].chosen.as_str(), pairs[0].rejected.as_str()), ("a", "c"));
        assert_eq!(pairs[0].margin, 1.4);
        assert_eq!((pairs[1].chosen.as_str(), pairs[1].rejected.as_str()), ("b", "c"));

        for p in &pairs {
            assert_ne!(p.chosen, p.rejected);
            assert!(p.margin >= FeedbackSettings::default().min_margin);
        }
    }

    #[test]
    fn test_pairs_capped_per_prompt() {
        let feedback: Vec<ResponseFeedback> = (0..8)
            .map(|i| fb("p1", &format!("r{i}"), 1.0 - i as f64 * 0.25, 2))
            .collect();
        let settings = FeedbackSettings {
            max_pairs_per_prompt: 4,
            ..Default::default()
        };
        let pairs = mine_preference_pairs(&feedback, &settings);
        assert_eq!(pairs.len(), 4);
        assert!(pairs.windows(2).all(|w| w[0].margin >= w[1].margin));
    }

    #[test]
    fn test_no_pairs_across_prompts() {
        let feedback = vec![fb("p1", "a", 1.0, 2), fb("p2", "b", -1.0, 2)];
        assert!(mine_preference_pairs(&feedback, &FeedbackSettings::default()).is_empty());
    }
}
