//! Implicit feedback aggregation

use crate::models::round3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What the user did with a response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SignalKind {
    ThumbsUp,
    ThumbsDown,
    Copy,
    Share,
    FollowUp,
    Regenerate,
    Abandon,
    /// Time spent reading the response
    Dwell { seconds: f64 },
}

impl SignalKind {
    /// Preference weight of this event, -1.0 to 1.0
    pub fn weight(&self) -> f64 {
        match self {
            SignalKind::ThumbsUp => 1.0,
            SignalKind::ThumbsDown => -1.0,
            SignalKind::Copy => 0.6,
            SignalKind::Share => 0.8,
            SignalKind::FollowUp => 0.3,
            SignalKind::Regenerate => -0.7,
            SignalKind::Abandon => -0.5,
            SignalKind::Dwell { seconds } => {
                if *seconds >= 30.0 {
                    0.4
                } else if *seconds >= 10.0 {
                    0.1
                } else if *seconds < 3.0 {
                    -0.2
                } else {
                    0.0
                }
            }
        }
    }
}

/// One implicit event, e.g. `{"promptId": "p1", "responseId": "a", "type": "copy"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImplicitSignal {
    pub prompt_id: String,
    pub response_id: String,
    #[serde(flatten)]
    pub kind: SignalKind,
}

/// Aggregated preference for one response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseFeedback {
    pub prompt_id: String,
    pub response_id: String,
    /// Mean event weight, clamped to -1.0 - 1.0
    pub preference: f64,
    pub signal_count: usize,
    pub positive: usize,
    pub negative: usize,
}

/// Fold events into one [`ResponseFeedback`] per (prompt, response),
/// ordered by prompt id then response id
pub fn aggregate_feedback(signals: &[ImplicitSignal]) -> Vec<ResponseFeedback> {
    let mut grouped: BTreeMap<(&str, &str), Vec<f64>> = BTreeMap::new();
    for signal in signals {
        grouped
            .entry((signal.prompt_id.as_str(), signal.response_id.as_str()))
            .or_default()
            .push(signal.kind.weight());
    }

    grouped
        .into_iter()
        .map(|((prompt_id, response_id), weights)| {
            let mean = weights.iter().sum::<f64>() / weights.len() as f64;
            ResponseFeedback {
                prompt_id: prompt_id.to_string(),
                response_id: response_id.to_string(),
                preference: round3(mean.clamp(-1.0, 1.0)),
                signal_count: weights.len(),
                positive: weights.iter().filter(|w| **w > 0.0).count(),
                negative: weights.iter().filter(|w| **w < 0.0).count(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(prompt: &str, response: &str, kind: SignalKind) -> ImplicitSignal {
        ImplicitSignal {
            prompt_id: prompt.into(),
            response_id: response.into(),
            kind,
        }
    }

    #[test]
    fn test_dwell_weights() {
        assert_eq!(SignalKind::Dwell { seconds: 45.0 }.weight(), 0.4);
        assert_eq!(SignalKind::Dwell { seconds: 12.0 }.weight(), 0.1);
        assert_eq!(SignalKind::Dwell { seconds: 5.0 }.weight(), 0.0);
        assert_eq!(SignalKind::Dwell { seconds: 1.0 }.weight(), -0.2);
    }

    #[test]
    fn test_aggregate_mean_and_order() {
        let events = vec![
            event("p2", "x", SignalKind::ThumbsUp),
            event("p1", "b", SignalKind::ThumbsDown),
            event("p1", "a", SignalKind::ThumbsUp),
            event("p1", "a", SignalKind::Copy),
            event("p1", "b", SignalKind::Regenerate),
        ];
        let feedback = aggregate_feedback(&events);
        let keys: Vec<(&str, &str)> = feedback
            .iter()
            .map(|f| (f.prompt_id.as_str(), f.response_id.as_str()))
            .collect();
        assert_eq!(keys, vec![("p1", "a"), ("p1", "b"), ("p2", "x")]);

        assert_eq!(feedback[0].preference, 0.8);
        assert_eq!(feedback[0].positive, 2);
        assert_eq!(feedback[1].preference, -0.85);
        assert_eq!(feedback[1].negative, 2);
    }

    #[test]
    fn test_parse_tagged_events() {
        let events: Vec<ImplicitSignal> = serde_json::from_str(
            r#"[
                {"promptId": "p1", "responseId": "a", "type": "thumbs-up"},
                {"promptId": "p1", "responseId": "a", "type": "dwell", "seconds": 40}
            ]"#,
        )
        .expect("parse events");
        assert_eq!(events[0].kind, SignalKind::ThumbsUp);
        assert_eq!(events[1].kind, SignalKind::Dwell { seconds: 40.0 });
    }
}
