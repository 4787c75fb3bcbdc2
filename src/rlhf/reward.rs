//! Heuristic reward model
//!
//! ```text
//! total = Σ(weight × component) / Σ weight − refusal − hedging
//! ```
//!
//! Every component is in `[0, 1]`; the total is clamped to `[0, 1]`.

use crate::config::RewardWeights;
use crate::models::round3;
use crate::signals::{normalize, LazyRegex};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

static NUMBERS: LazyRegex = LazyRegex::new(r"\b\d+(?:[.,]\d+)*%?");
static LINKS: LazyRegex = LazyRegex::new(r"https?://[^\s)\]>]+");
static ATTRIBUTIONS: LazyRegex = LazyRegex::new(
    r"\b(according to|reported by|cited|study|studies|research|data from|survey)\b|\bsources?:",
);
static REFUSALS: LazyRegex = LazyRegex::new(
    r"\b(i can't help|i cannot help|i'm unable to|i am unable to|i can't assist|i cannot assist|i won't be able to|as an ai)\b",
);
static HEDGES: LazyRegex = LazyRegex::new(
    r"\b(might|maybe|perhaps|possibly|it depends|not sure|could be|i think)\b",
);

const STOPWORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "any", "can", "had", "her", "was",
    "one", "our", "out", "has", "have", "how", "its", "who", "why", "what", "when", "where",
    "which", "with", "this", "that", "from", "they", "will", "would", "there", "their", "about",
    "into", "your", "best", "good", "some", "does", "should", "could", "more", "most", "than",
    "then", "also", "just", "tell", "give", "like", "want", "need", "please",
];

/// A prompt and the response being scored
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardInput {
    pub prompt: String,
    pub response: String,
    /// Brand whose presence in the response is reported
    #[serde(default)]
    pub brand_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardComponents {
    pub relevance: f64,
    pub length: f64,
    pub structure: f64,
    pub specificity: f64,
    pub grounding: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardScore {
    /// Overall reward, 0.0 - 1.0
    pub total: f64,
    pub components: RewardComponents,
    pub refusal: bool,
    pub hedge_count: usize,
    /// Total subtracted for refusal and hedging
    pub penalty: f64,
    pub word_count: usize,
    /// `None` when no brand was given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_mentioned: Option<bool>,
}

/// Score one response against its prompt
pub fn score_response(input: &RewardInput, weights: &RewardWeights) -> RewardScore {
    let lower = input.response.to_lowercase();
    let word_count = input.response.split_whitespace().count();

    let components = RewardComponents {
        relevance: round3(relevance(&input.prompt, &input.response)),
        length: round3(length_score(word_count, weights)),
        structure: round3(structure(&input.response)),
        specificity: round3(specificity(&input.response)),
        grounding: round3(grounding(&input.response, &lower)),
    };

    let weighted = [
        (weights.relevance, components.relevance),
        (weights.length, components.length),
        (weights.structure, components.structure),
        (weights.specificity, components.specificity),
        (weights.grounding, components.grounding),
    ];
    let weight_sum: f64 = weighted.iter().map(|(w, _)| w).sum();
    let base = if weight_sum > 0.0 {
        weighted.iter().map(|(w, c)| w * c).sum::<f64>() / weight_sum
    } else {
        0.0
    };

    let refusal = REFUSALS.get().is_match(&lower);
    let hedge_count = HEDGES.get().find_iter(&lower).count();
    let hedge_penalty = (hedge_count as f64 * weights.hedge_penalty).min(weights.max_hedge_penalty);
    let penalty = hedge_penalty + if refusal { weights.refusal_penalty } else { 0.0 };

    let total = round3((base - penalty).clamp(0.0, 1.0));

    let brand_mentioned = input
        .brand_name
        .as_deref()
        .map(|b| normalize(b).trim().to_string())
        .filter(|b| !b.is_empty())
        .map(|b| normalize(&input.response).contains(&format!(" {b} ")));

    debug!(
        "Reward {:.3} (base {:.3}, penalty {:.3}, {} words)",
        total, base, penalty, word_count
    );

    RewardScore {
        total,
        components,
        refusal,
        hedge_count,
        penalty: round3(penalty),
        word_count,
        brand_mentioned,
    }
}

fn content_words(text: &str) -> BTreeSet<String> {
    normalize(text)
        .split_whitespace()
        .filter(|w| w.len() >= 3 && !STOPWORDS.contains(w))
        .map(str::to_string)
        .collect()
}

/// Share of the prompt's content words the response uses
fn relevance(prompt: &str, response: &str) -> f64 {
    let wanted = content_words(prompt);
    if wanted.is_empty() {
        // Nothing to be relevant to
        return 0.5;
    }
    let have = content_words(response);
    let covered = wanted
        .iter()
        .filter(|w| {
            have.contains(*w)
                || have.contains(&format!("{w}s"))
                || w.strip_suffix('s').is_some_and(|stem| have.contains(stem))
        })
        .count();
    covered as f64 / wanted.len() as f64
}

fn length_score(words: usize, weights: &RewardWeights) -> f64 {
    let (min, max) = (weights.ideal_min_words, weights.ideal_max_words);
    if words == 0 {
        0.0
    } else if words < min {
        words as f64 / min as f64
    } else if words <= max {
        1.0
    } else {
        (1.0 - (words - max) as f64 / max as f64).max(0.0)
    }
}

fn structure(response: &str) -> f64 {
    let mut list_items = 0;
    let mut headings = 0;
    for line in response.lines().map(str::trim_start) {
        if line.starts_with('#') {
            headings += 1;
        } else if line.starts_with("- ")
            || line.starts_with("* ")
            || line
                .split_once(['.', ')'])
                .is_some_and(|(n, _)| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
        {
            list_items += 1;
        }
    }
    let paragraphs = response
        .split("\n\n")
        .filter(|p| !p.trim().is_empty())
        .count();

    let mut score = 0.0;
    if list_items >= 2 {
        score += 0.4;
    }
    if headings >= 1 {
        score += 0.3;
    }
    if paragraphs >= 2 {
        score += 0.3;
    }
    score
}

fn specificity(response: &str) -> f64 {
    let numbers = NUMBERS.get().find_iter(response).count();
    let proper_nouns = proper_noun_count(response);
    (numbers as f64 / 3.0).min(1.0) * 0.5 + (proper_nouns as f64 / 3.0).min(1.0) * 0.5
}

/// Capitalised words that do not start a sentence
fn proper_noun_count(text: &str) -> usize {
    let mut count = 0;
    let mut sentence_start = true;
    for word in text.split_whitespace() {
        let bare = word.trim_start_matches(|c: char| !c.is_alphanumeric());
        if !sentence_start && bare.chars().next().is_some_and(char::is_uppercase) {
            count += 1;
        }
        sentence_start = word.ends_with(['.', '!', '?', ':']) || word.starts_with('#');
    }
    count
}

fn grounding(response: &str, lower: &str) -> f64 {
    let links = LINKS.get().find_iter(response).count();
    let attributions = ATTRIBUTIONS.distinct_matches(lower).len();
    ((links + attributions) as f64 / 2.0).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(prompt: &str, response: &str) -> RewardScore {
        score_response(
            &RewardInput {
                prompt: prompt.into(),
                response: response.into(),
                brand_name: None,
            },
            &RewardWeights::default(),
        )
    }

    #[test]
    fn test_relevant_structured_answer_beats_refusal() {
        let good = score(
            "What is the best CRM software for small business?",
            "## Top CRM software for small business\n\n\
             - HubSpot: free tier, used by 200,000 businesses.\n\
             - Pipedrive: pipeline views from $14 per seat.\n\
             - Zoho: 3 plans for small teams.\n\n\
             According to a 2024 Gartner survey, 65% of small business teams adopt a CRM \
             within two years. Source: https://example.com/crm-survey",
        );
        let refusal = score(
            "What is the best CRM software for small business?",
            "I'm unable to recommend software. Maybe ask someone else.",
        );
        assert!(good.total > refusal.total);
        assert!(refusal.refusal);
        assert_eq!(refusal.hedge_count, 1);
        assert!(good.components.relevance > 0.9);
        assert_eq!(good.components.grounding, 1.0);
    }

    #[test]
    fn test_total_is_clamped() {
        let s = score("", "");
        assert!((0.0..=1.0).contains(&s.total));
        assert_eq!(s.components.length, 0.0);
        assert_eq!(s.components.relevance, 0.5);
    }

    #[test]
    fn test_hedge_penalty_is_capped() {
        let s = score(
            "pricing",
            "Maybe. Perhaps. Possibly. It might be. I think so. Not sure. Could be.",
        );
        assert!(s.hedge_count >= 5);
        assert!((s.penalty - RewardWeights::default().max_hedge_penalty).abs() < 1e-9);
    }

    #[test]
    fn test_length_band() {
        let w = RewardWeights::default();
        assert_eq!(length_score(25, &w), 0.5);
        assert_eq!(length_score(200, &w), 1.0);
        assert_eq!(length_score(600, &w), 0.5);
        assert_eq!(length_score(2000, &w), 0.0);
    }

    #[test]
    fn test_brand_mention() {
        let input = RewardInput {
            prompt: "best crm".into(),
            response: "Many teams pick HubSpot for this.".into(),
            brand_name: Some("HubSpot".into()),
        };
        let s = score_response(&input, &RewardWeights::default());
        assert_eq!(s.brand_mentioned, Some(true));

        let input = RewardInput {
            brand_name: Some("Salesforce".into()),
            ..input
        };
        assert_eq!(
            score_response(&input, &RewardWeights::default()).brand_mentioned,
            Some(false)
        );
    }

    #[test]
    fn test_proper_nouns_skip_sentence_starts() {
        assert_eq!(proper_noun_count("The team at Acme uses Slack. Then it grew."), 2);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let input = RewardInput {
            prompt: "Which CRM should a 10 person sales team use?".into(),
            response: "## Options\n\n- HubSpot: free tier.\n- Pipedrive: from $14 per seat.\n\n\
                       It depends, but according to a 2024 survey most teams pick HubSpot."
                .into(),
            brand_name: Some("HubSpot".into()),
        };
        let weights = RewardWeights::default();
        let first = score_response(&input, &weights);
        for _ in 0..5 {
            assert_eq!(score_response(&input, &weights), first);
        }
    }
}
