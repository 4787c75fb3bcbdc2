//! Search-intent detection

use super::Classifier;
use crate::config::ClassifierSettings;
use crate::models::ScoreResult;
use crate::signals::{intent_table, SignalTable};

/// Detect the intent of a query with the built-in table
pub fn detect_intent(text: &str) -> ScoreResult {
    detect_intent_with(intent_table(), &ClassifierSettings::default(), text)
}

pub fn detect_intent_with(
    table: &SignalTable,
    settings: &ClassifierSettings,
    text: &str,
) -> ScoreResult {
    Classifier::new(table, settings).classify(text, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intents() {
        let cases = [
            ("Best CRM software for small business", "commercial"),
            ("how to file a trademark", "informational"),
            ("buy running shoes online", "transactional"),
            ("hubspot login", "navigational"),
            ("notion vs confluence", "comparison"),
            ("dentist near me", "local"),
        ];
        for (text, expected) in cases {
            assert_eq!(detect_intent(text).category_id, expected, "query: {text}");
        }
    }

    #[test]
    fn test_no_signal_defaults_to_informational() {
        let result = detect_intent("zxqv");
        assert_eq!(result.category_id, "informational");
        assert!(result.used_fallback);
    }
}
