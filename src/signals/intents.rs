//! Built-in search-intent table

use super::{EntryDef, Fallback, SignalTable};
use std::sync::OnceLock;

static INTENTS: OnceLock<SignalTable> = OnceLock::new();

/// The built-in intent table, compiled on first use
pub fn intent_table() -> &'static SignalTable {
    INTENTS.get_or_init(|| {
        SignalTable::compile(
            "intent",
            INTENT_DEFS,
            Fallback {
                id: "informational".to_string(),
                name: "Informational".to_string(),
                category_noun: String::new(),
                audience: String::new(),
            },
        )
    })
}

const INTENT_DEFS: &[EntryDef] = &[
    EntryDef {
        id: "informational",
        name: "Informational",
        keywords: &[
            "what is", "how", "why", "guide", "tutorial", "explain", "meaning", "definition",
            "tips", "ideas", "examples", "learn",
        ],
        patterns: &[
            ("question opener", r"^ (what|how|why|who|when|where|which) "),
            ("how to", r"\bhow (to|do|does|can)\b"),
        ],
        importance: &[],
        category_noun: "",
        audience: "",
    },
    EntryDef {
        id: "commercial",
        name: "Commercial investigation",
        keywords: &[
            "best", "top", "review", "rated", "recommended", "top rated", "worth it",
            "features", "pros and cons",
        ],
        patterns: &[
            ("best for", r"\b(best|top) .*\bfor\b"),
            ("ranked list", r"\b(best|top)( \d+)? \w+"),
            ("worth it", r"\bis \w+( \w+)? worth it\b"),
        ],
        importance: &[],
        category_noun: "",
        audience: "",
    },
    EntryDef {
        id: "transactional",
        name: "Transactional",
        keywords: &[
            "buy", "purchase", "order", "price", "pricing", "cost", "cheap", "deal",
            "discount", "coupon", "subscribe", "download", "free trial", "sign up", "for sale",
            "hire",
        ],
        patterns: &[
            ("buy now", r"\b(buy|order|purchase) (now|online|today)\b"),
            ("how much", r"\bhow much (is|does|do|are)\b"),
            ("price of", r"\b(price|pricing|cost) (of|for)\b"),
        ],
        importance: &[],
        category_noun: "",
        audience: "",
    },
    EntryDef {
        id: "navigational",
        name: "Navigational",
        keywords: &[
            "login", "log in", "sign in", "website", "official site", "homepage",
            "customer service", "support", "account",
        ],
        patterns: &[
            ("brand login", r"\b\w+ (login|log in|sign in)\b"),
            ("domain name", r"\b\w+ (com|io|org|net|ai)\b"),
        ],
        importance: &[],
        category_noun: "",
        audience: "",
    },
    EntryDef {
        id: "comparison",
        name: "Comparison",
        keywords: &[
            "vs", "versus", "compare", "comparison", "alternative", "difference between",
            "better than",
        ],
        patterns: &[
            ("x vs y", r"\b\w+ (vs|versus) \w+\b"),
            ("alternatives to", r"\balternatives? (to|for)\b"),
            ("compared to", r"\b(compared|comparison) (to|with|of)\b"),
        ],
        importance: &[],
        category_noun: "",
        audience: "",
    },
    EntryDef {
        id: "local",
        name: "Local",
        keywords: &["near me", "nearby", "local", "open now", "directions", "in my area"],
        patterns: &[
            ("near me", r"\bnear me\b"),
            (
                "city query",
                r"\b(in|near) (new york|london|chicago|los angeles|san francisco|austin|seattle|boston|miami|denver|toronto|berlin)\b",
            ),
        ],
        importance: &[],
        category_noun: "",
        audience: "",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_table_contains_fallback_id() {
        let table = intent_table();
        assert_eq!(table.kind(), "intent");
        assert!(table.get(&table.fallback().id).is_some());
        assert_eq!(table.entries().len(), 6);
    }
}
