//! Built-in industry table
//!
//! Keywords vote `keyword_weight`, patterns vote `pattern_weight`. The
//! importance weights say how much each competitive moat matters in the
//! vertical; anything not listed counts as 1.0.

use super::{EntryDef, Fallback, SignalTable};
use std::sync::OnceLock;

static INDUSTRIES: OnceLock<SignalTable> = OnceLock::new();

/// The built-in industry table, compiled on first use
pub fn industry_table() -> &'static SignalTable {
    INDUSTRIES.get_or_init(|| {
        SignalTable::compile(
            "industry",
            INDUSTRY_DEFS,
            Fallback {
                id: "general".to_string(),
                name: "General".to_string(),
                category_noun: "product".to_string(),
                audience: "customers".to_string(),
            },
        )
    })
}

const INDUSTRY_DEFS: &[EntryDef] = &[
    EntryDef {
        id: "saas",
        name: "SaaS & Software",
        keywords: &[
            "software", "saas", "crm", "erp", "platform", "app", "cloud", "subscription",
            "api", "integration", "workflow", "automation", "dashboard", "project management",
            "b2b", "plugin", "no code", "devops", "help desk", "self hosted",
        ],
        patterns: &[
            ("software for", r"\bsoftware (for|to)\b"),
            ("best tool query", r"\b(best|top)( \w+){0,2} (software|tools?|platforms?|apps?)\b"),
            ("free trial", r"\bfree trial\b"),
            ("seat pricing", r"\b(per seat|per user|monthly plan)\b"),
        ],
        importance: &[
            ("switching-costs", 1.4),
            ("network-effects", 1.2),
            ("data-advantage", 1.2),
            ("brand", 0.9),
            ("cost-advantage", 0.8),
            ("efficient-scale", 0.7),
        ],
        category_noun: "software",
        audience: "small businesses",
    },
    EntryDef {
        id: "ecommerce",
        name: "E-commerce & Retail",
        keywords: &[
            "shop", "store", "ecommerce", "online store", "retail", "shipping", "product",
            "fashion", "clothing", "shoes", "apparel", "marketplace", "add to cart", "checkout",
            "amazon", "shopify", "returns", "sneakers",
        ],
        patterns: &[
            ("free shipping", r"\bfree shipping\b"),
            ("where to buy", r"\bwhere (to|can i) buy\b"),
            ("promo code", r"\b(promo|discount|coupon) codes?\b"),
        ],
        importance: &[
            ("brand", 1.3),
            ("cost-advantage", 1.3),
            ("network-effects", 1.2),
            ("efficient-scale", 0.9),
            ("switching-costs", 0.7),
        ],
        category_noun: "online store",
        audience: "shoppers",
    },
    EntryDef {
        id: "fintech",
        name: "Financial Services & Fintech",
        keywords: &[
            "bank", "banking", "loan", "mortgage", "credit card", "payment", "invest",
            "investing", "investment", "fintech", "insurance", "budget", "budgeting", "savings",
            "interest rate", "broker", "stock", "retirement", "accounting", "tax",
        ],
        patterns: &[
            ("apr or apy", r"\b(apr|apy)\b"),
            ("credit score", r"\bcredit scores?\b"),
            ("payment processing", r"\bpayment (processing|gateway|processor)s?\b"),
        ],
        importance: &[
            ("intangible-assets", 1.3),
            ("switching-costs", 1.3),
            ("network-effects", 1.2),
            ("brand", 1.2),
            ("data-advantage", 1.1),
        ],
        category_noun: "financial platform",
        audience: "consumers",
    },
    EntryDef {
        id: "healthcare",
        name: "Healthcare & Life Sciences",
        keywords: &[
            "doctor", "clinic", "hospital", "health", "healthcare", "medical", "patient",
            "therapy", "pharmacy", "telehealth", "telemedicine", "dental", "dentist", "symptom",
            "treatment", "medication", "wellness", "nurse", "diagnosis",
        ],
        patterns: &[
            ("symptoms of", r"\bsymptoms? of\b"),
            ("treatment for", r"\btreatments? for\b"),
            ("hipaa", r"\bhipaa\b"),
        ],
        importance: &[
            ("intangible-assets", 1.4),
            ("brand", 1.2),
            ("data-advantage", 1.2),
            ("switching-costs", 1.1),
            ("efficient-scale", 1.1),
        ],
        category_noun: "healthcare provider",
        audience: "patients",
    },
    EntryDef {
        id: "education",
        name: "Education & E-learning",
        keywords: &[
            "course", "school", "university", "college", "degree", "tutor", "tutoring",
            "education", "e learning", "elearning", "bootcamp", "certification", "class",
            "student", "lms", "curriculum", "exam",
        ],
        patterns: &[
            ("learn how", r"\b(learn|learning) (to|how)\b"),
            ("online degree", r"\bonline (degree|courses?|classes)\b"),
            ("exam prep", r"\b(exam|certification|test) prep\b"),
        ],
        importance: &[
            ("brand", 1.3),
            ("intangible-assets", 1.2),
            ("switching-costs", 0.9),
        ],
        category_noun: "online learning platform",
        audience: "students",
    },
    EntryDef {
        id: "marketing",
        name: "Marketing & Advertising",
        keywords: &[
            "marketing", "seo", "advertising", "ads", "agency", "social media", "campaign",
            "branding", "influencer", "ppc", "lead generation", "backlink", "brand awareness",
            "copywriting", "newsletter",
        ],
        patterns: &[
            ("seo services", r"\bseo (agency|tools?|services?|strategy)\b"),
            ("grow audience", r"\b(grow|increase) (traffic|followers|audience|engagement)\b"),
            ("ai visibility", r"\b(ai|llm|chatgpt) (visibility|search|mentions?)\b"),
        ],
        importance: &[
            ("brand", 1.2),
            ("data-advantage", 1.2),
            ("network-effects", 0.9),
            ("switching-costs", 0.9),
        ],
        category_noun: "marketing agency",
        audience: "brands",
    },
    EntryDef {
        id: "real-estate",
        name: "Real Estate",
        keywords: &[
            "real estate", "realtor", "apartment", "house", "home", "property", "properties",
            "rent", "rental", "condo", "home buying", "listing", "landlord", "tenant",
        ],
        patterns: &[
            ("for sale or rent", r"\b(homes?|houses?|condos?|apartments?) for (sale|rent)\b"),
            ("property value", r"\bproperty (values?|management|taxes)\b"),
        ],
        importance: &[
            ("efficient-scale", 1.3),
            ("network-effects", 1.2),
            ("brand", 1.1),
            ("data-advantage", 1.1),
        ],
        category_noun: "real estate platform",
        audience: "home buyers",
    },
    EntryDef {
        id: "travel",
        name: "Travel & Hospitality",
        keywords: &[
            "travel", "hotel", "flight", "vacation", "trip", "booking", "resort", "airline",
            "tour", "cruise", "destination", "airbnb", "itinerary", "hostel", "car rental",
        ],
        patterns: &[
            ("trip to", r"\b(flights?|trips?|vacations?) to\b"),
            ("things to do", r"\bthings to do\b"),
            ("cheap travel", r"\bcheap (flights|hotels)\b"),
        ],
        importance: &[
            ("brand", 1.3),
            ("network-effects", 1.2),
            ("cost-advantage", 1.2),
            ("efficient-scale", 1.1),
        ],
        category_noun: "travel booking site",
        audience: "travelers",
    },
    EntryDef {
        id: "food",
        name: "Food & Beverage",
        keywords: &[
            "restaurant", "food", "recipe", "meal", "meal kit", "food delivery", "coffee",
            "pizza", "vegan", "grocery", "groceries", "snack", "beverage", "drink", "bakery",
            "cafe", "dinner", "lunch",
        ],
        patterns: &[
            ("recipe for", r"\brecipes? (for|with)\b"),
            ("food near me", r"\b(restaurants?|cafes?|pizza|coffee) near me\b"),
            ("how to cook", r"\bhow to (cook|bake)\b"),
        ],
        importance: &[
            ("brand", 1.4),
            ("cost-advantage", 1.2),
            ("switching-costs", 0.6),
        ],
        category_noun: "food brand",
        audience: "home cooks",
    },
    EntryDef {
        id: "automotive",
        name: "Automotive",
        keywords: &[
            "car", "vehicle", "truck", "suv", "ev", "electric vehicle", "dealership", "dealer",
            "auto", "automotive", "tire", "mechanic", "lease", "sedan", "hybrid", "motorcycle",
        ],
        patterns: &[
            ("new or used", r"\b(used|new) (cars?|trucks?|vehicles?)\b"),
            ("fuel economy", r"\b(mpg|miles per gallon|range per charge)\b"),
            ("model year", r"\b20\d\d (model|models)\b"),
        ],
        importance: &[
            ("brand", 1.3),
            ("cost-advantage", 1.3),
            ("efficient-scale", 1.3),
            ("intangible-assets", 1.2),
        ],
        category_noun: "car brand",
        audience: "drivers",
    },
    EntryDef {
        id: "legal",
        name: "Legal Services",
        keywords: &[
            "lawyer", "attorney", "legal", "law", "law firm", "lawsuit", "divorce",
            "estate planning", "immigration", "personal injury", "court", "litigation", "llc",
            "notary", "paralegal",
        ],
        patterns: &[
            ("lawyer near", r"\b(lawyers?|attorneys?) (near me|in|for)\b"),
            ("how to file", r"\bhow to file (a|for)\b"),
            ("legal advice", r"\blegal (advice|help|aid)\b"),
        ],
        importance: &[
            ("intangible-assets", 1.4),
            ("brand", 1.3),
            ("switching-costs", 1.1),
        ],
        category_noun: "law firm",
        audience: "clients",
    },
    EntryDef {
        id: "crypto",
        name: "Crypto & Web3",
        keywords: &[
            "crypto", "cryptocurrency", "bitcoin", "btc", "ethereum", "eth", "wallet", "nft",
            "defi", "blockchain", "token", "web3", "staking", "solana", "altcoin",
            "cold storage", "dao",
        ],
        patterns: &[
            ("wallet address", r"\b(wallet|contract) address\b"),
            ("hex address", r"\b0x[0-9a-f]{6,}\b"),
            ("crypto exchange", r"\b(crypto|bitcoin) (exchange|wallet|price)s?\b"),
        ],
        importance: &[
            ("network-effects", 1.4),
            ("data-advantage", 1.1),
            ("switching-costs", 0.8),
            ("intangible-assets", 0.8),
        ],
        category_noun: "crypto wallet",
        audience: "crypto investors",
    },
    EntryDef {
        id: "gaming",
        name: "Gaming & Entertainment",
        keywords: &[
            "game", "gaming", "console", "playstation", "xbox", "nintendo", "esports", "gamer",
            "video game", "steam", "mmo", "rpg", "multiplayer", "twitch", "gaming pc",
        ],
        patterns: &[
            ("best games", r"\bbest (\w+ )?games\b"),
            ("game release", r"\b(release date|patch notes|walkthrough)\b"),
        ],
        importance: &[
            ("network-effects", 1.3),
            ("brand", 1.2),
            ("intangible-assets", 1.2),
        ],
        category_noun: "game studio",
        audience: "gamers",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_compiles_with_unique_ids() {
        let table = industry_table();
        assert_eq!(table.kind(), "industry");
        assert_eq!(table.fallback().id, "general");
        let mut ids: Vec<&str> = table.entries().iter().map(|e| e.id.as_str()).collect();
        let before = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), before, "industry ids must be unique");
    }

    #[test]
    fn test_every_industry_has_signals() {
        for entry in industry_table().entries() {
            assert!(!entry.keywords.is_empty(), "{} has no keywords", entry.id);
            assert!(!entry.patterns.is_empty(), "{} has no patterns", entry.id);
            assert!(!entry.category_noun.is_empty());
        }
    }

    #[test]
    fn test_importance_defaults_to_one() {
        let saas = industry_table().get("saas").expect("saas");
        assert!((saas.importance_of("switching-costs") - 1.4).abs() < f64::EPSILON);
        assert!((saas.importance_of("not-a-moat") - 1.0).abs() < f64::EPSILON);
    }
}
