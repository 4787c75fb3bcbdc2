//! Glossary of the metrics and terms moatscope reports

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlossaryEntry {
    pub term: &'static str,
    pub aliases: &'static [&'static str],
    pub definition: &'static str,
    pub related: &'static [&'static str],
}

const ENTRIES: &[GlossaryEntry] = &[
    GlossaryEntry {
        term: "MRR",
        aliases: &["monthly recurring revenue"],
        definition: "Monthly Recurring Revenue: subscription revenue normalised to one month.",
        related: &["ARR", "ARPU", "Churn rate"],
    },
    GlossaryEntry {
        term: "ARR",
        aliases: &["annual recurring revenue", "annualized recurring revenue"],
        definition: "Annual Recurring Revenue: twelve times MRR.",
        related: &["MRR"],
    },
    GlossaryEntry {
        term: "ARPU",
        aliases: &["average revenue per user", "average revenue per account", "arpa"],
        definition: "Average monthly revenue per customer.",
        related: &["MRR", "LTV"],
    },
    GlossaryEntry {
        term: "Churn rate",
        aliases: &["churn", "logo churn"],
        definition: "Share of customers (or revenue) lost in a month.",
        related: &["Net revenue retention", "LTV"],
    },
    GlossaryEntry {
        term: "Net revenue retention",
        aliases: &["nrr", "net dollar retention", "ndr"],
        definition: "Revenue kept from an existing cohort after churn and expansion, \
                     as a percent of where it started. Above 100% means the cohort grows.",
        related: &["Churn rate", "Switching costs"],
    },
    GlossaryEntry {
        term: "LTV",
        aliases: &["lifetime value", "customer lifetime value", "clv", "cltv"],
        definition: "Gross profit a customer brings in over their lifetime: ARPU x gross margin / churn.",
        related: &["CAC", "LTV:CAC"],
    },
    GlossaryEntry {
        term: "CAC",
        aliases: &["customer acquisition cost"],
        definition: "Sales and marketing spend needed to win one customer.",
        related: &["LTV", "CAC payback"],
    },
    GlossaryEntry {
        term: "CAC payback",
        aliases: &["payback period"],
        definition: "Months of gross profit needed to earn back CAC.",
        related: &["CAC"],
    },
    GlossaryEntry {
        term: "LTV:CAC",
        aliases: &["ltv to cac"],
        definition: "Lifetime value divided by acquisition cost; 3 or more is usually healthy.",
        related: &["LTV", "CAC"],
    },
    GlossaryEntry {
        term: "E-E-A-T",
        aliases: &["eat", "experience expertise authoritativeness trustworthiness"],
        definition: "Experience, Expertise, Authoritativeness, Trustworthiness: a content-quality \
                     framework used to judge whether a page deserves to be cited.",
        related: &["Search intent"],
    },
    GlossaryEntry {
        term: "Moat",
        aliases: &["economic moat", "competitive moat"],
        definition: "A structural competitive advantage such as network effects or switching costs.",
        related: &["Network effects", "Switching costs"],
    },
    GlossaryEntry {
        term: "Network effects",
        aliases: &["network effect"],
        definition: "The product gets more valuable to each user as more people use it.",
        related: &["Moat"],
    },
    GlossaryEntry {
        term: "Switching costs",
        aliases: &["switching cost", "lock-in"],
        definition: "Effort, risk or money a customer must spend to leave for a competitor.",
        related: &["Moat", "Net revenue retention"],
    },
    GlossaryEntry {
        term: "RLHF",
        aliases: &["reinforcement learning from human feedback"],
        definition: "Reinforcement Learning from Human Feedback. Here: collecting implicit \
                     signals and mining preference pairs, not a training loop.",
        related: &["Preference pair", "Implicit feedback"],
    },
    GlossaryEntry {
        term: "Preference pair",
        aliases: &["preference pairs", "chosen rejected pair"],
        definition: "Two responses to the same prompt where users clearly preferred one.",
        related: &["RLHF"],
    },
    GlossaryEntry {
        term: "Implicit feedback",
        aliases: &["implicit signal", "implicit signals"],
        definition: "Preference inferred from behaviour (copy, share, regenerate, dwell time) \
                     rather than explicit ratings.",
        related: &["RLHF"],
    },
    GlossaryEntry {
        term: "Search intent",
        aliases: &["intent", "query intent"],
        definition: "What the searcher wants: information, a comparison, a purchase, a site or a \
                     local provider.",
        related: &["E-E-A-T"],
    },
];

/// All entries, in display order
pub fn entries() -> &'static [GlossaryEntry] {
    ENTRIES
}

/// Find an entry by term or alias, ignoring case and punctuation
pub fn lookup(term: &str) -> Option<&'static GlossaryEntry> {
    let wanted = key(term);
    if wanted.is_empty() {
        return None;
    }
    ENTRIES
        .iter()
        .find(|e| key(e.term) == wanted || e.aliases.iter().any(|a| key(a) == wanted))
}

fn key(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_ignores_case_and_punctuation() {
        assert_eq!(lookup("eeat").map(|e| e.term), Some("E-E-A-T"));
        assert_eq!(lookup("E-E-A-T").map(|e| e.term), Some("E-E-A-T"));
        assert_eq!(lookup("Monthly Recurring Revenue").map(|e| e.term), Some("MRR"));
        assert_eq!(lookup("nrr").map(|e| e.term), Some("Net revenue retention"));
        assert!(lookup("").is_none());
        assert!(lookup("blockchain").is_none());
    }

    #[test]
    fn test_keys_are_unique() {
        let mut keys: Vec<String> = entries()
            .iter()
            .flat_map(|e| std::iter::once(e.term).chain(e.aliases.iter().copied()))
            .map(key)
            .collect();
        let total = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), total);
    }

    #[test]
    fn test_related_terms_resolve() {
        for entry in entries() {
            for related in entry.related {
                assert!(lookup(related).is_some(), "{} -> {}", entry.term, related);
            }
        }
    }
}
