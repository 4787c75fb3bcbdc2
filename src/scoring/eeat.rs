//! E-E-A-T content assessment
//!
//! Scores a page on Experience, Expertise, Authoritativeness and
//! Trustworthiness from its text plus whatever site facts the caller knows.
//!
//! ```text
//! overall = experience × 0.20 + expertise × 0.25
//!         + authoritativeness × 0.25 + trustworthiness × 0.30
//! ```
//!
//! Freshness needs both `lastUpdated` and `asOf`; the assessor never reads
//! the clock.

use super::{build_dimension, flag_signal, outcome, rating_for, recommend, text_signal, tiered};
use crate::config::EeatSettings;
use crate::models::{round1, DimensionScore, Rating, SignalOutcome};
use crate::signals::LazyRegex;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

static FIRST_HAND: LazyRegex = LazyRegex::new(
    r"\b(i tested|i've tested|i have tested|i used|i've used|i have used|in my experience|we tried|we tested|hands[- ]on|i personally|our team tested|after using|i spent)\b",
);
static SPECIFICS: LazyRegex = LazyRegex::new(
    r"\b\d+(?:\.\d+)?\s?(?:%|(?:percent|hours?|days?|weeks?|months?|years?|users|customers|minutes)\b)",
);
static ORIGINAL_MEDIA: LazyRegex = LazyRegex::new(
    r"\b(screenshots?|photos?|videos?|we measured|our data|our results|case study)\b",
);
static EXPERIENCE_BIO: LazyRegex = LazyRegex::new(
    r"\b(\d+\+? years|years of experience|worked (?:at|as|with)|founded|led|practic(?:ing|ed))\b",
);
static CREDENTIAL_TERMS: LazyRegex = LazyRegex::new(
    r"\b(ph\.d|phd|cpa|cfa|mba|certified|licensed|board[- ]certified|professor|engineer|registered|dr)\b",
);
static LINKS: LazyRegex = LazyRegex::new(r"https?://[^\s)\]>]+");
static AUTHORITATIVE_SOURCES: LazyRegex = LazyRegex::new(
    r"(\.gov\b|\.edu\b|\baccording to\b|\bstud(?:y|ies)\b|\bresearch\b|\bjournal\b|\bpeer[- ]reviewed\b|\bsurvey\b)",
);
static SPAM_MARKERS: LazyRegex = LazyRegex::new(
    r"(click here|buy now|\bcheap\b|100% guaranteed|guaranteed results|act now|limited time|free money|miracle|!!+)",
);

/// Page content and site facts (camelCase in JSON)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EeatInput {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub author_credentials: Vec<String>,
    #[serde(default)]
    pub author_bio: Option<String>,
    #[serde(default)]
    pub last_updated: Option<NaiveDate>,
    /// Reference date for freshness
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
    #[serde(default)]
    pub has_about_page: Option<bool>,
    #[serde(default)]
    pub has_contact_info: Option<bool>,
    #[serde(default)]
    pub has_privacy_policy: Option<bool>,
    /// Counted from links in the content when absent
    #[serde(default)]
    pub external_citations: Option<u32>,
    #[serde(default)]
    pub backlink_count: Option<u64>,
    #[serde(default)]
    pub domain_age_years: Option<f64>,
}

/// Result of [`assess_eeat`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EeatAssessment {
    pub overall_score: f64,
    pub rating: Rating,
    pub word_count: usize,
    /// experience, expertise, authoritativeness, trustworthiness
    pub dimensions: Vec<DimensionScore>,
    pub recommendations: Vec<String>,
}

impl EeatAssessment {
    pub fn dimension(&self, id: &str) -> Option<&DimensionScore> {
        self.dimensions.iter().find(|d| d.id == id)
    }

    fn dimension_score(&self, id: &str) -> f64 {
        self.dimension(id).map(|d| d.score).unwrap_or(0.0)
    }
}

/// Condensed E-E-A-T result for content and URL only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickEeatScore {
    pub score: f64,
    pub rating: Rating,
    pub experience: f64,
    pub expertise: f64,
    pub authoritativeness: f64,
    pub trustworthiness: f64,
}

/// Text facts computed once per assessment
struct ContentStats {
    text: String,
    words: usize,
    structural_lines: usize,
    links: usize,
}

impl ContentStats {
    fn new(content: &str) -> Self {
        let structural_lines = content
            .lines()
            .map(str::trim_start)
            .filter(|l| {
                l.starts_with('#')
                    || l.starts_with("- ")
                    || l.starts_with("* ")
                    || l.split_once(". ")
                        .is_some_and(|(n, _)| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
            })
            .count();
        Self {
            text: content.to_lowercase(),
            words: content.split_whitespace().count(),
            structural_lines,
            links: LINKS.get().find_iter(content).count(),
        }
    }
}

/// Assess content against all four pillars
pub fn assess_eeat(input: &EeatInput, settings: &EeatSettings) -> EeatAssessment {
    let stats = ContentStats::new(&input.content);
    let bucket = |score: f64| rating_for(score, settings).to_string();

    let dimensions = vec![
        build_dimension("experience", "Experience", experience(input, &stats), bucket),
        build_dimension("expertise", "Expertise", expertise(input, &stats), bucket),
        build_dimension(
            "authoritativeness",
            "Authoritativeness",
            authoritativeness(input, &stats),
            bucket,
        ),
        build_dimension(
            "trustworthiness",
            "Trustworthiness",
            trustworthiness(input, &stats, settings),
            bucket,
        ),
    ];

    let w = &settings.weights;
    let weights = [w.experience, w.expertise, w.authoritativeness, w.trustworthiness];
    let weight_sum: f64 = weights.iter().sum();
    let overall = if weight_sum > 0.0 {
        dimensions
            .iter()
            .zip(weights)
            .map(|(d, w)| d.score * w)
            .sum::<f64>()
            / weight_sum
    } else {
        0.0
    };
    let overall = round1(overall.clamp(0.0, 100.0));
    let rating = rating_for(overall, settings);

    let mut weakest: Vec<&DimensionScore> = dimensions
        .iter()
        .filter(|d| rating_for(d.score, settings) < Rating::Excellent)
        .collect();
    weakest.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal));
    let recommendations = recommend(weakest, 2, settings.max_recommendations);

    debug!(
        "E-E-A-T: {:.1} ({}) over {} words",
        overall, rating, stats.words
    );

    EeatAssessment {
        overall_score: overall,
        rating,
        word_count: stats.words,
        dimensions,
        recommendations,
    }
}

/// Assess content and URL alone with default settings
pub fn quick_eeat_score(content: &str, url: Option<&str>) -> QuickEeatScore {
    let input = EeatInput {
        content: content.to_string(),
        url: url.map(str::to_string),
        ..Default::default()
    };
    QuickEeatScore::from(&assess_eeat(&input, &EeatSettings::default()))
}

impl From<&EeatAssessment> for QuickEeatScore {
    fn from(full: &EeatAssessment) -> Self {
        QuickEeatScore {
            score: full.overall_score,
            rating: full.rating,
            experience: full.dimension_score("experience"),
            expertise: full.dimension_score("expertise"),
            authoritativeness: full.dimension_score("authoritativeness"),
            trustworthiness: full.dimension_score("trustworthiness"),
        }
    }
}

fn experience(input: &EeatInput, stats: &ContentStats) -> Vec<SignalOutcome> {
    let specifics = SPECIFICS.get().find_iter(&stats.text).count();
    let bio = input.author_bio.as_deref().unwrap_or("").to_lowercase();
    let bio_hits = EXPERIENCE_BIO.distinct_matches(&bio);

    vec![
        text_signal(
            "first-hand",
            "First-hand language",
            30.0,
            &FIRST_HAND,
            &stats.text,
            0.6,
            "Add first-hand experience: what you tested, used or observed yourself",
        ),
        outcome(
            "specifics",
            "Concrete specifics",
            20.0,
            tiered(Some(specifics as f64), &[(3.0, 1.0), (1.0, 0.5)]),
            Some(format!("{specifics} concrete figures")),
            "Include concrete results from real use (numbers, durations, outcomes)",
        ),
        text_signal(
            "original-media",
            "Original evidence",
            15.0,
            &ORIGINAL_MEDIA,
            &stats.text,
            0.6,
            "Show original evidence such as screenshots, photos or your own data",
        ),
        outcome(
            "author-experience",
            "Author experience",
            20.0,
            if bio_hits.is_empty() { 0.0 } else { 1.0 },
            bio_hits.first().map(|h| format!("author bio: \"{h}\"")),
            "Add an author bio describing relevant hands-on experience",
        ),
        outcome(
            "depth",
            "Coverage depth",
            15.0,
            tiered(Some(stats.words as f64), &[(1500.0, 1.0), (600.0, 0.6), (300.0, 0.3)]),
            Some(format!("{} words", stats.words)),
            "Expand coverage; thin pages rarely show real experience",
        ),
    ]
}

fn expertise(input: &EeatInput, stats: &ContentStats) -> Vec<SignalOutcome> {
    let credentials: Vec<&str> = input
        .author_credentials
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .collect();
    let bio = input.author_bio.as_deref().unwrap_or("").to_lowercase();
    let author = input.author_name.as_deref().map(str::trim).filter(|n| !n.is_empty());

    vec![
        outcome(
            "credentials",
            "Author credentials",
            35.0,
            tiered(Some(credentials.len() as f64), &[(2.0, 1.0), (1.0, 0.7)]),
            Some(format!("credentials: {}", credentials.join(", "))),
            "List author credentials (degrees, certifications, licenses)",
        ),
        text_signal(
            "credential-terms",
            "Credential language",
            20.0,
            &CREDENTIAL_TERMS,
            &format!("{} {}", stats.text, bio),
            1.0,
            "Mention the qualifications behind the advice",
        ),
        outcome(
            "author-named",
            "Named author",
            15.0,
            if author.is_some() { 1.0 } else { 0.0 },
            author.map(|a| format!("by {a}")),
            "Attribute the content to a named author",
        ),
        outcome(
            "technical-depth",
            "Technical depth",
            15.0,
            tiered(Some(stats.words as f64), &[(2000.0, 1.0), (1000.0, 0.6), (500.0, 0.3)]),
            Some(format!("{} words", stats.words)),
            "Go deeper on the subject than a summary would",
        ),
        outcome(
            "structure",
            "Structured content",
            15.0,
            tiered(Some(stats.structural_lines as f64), &[(5.0, 1.0), (2.0, 0.5)]),
            Some(format!("{} headings or list items", stats.structural_lines)),
            "Organise the content with headings and lists",
        ),
    ]
}

fn authoritativeness(input: &EeatInput, stats: &ContentStats) -> Vec<SignalOutcome> {
    let citations = input.external_citations.unwrap_or(stats.links as u32);

    vec![
        outcome(
            "citations",
            "External citations",
            35.0,
            tiered(Some(f64::from(citations)), &[(5.0, 1.0), (2.0, 0.6), (1.0, 0.3)]),
            Some(format!("{citations} citations")),
            "Cite reputable external sources",
        ),
        text_signal(
            "authoritative-sources",
            "Authoritative sources",
            25.0,
            &AUTHORITATIVE_SOURCES,
            &stats.text,
            0.6,
            "Reference research, studies or official (.gov/.edu) sources",
        ),
        outcome(
            "backlinks",
            "Backlinks",
            20.0,
            tiered(input.backlink_count.map(|b| b as f64), &[(1000.0, 1.0), (100.0, 0.6), (10.0, 0.3)]),
            input.backlink_count.map(|b| format!("{b} backlinks")),
            "Earn backlinks from relevant, reputable sites",
        ),
        outcome(
            "domain-age",
            "Domain age",
            20.0,
            tiered(input.domain_age_years, &[(10.0, 1.0), (3.0, 0.6), (1.0, 0.3)]),
            input.domain_age_years.map(|y| format!("domain is {y} years old")),
            "Build a track record on one established domain",
        ),
    ]
}

fn trustworthiness(
    input: &EeatInput,
    stats: &ContentStats,
    settings: &EeatSettings,
) -> Vec<SignalOutcome> {
    let https = input
        .url
        .as_deref()
        .map(|u| u.trim().to_lowercase().starts_with("https://"));

    let freshness = match (input.last_updated, input.as_of) {
        (Some(updated), Some(as_of)) => {
            let days = (as_of - updated).num_days();
            let credit = if days <= settings.freshness_days {
                1.0
            } else if days <= settings.freshness_days * 2 {
                0.5
            } else {
                0.0
            };
            (credit, Some(format!("updated {days} days before {as_of}")))
        }
        _ => (0.0, None),
    };

    // Short content earns nothing here: too little text to judge
    let spam_hits = SPAM_MARKERS.get().find_iter(&stats.text).count();
    let spam_credit = if stats.words < settings.min_words_for_spam_check {
        0.0
    } else {
        match spam_hits {
            0 => 1.0,
            1 => 0.5,
            _ => 0.0,
        }
    };

    vec![
        flag_signal("https", "HTTPS", 25.0, https, "served over HTTPS", "Serve the page over HTTPS"),
        flag_signal(
            "contact",
            "Contact information",
            15.0,
            input.has_contact_info,
            "contact information published",
            "Publish clear contact information",
        ),
        flag_signal(
            "privacy-policy",
            "Privacy policy",
            15.0,
            input.has_privacy_policy,
            "privacy policy linked",
            "Link a privacy policy",
        ),
        flag_signal(
            "about-page",
            "About page",
            10.0,
            input.has_about_page,
            "about page present",
            "Add an about page explaining who is behind the site",
        ),
        outcome(
            "freshness",
            "Freshness",
            15.0,
            freshness.0,
            freshness.1,
            "Review the content regularly and show the last-updated date",
        ),
        outcome(
            "spam-free",
            "Free of spam markers",
            20.0,
            spam_credit,
            Some(format!("{spam_hits} spam markers")),
            "Remove spammy calls to action and exaggerated claims",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strong_input() -> EeatInput {
        let para = "- I tested this tool for 12 weeks with 200 users and in my experience it cut \
                    costs by 30%. According to a 2023 study (https://example.edu/study) certified \
                    analysts agree. Screenshots below.\n";
        EeatInput {
            content: format!("# Review\n{}", para.repeat(26)),
            url: Some("https://example.com/review".into()),
            author_name: Some("Dana Lee".into()),
            author_credentials: vec!["PhD".into(), "CFA".into()],
            author_bio: Some("Analyst with 15 years of experience in fintech.".into()),
            last_updated: NaiveDate::from_ymd_opt(2024, 5, 1),
            as_of: NaiveDate::from_ymd_opt(2024, 6, 1),
            has_about_page: Some(true),
            has_contact_info: Some(true),
            has_privacy_policy: Some(true),
            external_citations: None,
            backlink_count: Some(5000),
            domain_age_years: Some(12.0),
        }
    }

    fn signal<'a>(a: &'a EeatAssessment, dim: &str, id: &str) -> &'a SignalOutcome {
        a.dimension(dim)
            .and_then(|d| d.signals.iter().find(|s| s.id == id))
            .expect("signal present")
    }

    #[test]
    fn test_strong_page_is_excellent() {
        let a = assess_eeat(&strong_input(), &EeatSettings::default());
        assert_eq!(a.rating, Rating::Excellent);
        assert!(a.overall_score >= 80.0);
        assert_eq!(a.dimension("trustworthiness").map(|d| d.score), Some(100.0));
        assert_eq!(a.dimension("authoritativeness").map(|d| d.score), Some(100.0));
        // Citations were counted from links in the content
        assert_eq!(signal(&a, "authoritativeness", "citations").credit, 1.0);
    }

    #[test]
    fn test_spammy_short_page_is_poor() {
        let q = quick_eeat_score("Click here to buy stuff cheap!", Some("http://random.com"));
        assert_eq!(q.rating, Rating::Poor);
        assert_eq!(q.score, 0.0);
        assert_eq!(q.trustworthiness, 0.0);
    }

    #[test]
    fn test_spam_markers_reduce_credit() {
        let filler = "word ".repeat(60);
        let settings = EeatSettings::default();

        let clean = assess_eeat(
            &EeatInput {
                content: filler.clone(),
                ..Default::default()
            },
            &settings,
        );
        assert_eq!(signal(&clean, "trustworthiness", "spam-free").credit, 1.0);

        let one = assess_eeat(
            &EeatInput {
                content: format!("{filler} click here"),
                ..Default::default()
            },
            &settings,
        );
        assert_eq!(signal(&one, "trustworthiness", "spam-free").credit, 0.5);

        let two = assess_eeat(
            &EeatInput {
                content: format!("{filler} click here, buy now"),
                ..Default::default()
            },
            &settings,
        );
        assert_eq!(signal(&two, "trustworthiness", "spam-free").credit, 0.0);
    }

    #[test]
    fn test_freshness_needs_both_dates() {
        let settings = EeatSettings::default();
        let mut input = strong_input();
        input.as_of = None;
        let a = assess_eeat(&input, &settings);
        assert_eq!(signal(&a, "trustworthiness", "freshness").credit, 0.0);

        input.as_of = NaiveDate::from_ymd_opt(2025, 9, 1);
        let a = assess_eeat(&input, &settings);
        assert_eq!(signal(&a, "trustworthiness", "freshness").credit, 0.5);
    }

    #[test]
    fn test_recommendations_target_weakest_pillar() {
        let input = EeatInput {
            content: "A short note.".into(),
            url: Some("https://example.com".into()),
            has_contact_info: Some(true),
            has_privacy_policy: Some(true),
            has_about_page: Some(true),
            ..Default::default()
        };
        let a = assess_eeat(&input, &EeatSettings::default());
        assert!(!a.recommendations.is_empty());
        assert!(a.recommendations.len() <= EeatSettings::default().max_recommendations);
        assert!(!a.recommendations[0].starts_with("Trustworthiness"));
    }

    #[test]
    fn test_dimension_scores_in_range() {
        let a = assess_eeat(&strong_input(), &EeatSettings::default());
        assert_eq!(a.dimensions.len(), 4);
        for d in &a.dimensions {
            assert!((0.0..=100.0).contains(&d.score));
        }
    }

    #[test]
    fn test_input_parses_camel_case() {
        let input: EeatInput = serde_json::from_str(
            r#"{"content": "hi", "authorName": "Sam", "lastUpdated": "2024-01-31", "hasAboutPage": true}"#,
        )
        .expect("parse input");
        assert_eq!(input.author_name.as_deref(), Some("Sam"));
        assert_eq!(input.last_updated, NaiveDate::from_ymd_opt(2024, 1, 31));
    }

    #[test]
    fn test_assessment_is_deterministic() {
        let input = strong_input();
        let settings = EeatSettings::default();
        let first = assess_eeat(&input, &settings);
        let quick = quick_eeat_score(&input.content, input.url.as_deref());
        for _ in 0..5 {
            assert_eq!(assess_eeat(&input, &settings), first);
            assert_eq!(quick_eeat_score(&input.content, input.url.as_deref()), quick);
        }
    }
}
