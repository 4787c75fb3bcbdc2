//! Competitive moat extraction
//!
//! Scores a brand against seven moat categories. Each category combines
//! structured business metrics (tiered), an industry-affinity signal that
//! fires when the brand's industry leans on that moat, and a regex over the
//! brand description.
//!
//! ```text
//! overall = Σ(score × importance) / Σ importance   over the top 3 moats
//! rating  = wide ≥ 60, narrow ≥ 30, otherwise none
//! ```

use super::{build_dimension, outcome, recommend, strength_for, text_signal, tiered};
use crate::classifier::{detect_industry_with, IndustryQuery};
use crate::config::{ClassifierSettings, MoatSettings};
use crate::models::{round1, DimensionScore, MoatRating, SignalOutcome, Strength};
use crate::signals::{industry_table, LazyRegex, SignalEntry, SignalTable, DEFAULT_IMPORTANCE};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

/// Moat category ids and display names, in reporting order
pub const MOAT_CATEGORIES: &[(&str, &str)] = &[
    ("network-effects", "Network Effects"),
    ("switching-costs", "Switching Costs"),
    ("brand", "Brand"),
    ("cost-advantage", "Cost Advantage"),
    ("intangible-assets", "Intangible Assets"),
    ("data-advantage", "Data Advantage"),
    ("efficient-scale", "Efficient Scale"),
];

static NETWORK_TEXT: LazyRegex = LazyRegex::new(
    r"\b(network|community|marketplace|two[- ]sided|ecosystem|user[- ]generated|referrals?|viral)\b",
);
static SWITCHING_TEXT: LazyRegex = LazyRegex::new(
    r"\b(integrat\w*|workflows?|onboarding|migrations?|contracts?|enterprise|embedded|system of record|api)\b",
);
static BRAND_TEXT: LazyRegex = LazyRegex::new(
    r"\b(trusted|award[- ]winning|awards?|leading|iconic|household name|recogni[sz]ed|premium|beloved|loyal)\b",
);
static COST_TEXT: LazyRegex = LazyRegex::new(
    r"\b(low[- ]cost|lowest prices?|cheapest|affordable|economies of scale|efficien\w+|vertically integrated|supply chain)\b",
);
static INTANGIBLE_TEXT: LazyRegex = LazyRegex::new(
    r"\b(patent\w*|proprietary|licensed|regulated|fda|trademarks?|exclusive|certified|accredited)\b",
);
static DATA_TEXT: LazyRegex = LazyRegex::new(
    r"\b(proprietary data|first[- ]party data|machine learning|ai[- ]powered|personali[sz]\w+|data network|datasets?|benchmarks?)\b",
);
static SCALE_TEXT: LazyRegex = LazyRegex::new(
    r"\b(niche|specialized|only provider|regional|infrastructure|logistics|local monopoly|limited market)\b",
);

/// Business facts about a brand (camelCase in JSON)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoatInput {
    #[serde(default)]
    pub brand_name: String,
    /// Industry slug; detected from name and description when absent
    #[serde(default)]
    pub industry_slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub customer_count: Option<u64>,
    #[serde(default)]
    pub years_in_business: Option<f64>,
    #[serde(default)]
    pub patent_count: Option<u32>,
    #[serde(default)]
    pub integration_count: Option<u32>,
    /// Percent, 0-100
    #[serde(default)]
    pub market_share: Option<f64>,
    #[serde(default)]
    pub annual_revenue: Option<f64>,
    /// Percent, e.g. 115 for 115% NRR
    #[serde(default)]
    pub net_revenue_retention: Option<f64>,
    /// Percent, 0-100
    #[serde(default)]
    pub gross_margin: Option<f64>,
    /// Aided awareness, percent 0-100
    #[serde(default)]
    pub brand_awareness: Option<f64>,
    #[serde(default)]
    pub has_proprietary_data: Option<bool>,
    #[serde(default)]
    pub regulatory_licenses: Option<u32>,
}

/// A detected (non-absent) moat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Moat {
    pub category: String,
    pub name: String,
    pub score: f64,
    pub strength: Strength,
    #[serde(default)]
    pub evidence: Vec<String>,
}

/// Result of [`extract_moats`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoatAssessment {
    pub brand_name: String,
    pub industry_id: String,
    pub industry_name: String,
    /// True when the industry was classified rather than given
    pub industry_detected: bool,
    pub overall_score: f64,
    pub rating: MoatRating,
    /// Non-absent moats, strongest first
    pub moats: Vec<Moat>,
    /// Every category, in [`MOAT_CATEGORIES`] order
    pub dimensions: Vec<DimensionScore>,
    pub recommendations: Vec<String>,
}

struct Industry<'t> {
    id: String,
    name: String,
    entry: Option<&'t SignalEntry>,
    detected: bool,
}

impl Industry<'_> {
    fn importance(&self, moat_id: &str) -> f64 {
        self.entry
            .map(|e| e.importance_of(moat_id))
            .unwrap_or(DEFAULT_IMPORTANCE)
    }
}

/// Extract moats using the built-in industry table
pub fn extract_moats(input: &MoatInput, settings: &MoatSettings) -> MoatAssessment {
    extract_moats_with(input, industry_table(), &ClassifierSettings::default(), settings)
}

/// Extract moats with an explicit industry table and classifier settings
pub fn extract_moats_with(
    input: &MoatInput,
    industries: &SignalTable,
    classifier: &ClassifierSettings,
    settings: &MoatSettings,
) -> MoatAssessment {
    let industry = resolve_industry(input, industries, classifier);
    let text = input.description.as_deref().unwrap_or("").to_lowercase();

    let dimensions: Vec<DimensionScore> = MOAT_CATEGORIES
        .iter()
        .map(|(id, name)| {
            let mut signals = structured_signals(id, input);
            signals.extend(affinity_signal(id, &industry, settings));
            signals.push(description_signal(id, &text));
            build_dimension(id, name, signals, |score| {
                strength_for(score, settings).to_string()
            })
        })
        .collect();

    // Strongest first; ties keep category order
    let mut ranked: Vec<&DimensionScore> = dimensions.iter().collect();
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    let top: Vec<&DimensionScore> = ranked.iter().take(settings.top_moats).copied().collect();
    let weight_sum: f64 = top.iter().map(|d| industry.importance(&d.id)).sum();
    let overall = if weight_sum > 0.0 {
        top.iter()
            .map(|d| d.score * industry.importance(&d.id))
            .sum::<f64>()
            / weight_sum
    } else {
        0.0
    };
    let overall = round1(overall.clamp(0.0, 100.0));

    let rating = if overall >= settings.wide_threshold {
        MoatRating::Wide
    } else if overall >= settings.narrow_threshold {
        MoatRating::Narrow
    } else {
        MoatRating::None
    };

    let moats: Vec<Moat> = ranked
        .iter()
        .filter_map(|d| {
            let strength = strength_for(d.score, settings);
            (strength != Strength::Absent).then(|| Moat {
                category: d.id.clone(),
                name: d.name.clone(),
                score: d.score,
                strength,
                evidence: d.evidence.clone(),
            })
        })
        .collect();

    // Most important weak/absent moats first, then the lowest scores
    let mut gaps: Vec<&DimensionScore> = dimensions
        .iter()
        .filter(|d| strength_for(d.score, settings) <= Strength::Weak)
        .collect();
    gaps.sort_by(|a, b| {
        industry
            .importance(&b.id)
            .partial_cmp(&industry.importance(&a.id))
            .unwrap_or(Ordering::Equal)
            .then(a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal))
    });
    let recommendations = recommend(gaps, 1, settings.max_recommendations);

    debug!(
        "Moats for '{}' ({}): overall {:.1} ({}), {} detected",
        input.brand_name,
        industry.id,
        overall,
        rating,
        moats.len()
    );

    MoatAssessment {
        brand_name: input.brand_name.clone(),
        industry_id: industry.id,
        industry_name: industry.name,
        industry_detected: industry.detected,
        overall_score: overall,
        rating,
        moats,
        dimensions,
        recommendations,
    }
}

fn resolve_industry<'t>(
    input: &MoatInput,
    table: &'t SignalTable,
    classifier: &ClassifierSettings,
) -> Industry<'t> {
    let general = || Industry {
        id: table.fallback().id.clone(),
        name: table.fallback().name.clone(),
        entry: None,
        detected: false,
    };

    match input.industry_slug.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(slug) => match table.get(slug) {
            Some(entry) => Industry {
                id: entry.id.clone(),
                name: entry.name.clone(),
                entry: Some(entry),
                detected: false,
            },
            None => {
                debug!("Unknown industry '{}', using {}", slug, table.fallback().id);
                general()
            }
        },
        None => {
            let query = IndustryQuery {
                brand_name: Some(input.brand_name.clone()),
                description: input.description.clone(),
                ..Default::default()
            };
            let result = detect_industry_with(table, classifier, &query);
            match table.get(&result.category_id) {
                Some(entry) if !result.used_fallback => Industry {
                    id: entry.id.clone(),
                    name: entry.name.clone(),
                    entry: Some(entry),
                    detected: true,
                },
                _ => Industry {
                    detected: true,
                    ..general()
                },
            }
        }
    }
}

/// Brand has no affinity signal: awareness already reflects the industry
fn affinity_signal(
    moat_id: &str,
    industry: &Industry<'_>,
    settings: &MoatSettings,
) -> Option<SignalOutcome> {
    let weight = match moat_id {
        "network-effects" | "efficient-scale" => 25.0,
        "switching-costs" => 20.0,
        "intangible-assets" | "data-advantage" => 15.0,
        "cost-advantage" => 10.0,
        _ => return None,
    };
    let importance = industry.importance(moat_id);
    let credit = if importance >= settings.affinity_importance { 1.0 } else { 0.0 };
    Some(outcome(
        "industry-affinity",
        "Industry affinity",
        weight,
        credit,
        Some(format!("{} rewards this moat (x{importance:.1})", industry.name)),
        "Double down on the moat your industry rewards most",
    ))
}

fn description_signal(moat_id: &str, text: &str) -> SignalOutcome {
    let (regex, weight, advice) = match moat_id {
        "network-effects" => (
            &NETWORK_TEXT,
            15.0,
            "Describe the community, marketplace or ecosystem that grows with every user",
        ),
        "switching-costs" => (
            &SWITCHING_TEXT,
            20.0,
            "Explain how deeply the product embeds in customer workflows",
        ),
        "brand" => (&BRAND_TEXT, 20.0, "Surface awards, recognition and customer loyalty"),
        "cost-advantage" => (
            &COST_TEXT,
            15.0,
            "Make structural cost advantages explicit in positioning",
        ),
        "intangible-assets" => (
            &INTANGIBLE_TEXT,
            20.0,
            "Highlight patents, licenses and certifications competitors cannot copy",
        ),
        "data-advantage" => (
            &DATA_TEXT,
            25.0,
            "Show how proprietary data improves the product over time",
        ),
        _ => (
            &SCALE_TEXT,
            20.0,
            "Articulate why the market only supports a few providers",
        ),
    };
    text_signal("description", "Positioning language", weight, regex, text, 0.6, advice)
}

fn structured_signals(moat_id: &str, input: &MoatInput) -> Vec<SignalOutcome> {
    let customers = input.customer_count.map(|c| c as f64);
    let integrations = input.integration_count.map(f64::from);
    let customers_ev = input.customer_count.map(|c| format!("{} customers", thousands(c)));
    let integrations_ev = input.integration_count.map(|n| format!("{n} integrations"));
    let years_ev = input.years_in_business.map(|y| format!("{y} years in business"));
    let share_ev = input.market_share.map(|s| format!("{s}% market share"));

    match moat_id {
        "network-effects" => vec![
            outcome(
                "customers",
                "Customer base",
                50.0,
                tiered(customers, &[(100_000.0, 1.0), (10_000.0, 0.6), (1_000.0, 0.3)]),
                customers_ev,
                "Grow the active customer base; network effects need scale",
            ),
            outcome(
                "integrations",
                "Integration ecosystem",
                10.0,
                tiered(integrations, &[(50.0, 1.0), (10.0, 0.5)]),
                integrations_ev,
                "Build an integration ecosystem partners can plug into",
            ),
        ],
        "switching-costs" => vec![
            outcome(
                "net-revenue-retention",
                "Net revenue retention",
                35.0,
                tiered(input.net_revenue_retention, &[(120.0, 1.0), (100.0, 0.6), (90.0, 0.3)]),
                input.net_revenue_retention.map(|n| format!("{n}% net revenue retention")),
                "Lift net revenue retention with expansion paths and onboarding",
            ),
            outcome(
                "integrations",
                "Integrations",
                25.0,
                tiered(integrations, &[(100.0, 1.0), (25.0, 0.6), (5.0, 0.3)]),
                integrations_ev,
                "Add integrations that tie the product into customers' stacks",
            ),
        ],
        "brand" => vec![
            outcome(
                "years-in-business",
                "Track record",
                30.0,
                tiered(input.years_in_business, &[(20.0, 1.0), (10.0, 0.7), (5.0, 0.4)]),
                years_ev,
                "Lean on longevity and heritage in brand messaging",
            ),
            outcome(
                "brand-awareness",
                "Brand awareness",
                35.0,
                tiered(input.brand_awareness, &[(50.0, 1.0), (20.0, 0.6), (5.0, 0.3)]),
                input.brand_awareness.map(|a| format!("{a}% aided awareness")),
                "Invest in awareness so the brand comes to mind unprompted",
            ),
            outcome(
                "customers",
                "Customer reach",
                15.0,
                tiered(customers, &[(1_000_000.0, 1.0), (100_000.0, 0.6)]),
                customers_ev,
                "Broaden reach beyond the core customer base",
            ),
        ],
        "cost-advantage" => vec![
            outcome(
                "gross-margin",
                "Gross margin",
                25.0,
                tiered(input.gross_margin, &[(60.0, 1.0), (40.0, 0.5)]),
                input.gross_margin.map(|g| format!("{g}% gross margin")),
                "Improve gross margin to fund price leadership",
            ),
            outcome(
                "market-share",
                "Market share",
                30.0,
                tiered(input.market_share, &[(30.0, 1.0), (10.0, 0.6), (3.0, 0.3)]),
                share_ev.clone(),
                "Gain share to unlock economies of scale",
            ),
            outcome(
                "revenue",
                "Revenue scale",
                20.0,
                tiered(input.annual_revenue, &[(1e9, 1.0), (1e8, 0.6), (1e7, 0.3)]),
                input.annual_revenue.map(|r| format!("${} annual revenue", thousands(r as u64))),
                "Scale revenue so fixed costs spread thinner",
            ),
        ],
        "intangible-assets" => vec![
            outcome(
                "patents",
                "Patents",
                40.0,
                tiered(input.patent_count.map(f64::from), &[(50.0, 1.0), (10.0, 0.6), (1.0, 0.3)]),
                input.patent_count.map(|p| format!("{p} patents")),
                "Protect core technology with patents",
            ),
            outcome(
                "regulatory-licenses",
                "Regulatory licenses",
                25.0,
                tiered(input.regulatory_licenses.map(f64::from), &[(3.0, 1.0), (1.0, 0.6)]),
                input.regulatory_licenses.map(|l| format!("{l} regulatory licenses")),
                "Secure licenses or certifications that raise the bar for entrants",
            ),
        ],
        "data-advantage" => vec![
            outcome(
                "proprietary-data",
                "Proprietary data",
                40.0,
                if input.has_proprietary_data == Some(true) { 1.0 } else { 0.0 },
                Some("owns proprietary data".to_string()),
                "Build a proprietary dataset competitors cannot buy",
            ),
            outcome(
                "customers",
                "Data volume",
                20.0,
                tiered(customers, &[(1_000_000.0, 1.0), (100_000.0, 0.6), (10_000.0, 0.3)]),
                customers_ev,
                "Grow usage to feed a data flywheel",
            ),
        ],
        _ => vec![
            outcome(
                "market-share",
                "Market share",
                40.0,
                tiered(input.market_share, &[(50.0, 1.0), (25.0, 0.6), (10.0, 0.3)]),
                share_ev,
                "Concentrate on a market small enough to dominate",
            ),
            outcome(
                "years-in-business",
                "Incumbency",
                15.0,
                tiered(input.years_in_business, &[(10.0, 1.0), (5.0, 0.5)]),
                years_ev,
                "Entrench as the incumbent in the niche",
            ),
        ],
    }
}

/// 1234567 -> "1,234,567"
fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saas_input() -> MoatInput {
        MoatInput {
            brand_name: "Acme CRM".into(),
            industry_slug: Some("saas".into()),
            customer_count: Some(500_000),
            ..Default::default()
        }
    }

    fn dim<'a>(a: &'a MoatAssessment, id: &str) -> &'a DimensionScore {
        a.dimensions.iter().find(|d| d.id == id).expect("dimension present")
    }

    #[test]
    fn test_network_effects_from_customers_and_affinity() {
        let a = extract_moats(&saas_input(), &MoatSettings::default());
        let network = dim(&a, "network-effects");
        assert_eq!(network.score, 75.0);
        assert_eq!(network.bucket, "strong");

        let top = a.moats.first().expect("at least one moat");
        assert_eq!(top.category, "network-effects");
        assert_eq!(top.strength, Strength::Strong);
        assert!(top.evidence.iter().any(|e| e == "500,000 customers"));
    }

    #[test]
    fn test_overall_is_importance_weighted_top_three() {
        let a = extract_moats(&saas_input(), &MoatSettings::default());
        // network 75 (x1.2), data 27 (x1.2), switching 20 (x1.4)
        assert_eq!(a.overall_score, 39.6);
        assert_eq!(a.rating, MoatRating::Narrow);
    }

    #[test]
    fn test_empty_input_has_no_moat() {
        let input = MoatInput {
            brand_name: "Nobody".into(),
            ..Default::default()
        };
        let a = extract_moats(&input, &MoatSettings::default());
        assert_eq!(a.industry_id, "general");
        assert!(a.industry_detected);
        assert_eq!(a.overall_score, 0.0);
        assert_eq!(a.rating, MoatRating::None);
        assert!(a.moats.is_empty());
        assert_eq!(a.dimensions.len(), MOAT_CATEGORIES.len());
        assert!(!a.recommendations.is_empty());
        assert!(a.recommendations.len() <= MoatSettings::default().max_recommendations);
    }

    #[test]
    fn test_unknown_slug_resolves_to_general() {
        let input = MoatInput {
            brand_name: "Acme".into(),
            industry_slug: Some("underwater-basket-weaving".into()),
            ..Default::default()
        };
        let a = extract_moats(&input, &MoatSettings::default());
        assert_eq!(a.industry_id, "general");
        assert!(!a.industry_detected);
    }

    #[test]
    fn test_industry_detected_from_description() {
        let input = MoatInput {
            brand_name: "Ledgerly".into(),
            description: Some("Online banking and payment processing for freelancers".into()),
            ..Default::default()
        };
        let a = extract_moats(&input, &MoatSettings::default());
        assert_eq!(a.industry_id, "fintech");
        assert!(a.industry_detected);
    }

    #[test]
    fn test_description_language_counts() {
        let mut input = saas_input();
        input.description =
            Some("A two-sided marketplace with a thriving community and API".into());
        let a = extract_moats(&input, &MoatSettings::default());
        let network = dim(&a, "network-effects");
        assert_eq!(network.score, 90.0);
        assert!(network.evidence.iter().any(|e| e.contains("marketplace")));
    }

    #[test]
    fn test_scores_stay_in_range() {
        let input = MoatInput {
            brand_name: "Giant".into(),
            industry_slug: Some("fintech".into()),
            description: Some(
                "Trusted, award-winning, patented, proprietary data, marketplace, integrations, \
                 low-cost, niche infrastructure"
                    .into(),
            ),
            customer_count: Some(50_000_000),
            years_in_business: Some(40.0),
            patent_count: Some(500),
            integration_count: Some(1000),
            market_share: Some(80.0),
            annual_revenue: Some(5e10),
            net_revenue_retention: Some(140.0),
            gross_margin: Some(85.0),
            brand_awareness: Some(90.0),
            has_proprietary_data: Some(true),
            regulatory_licenses: Some(12),
        };
        let a = extract_moats(&input, &MoatSettings::default());
        for d in &a.dimensions {
            assert!((0.0..=100.0).contains(&d.score), "{} out of range", d.id);
        }
        assert_eq!(a.rating, MoatRating::Wide);
    }

    #[test]
    fn test_thousands_separator() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_moat_extraction_is_deterministic() {
        let input = MoatInput {
            description: Some(
                "Marketplace platform with proprietary data, patented algorithms and \
                 deep integrations with 200 partners"
                    .into(),
            ),
            years_in_business: Some(12.0),
            patent_count: Some(8),
            integration_count: Some(200),
            net_revenue_retention: Some(118.0),
            ..saas_input()
        };
        let settings = MoatSettings::default();
        let first = extract_moats(&input, &settings);
        for _ in 0..5 {
            assert_eq!(extract_moats(&input, &settings), first);
        }
    }
}
