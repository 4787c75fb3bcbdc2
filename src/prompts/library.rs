//! Built-in prompt templates
//!
//! Placeholders: `{brand}`, `{category}`, `{audience}`.

pub(crate) struct TemplateDef {
    pub id: &'static str,
    pub intent: &'static str,
    /// `None` for templates that fit every industry
    pub industry: Option<&'static str>,
    pub text: &'static str,
}

const fn generic(id: &'static str, intent: &'static str, text: &'static str) -> TemplateDef {
    TemplateDef {
        id,
        intent,
        industry: None,
        text,
    }
}

const fn vertical(
    id: &'static str,
    intent: &'static str,
    industry: &'static str,
    text: &'static str,
) -> TemplateDef {
    TemplateDef {
        id,
        intent,
        industry: Some(industry),
        text,
    }
}

pub(crate) const TEMPLATES: &[TemplateDef] = &[
    // Generic
    generic("what-is-category", "informational", "What is a {category} and how does it work?"),
    generic("choose-category", "informational", "How do {audience} choose the right {category}?"),
    generic("brand-overview", "informational", "What is {brand} known for?"),
    generic("best-category", "commercial", "What is the best {category} for {audience}?"),
    generic("top-category-list", "commercial", "List the top 5 {category} options for {audience} and explain why."),
    generic("brand-review", "commercial", "Is {brand} a good {category}? What do reviews say?"),
    generic("category-pricing", "transactional", "How much does a {category} cost for {audience}?"),
    generic("brand-pricing", "transactional", "What does {brand} cost and is there a free trial or discount?"),
    generic("brand-login", "navigational", "Where do I sign in to {brand}?"),
    generic("brand-support", "navigational", "How do I contact {brand} support?"),
    generic("brand-alternatives", "comparison", "What are the best alternatives to {brand}?"),
    generic("category-compare", "comparison", "Compare the leading {category} options for {audience}."),
    generic("category-near-me", "local", "Which {category} near me do {audience} recommend?"),
    // SaaS & Software
    vertical("saas-stack", "commercial", "saas", "Which {category} should a team of 20 add to its stack?"),
    vertical("saas-integrations", "informational", "saas", "Which {category} integrates best with Slack and Google Workspace?"),
    vertical("saas-vs", "comparison", "saas", "How does {brand} compare with other {category} on price per seat?"),
    vertical("saas-migrate", "transactional", "saas", "How hard is it to migrate from {brand} to another {category}?"),
    // E-commerce
    vertical("ecom-trust", "commercial", "ecommerce", "Is {brand} a trustworthy {category} for {audience}?"),
    vertical("ecom-shipping", "transactional", "ecommerce", "Which {category} offers free shipping and easy returns?"),
    // Fintech
    vertical("fin-fees", "commercial", "fintech", "Which {category} has the lowest fees for {audience}?"),
    vertical("fin-safety", "informational", "fintech", "Is my money safe with {brand}? Is it regulated?"),
    // Healthcare
    vertical("health-provider", "local", "healthcare", "How do I find a reputable {category} near me that accepts my insurance?"),
    vertical("health-telehealth", "commercial", "healthcare", "What is the best telehealth {category} for {audience}?"),
    // Education
    vertical("edu-worth", "commercial", "education", "Is a course from {brand} worth it for {audience}?"),
    vertical("edu-career", "informational", "education", "Which {category} helps {audience} change careers fastest?"),
    // Marketing
    vertical("mkt-ai-visibility", "informational", "marketing", "How can {audience} improve visibility in AI assistant answers?"),
    vertical("mkt-agency", "commercial", "marketing", "Which {category} is best at SEO for {audience}?"),
    // Real estate
    vertical("re-platform", "commercial", "real-estate", "Which {category} gives {audience} the most accurate home values?"),
    // Travel
    vertical("travel-book", "transactional", "travel", "Where can {audience} book cheap flights and hotels together?"),
    // Food
    vertical("food-delivery", "local", "food", "Which restaurants near me deliver late at night?"),
];
