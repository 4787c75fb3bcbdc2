//! MRR/ARR projection for subscription businesses
//!
//! Each month, in order:
//!
//! ```text
//! churned   = MRR × churn
//! expansion = (MRR − churned) × expansion_rate
//! new       = new_customers × ARPU
//! MRR'      = MRR − churned + expansion + new
//! ARR       = 12 × MRR
//! ```

use crate::error::{MoatscopeError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Longest projection accepted, in months
pub const MAX_MONTHS: u32 = 120;

/// Unit economics to project from (camelCase in JSON). Rates are fractions.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceInput {
    #[serde(default)]
    pub starting_customers: f64,
    /// Average revenue per customer per month
    pub arpu: f64,
    #[serde(default)]
    pub new_customers_per_month: f64,
    /// Monthly logo churn, e.g. 0.02
    #[serde(default)]
    pub monthly_churn_rate: f64,
    /// Monthly expansion on retained revenue, e.g. 0.01
    #[serde(default)]
    pub expansion_rate: f64,
    #[serde(default = "default_gross_margin")]
    pub gross_margin: f64,
    /// Customer acquisition cost
    #[serde(default)]
    pub cac: Option<f64>,
    #[serde(default = "default_months")]
    pub months: u32,
}

fn default_gross_margin() -> f64 {
    0.8
}
fn default_months() -> u32 {
    12
}

impl Default for FinanceInput {
    fn default() -> Self {
        Self {
            starting_customers: 0.0,
            arpu: 0.0,
            new_customers_per_month: 0.0,
            monthly_churn_rate: 0.0,
            expansion_rate: 0.0,
            gross_margin: default_gross_margin(),
            cac: None,
            months: default_months(),
        }
    }
}

impl FinanceInput {
    /// Reject negative amounts, rates outside `[0, 1]` and bad horizons
    pub fn validate(&self) -> Result<()> {
        let amounts = [
            ("startingCustomers", self.starting_customers),
            ("arpu", self.arpu),
            ("newCustomersPerMonth", self.new_customers_per_month),
            ("cac", self.cac.unwrap_or(0.0)),
        ];
        for (name, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                return Err(MoatscopeError::InvalidInput(format!(
                    "{name} must be a non-negative number (got {value})"
                )));
            }
        }

        let rates = [
            ("monthlyChurnRate", self.monthly_churn_rate),
            ("expansionRate", self.expansion_rate),
            ("grossMargin", self.gross_margin),
        ];
        for (name, value) in rates {
            if !(0.0..=1.0).contains(&value) {
                return Err(MoatscopeError::InvalidInput(format!(
                    "{name} must be between 0 and 1 (got {value})"
                )));
            }
        }

        if self.months == 0 || self.months > MAX_MONTHS {
            return Err(MoatscopeError::InvalidInput(format!(
                "months must be between 1 and {MAX_MONTHS} (got {})",
                self.months
            )));
        }
        Ok(())
    }
}

/// One projected month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthProjection {
    pub month: u32,
    pub customers: f64,
    pub new_mrr: f64,
    pub churned_mrr: f64,
    pub expansion_mrr: f64,
    pub mrr: f64,
    pub arr: f64,
}

/// Headline metrics over the projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceSummary {
    pub starting_mrr: f64,
    pub ending_mrr: f64,
    pub ending_arr: f64,
    pub ending_customers: f64,
    /// `None` when starting MRR is zero
    pub mrr_growth_pct: Option<f64>,
    /// Lifetime value; `None` with zero churn
    pub ltv: Option<f64>,
    pub cac_payback_months: Option<f64>,
    pub ltv_to_cac: Option<f64>,
    /// Annualised net revenue retention, percent
    pub net_revenue_retention: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceProjection {
    pub months: Vec<MonthProjection>,
    pub summary: FinanceSummary,
}

/// Project MRR and ARR month by month
pub fn project(input: &FinanceInput) -> Result<FinanceProjection> {
    input.validate()?;

    let churn = input.monthly_churn_rate;
    let starting_mrr = input.starting_customers * input.arpu;
    let mut customers = input.starting_customers;
    let mut mrr = starting_mrr;
    let mut months = Vec::with_capacity(input.months as usize);

    for month in 1..=input.months {
        let churned_mrr = mrr * churn;
        let expansion_mrr = (mrr - churned_mrr) * input.expansion_rate;
        let new_mrr = input.new_customers_per_month * input.arpu;
        mrr = mrr - churned_mrr + expansion_mrr + new_mrr;
        customers = customers - customers * churn + input.new_customers_per_month;

        months.push(MonthProjection {
            month,
            customers,
            new_mrr,
            churned_mrr,
            expansion_mrr,
            mrr,
            arr: mrr * 12.0,
        });
    }

    let margin_per_month = input.arpu * input.gross_margin;
    let ltv = (churn > 0.0).then(|| margin_per_month / churn);
    let cac = input.cac.filter(|c| *c > 0.0);
    let summary = FinanceSummary {
        starting_mrr,
        ending_mrr: mrr,
        ending_arr: mrr * 12.0,
        ending_customers: customers,
        mrr_growth_pct: (starting_mrr > 0.0).then(|| (mrr - starting_mrr) / starting_mrr * 100.0),
        ltv,
        cac_payback_months: cac
            .filter(|_| margin_per_month > 0.0)
            .map(|c| c / margin_per_month),
        ltv_to_cac: ltv.zip(cac).map(|(l, c)| l / c),
        net_revenue_retention: ((1.0 - churn) * (1.0 + input.expansion_rate)).powi(12) * 100.0,
    };

    debug!(
        "Projected {} months: MRR {:.2} -> {:.2}",
        input.months, starting_mrr, mrr
    );

    Ok(FinanceProjection { months, summary })
}
