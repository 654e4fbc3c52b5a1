//! Risk classifier — threshold rules over per-customer aggregates.
//!
//! Ruleset: average margin below the configured floor flags
//! LOW_PROFIT; average latency above the configured ceiling flags
//! TECH_RISK. A rule only fires when the customer has at least one
//! sample for its metric, so customers with no qualifying data are
//! never flagged. Customers with zero triggered reasons are omitted
//! from the output entirely.

use crate::{
    config::RiskConfig,
    risk_aggregator::{aggregate, CustomerRiskStats, TransactionRecord},
    types::CustomerId,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Enumerated reason codes, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskReason {
    #[serde(rename = "LOW_PROFIT")]
    LowProfit,
    #[serde(rename = "TECH_RISK")]
    TechRisk,
}

impl fmt::Display for RiskReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskReason::LowProfit => write!(f, "LOW_PROFIT"),
            RiskReason::TechRisk => write!(f, "TECH_RISK"),
        }
    }
}

/// Display details for one customer, from the account system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub name: String,
    pub company: String,
}

pub type CustomerDirectory = HashMap<CustomerId, CustomerProfile>;

/// One at-risk customer. Emitted only when at least one reason fired.
#[derive(Debug, Clone, Serialize)]
pub struct RiskFlag {
    #[serde(rename = "user_id")]
    pub customer_id: CustomerId,
    pub name: String,
    pub company: String,
    /// Mean margin percent over the window, rounded to 1 decimal place.
    pub avg_margin: Decimal,
    /// Mean latency in ms over the window, rounded to the nearest integer.
    pub avg_latency: i64,
    pub reasons: Vec<RiskReason>,
}

/// Apply the threshold rules to one customer's aggregates.
///
/// Returns `None` when no rule fires. A customer id missing from the
/// directory resolves to placeholder display values with a logged
/// warning; one bad reference must not abort the pass for everyone
/// else.
pub fn classify(
    stats: &CustomerRiskStats,
    directory: &CustomerDirectory,
    rules: &RiskConfig,
) -> Option<RiskFlag> {
    let avg_margin = stats.avg_margin();
    let avg_latency = stats.avg_latency();

    let mut reasons = Vec::new();
    if !stats.margin_samples.is_empty() && avg_margin < rules.low_profit_margin {
        reasons.push(RiskReason::LowProfit);
    }
    if !stats.latency_samples.is_empty() && avg_latency > rules.high_latency_ms {
        reasons.push(RiskReason::TechRisk);
    }

    if reasons.is_empty() {
        return None;
    }

    let (name, company) = match directory.get(&stats.customer_id) {
        Some(profile) => (profile.name.clone(), profile.company.clone()),
        None => {
            log::warn!(
                "customer '{}' not found in directory, using placeholder identity",
                stats.customer_id
            );
            ("Unknown Customer".to_string(), "Unknown".to_string())
        }
    };

    Some(RiskFlag {
        customer_id: stats.customer_id.clone(),
        name,
        company,
        avg_margin: avg_margin.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero),
        avg_latency: avg_latency
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .unwrap_or(0),
        reasons,
    })
}

/// Aggregate a record window and classify every customer in it.
///
/// Output order is pinned for reproducibility: more reasons first,
/// then ascending customer id.
pub fn compute_risk_flags(
    records: &[TransactionRecord],
    directory: &CustomerDirectory,
    rules: &RiskConfig,
) -> Vec<RiskFlag> {
    let stats = aggregate(records, rules.window_limit);

    let mut flags: Vec<RiskFlag> = stats
        .values()
        .filter_map(|customer| classify(customer, directory, rules))
        .collect();

    flags.sort_by(|a, b| {
        b.reasons
            .len()
            .cmp(&a.reasons.len())
            .then_with(|| a.customer_id.cmp(&b.customer_id))
    });

    flags
}
