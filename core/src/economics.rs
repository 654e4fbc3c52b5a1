//! Economics calculator — per-call cost, revenue, and margin.
//!
//! Pure function: stack selection + duration + pricing config in,
//! one `CallEconomics` record out. Monetary arithmetic is decimal
//! throughout because the outputs feed billing and margin thresholds;
//! binary floats would drift across the rounding boundaries.

use crate::{
    config::PricingConfig,
    cost_table::ProviderCategory,
    error::{CoreError, CoreResult},
};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// The upstream providers selected to fulfill one call.
/// Provider ids are matched case-insensitively against the cost table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackSelection {
    pub llm: String,
    pub tts: String,
    pub telephony: String,
}

/// Unit economics of a single call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallEconomics {
    /// Provider cost for the call, rounded to 4 decimal places.
    pub total_cost: Decimal,
    /// Billed revenue for the call, rounded to 4 decimal places.
    #[serde(rename = "revenue")]
    pub total_revenue: Decimal,
    /// Margin as a percentage of revenue, rounded to 1 decimal place.
    pub margin_percent: Decimal,
    pub is_low_margin: bool,
    /// Categories whose provider id was absent from the cost table and
    /// contributed a zero rate. A non-empty list means the stack is
    /// probably misconfigured, not free.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unpriced_categories: Vec<ProviderCategory>,
}

/// Compute the unit economics of one call.
///
/// - Negative durations are rejected as `InvalidInput`.
/// - A provider id missing from the cost table contributes a zero rate
///   and is reported in `unpriced_categories` with a logged warning.
/// - `margin_percent` is 0 when revenue is 0; otherwise it lies in
///   [0, 100] for non-negative rates and markup.
pub fn compute_call_economics(
    stack: &StackSelection,
    duration_seconds: i64,
    pricing: &PricingConfig,
) -> CoreResult<CallEconomics> {
    if duration_seconds < 0 {
        return Err(CoreError::InvalidInput(format!(
            "duration_seconds must be >= 0, got {duration_seconds}"
        )));
    }

    let selections = [
        (ProviderCategory::Llm, stack.llm.as_str()),
        (ProviderCategory::Tts, stack.tts.as_str()),
        (ProviderCategory::Telephony, stack.telephony.as_str()),
    ];

    let mut cost_per_minute = Decimal::ZERO;
    let mut unpriced_categories = Vec::new();

    for (category, provider) in selections {
        if provider.trim().is_empty() {
            return Err(CoreError::InvalidInput(format!(
                "stack selection is missing a {} provider",
                category.label()
            )));
        }

        let lookup = pricing.costs.rate(category, provider);
        if lookup.is_defaulted() {
            log::warn!(
                "no per-minute rate for {} provider '{provider}', defaulting to zero",
                category.label()
            );
            unpriced_categories.push(category);
        }
        cost_per_minute += lookup.rate();
    }

    let duration_minutes = Decimal::from(duration_seconds) / Decimal::from(60);
    let revenue_per_minute = cost_per_minute + pricing.markup_per_minute;

    let raw_cost = cost_per_minute * duration_minutes;
    let raw_revenue = revenue_per_minute * duration_minutes;

    let margin = if raw_revenue > Decimal::ZERO {
        ((raw_revenue - raw_cost) / raw_revenue) * Decimal::from(100)
    } else {
        Decimal::ZERO
    };

    // The low-margin flag compares the unrounded margin; the rounded
    // value is presentation only.
    let is_low_margin = margin < pricing.low_margin_threshold;

    Ok(CallEconomics {
        total_cost: raw_cost.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero),
        total_revenue: raw_revenue
            .round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero),
        margin_percent: margin.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero),
        is_low_margin,
        unpriced_categories,
    })
}
