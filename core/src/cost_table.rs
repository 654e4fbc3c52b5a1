//! Provider cost table — per-minute rates keyed by category and
//! provider id.
//!
//! The table is owned and versioned by the pricing-configuration
//! layer. The calculator treats it as an immutable snapshot: a new
//! pricing version replaces the whole table, never a single entry
//! mid-calculation.

use crate::error::{CoreError, CoreResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The three upstream service categories that make up a call stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderCategory {
    Llm,
    Tts,
    Telephony,
}

impl ProviderCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ProviderCategory::Llm => "llm",
            ProviderCategory::Tts => "tts",
            ProviderCategory::Telephony => "telephony",
        }
    }
}

/// Outcome of a rate lookup.
///
/// `Defaulted` means the provider id was not in the table and the rate
/// fell back to zero. Callers must be able to tell that apart from a
/// genuinely free provider: a defaulted rate under-costs the call and
/// inflates its apparent margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLookup {
    Known(Decimal),
    Defaulted,
}

impl RateLookup {
    pub fn rate(&self) -> Decimal {
        match self {
            RateLookup::Known(rate) => *rate,
            RateLookup::Defaulted => Decimal::ZERO,
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, RateLookup::Defaulted)
    }
}

/// Mapping from (category, provider id) to a per-minute rate.
///
/// Provider ids are matched case-insensitively; keys are lower-cased
/// once at construction.
#[derive(Debug, Clone)]
pub struct CostTable {
    rates: HashMap<ProviderCategory, HashMap<String, Decimal>>,
}

impl CostTable {
    /// Build a table from raw config rates. Rejects negative rates.
    pub fn from_rates(
        raw: HashMap<ProviderCategory, HashMap<String, Decimal>>,
    ) -> CoreResult<Self> {
        let mut rates: HashMap<ProviderCategory, HashMap<String, Decimal>> = HashMap::new();

        for (category, providers) in raw {
            let normalized = rates.entry(category).or_default();
            for (provider, rate) in providers {
                if rate < Decimal::ZERO {
                    return Err(CoreError::InvalidInput(format!(
                        "negative per-minute rate {rate} for {} provider '{provider}'",
                        category.label()
                    )));
                }
                normalized.insert(provider.trim().to_ascii_lowercase(), rate);
            }
        }

        Ok(Self { rates })
    }

    /// Look up the per-minute rate for one provider.
    pub fn rate(&self, category: ProviderCategory, provider: &str) -> RateLookup {
        let key = provider.trim().to_ascii_lowercase();
        match self.rates.get(&category).and_then(|m| m.get(&key)) {
            Some(rate) => RateLookup::Known(*rate),
            None => RateLookup::Defaulted,
        }
    }
}
