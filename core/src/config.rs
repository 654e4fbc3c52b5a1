//! Externally supplied configuration: provider cost table, revenue
//! markup, margin threshold, and risk rules.
//!
//! Nothing in here is hardcoded into the calculators. A new pricing
//! version is a new `CoreConfig`, loaded once and treated as immutable
//! for the lifetime of any single calculation.

use crate::cost_table::{CostTable, ProviderCategory};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct PricingConfig {
    pub costs: CostTable,
    /// Revenue strategy: cost plus this markup, per minute.
    pub markup_per_minute: Decimal,
    /// A call below this margin percent is flagged low-margin.
    pub low_margin_threshold: Decimal,
}

#[derive(Debug, Clone)]
pub struct RiskConfig {
    /// Maximum number of most-recent records one aggregation pass
    /// consumes. Bounds memory regardless of total history size.
    pub window_limit: usize,
    /// Average margin percent below which a customer is LOW_PROFIT.
    pub low_profit_margin: Decimal,
    /// Average latency in ms above which a customer is TECH_RISK.
    pub high_latency_ms: Decimal,
}

#[derive(Debug, Clone)]
pub struct CoreConfig {
    pub pricing: PricingConfig,
    pub risk: RiskConfig,
}

#[derive(Debug, Clone, Deserialize)]
struct PricingFile {
    costs: HashMap<ProviderCategory, HashMap<String, Decimal>>,
    markup_per_minute: Decimal,
    low_margin_threshold: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
struct RiskRulesFile {
    window_limit: usize,
    low_profit_margin: Decimal,
    high_latency_ms: Decimal,
}

impl CoreConfig {
    /// Load from the data/ directory.
    /// In tests, use CoreConfig::default_test().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let pricing_path = format!("{data_dir}/pricing/provider_costs.json");
        let pricing_content = std::fs::read_to_string(&pricing_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {pricing_path}: {e}"))?;
        let pricing_file: PricingFile = serde_json::from_str(&pricing_content)?;

        let risk_path = format!("{data_dir}/risk/risk_rules.json");
        let risk_content = std::fs::read_to_string(&risk_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {risk_path}: {e}"))?;
        let risk_file: RiskRulesFile = serde_json::from_str(&risk_content)?;

        Ok(Self {
            pricing: PricingConfig {
                costs: CostTable::from_rates(pricing_file.costs)?,
                markup_per_minute: pricing_file.markup_per_minute,
                low_margin_threshold: pricing_file.low_margin_threshold,
            },
            risk: RiskConfig {
                window_limit: risk_file.window_limit,
                low_profit_margin: risk_file.low_profit_margin,
                high_latency_ms: risk_file.high_latency_ms,
            },
        })
    }

    /// Config with the observed production values, for use in tests.
    pub fn default_test() -> Self {
        let costs = CostTable::from_rates(
            [
                (
                    ProviderCategory::Llm,
                    [
                        ("gpt-4".into(), dec!(0.06)),
                        ("gpt-3.5-turbo".into(), dec!(0.002)),
                        ("claude-3-opus".into(), dec!(0.04)),
                    ]
                    .into(),
                ),
                (
                    ProviderCategory::Tts,
                    [
                        ("elevenlabs".into(), dec!(0.05)),
                        ("deepgram".into(), dec!(0.015)),
                        ("openai-tts".into(), dec!(0.02)),
                    ]
                    .into(),
                ),
                (
                    ProviderCategory::Telephony,
                    [
                        ("twilio".into(), dec!(0.015)),
                        ("plivo".into(), dec!(0.010)),
                    ]
                    .into(),
                ),
            ]
            .into(),
        )
        .expect("default rates are non-negative");

        Self {
            pricing: PricingConfig {
                costs,
                markup_per_minute: dec!(0.02),
                low_margin_threshold: dec!(20),
            },
            risk: RiskConfig {
                window_limit: 2000,
                low_profit_margin: dec!(15),
                high_latency_ms: dec!(600),
            },
        }
    }
}
