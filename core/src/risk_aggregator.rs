//! Risk aggregator — bounded-window per-customer statistics.
//!
//! Reduces a window of call records into per-customer sample lists.
//! The window is the `window_limit` most-recent records by
//! `created_at`, so one pass stays O(window) in time and space no
//! matter how much history exists. The caller hands in an immutable
//! slice; the aggregator never observes a window that changes
//! mid-pass.

use crate::types::CustomerId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One completed call, as stored by the persistence layer. Read-only
/// here: records are produced once at call completion and never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(rename = "user_id")]
    pub customer_id: CustomerId,
    #[serde(default)]
    pub margin_percent: Option<Decimal>,
    #[serde(default)]
    pub latency_ms: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Per-customer sample lists for one aggregation run. Transient:
/// built, classified, discarded.
#[derive(Debug, Clone)]
pub struct CustomerRiskStats {
    pub customer_id: CustomerId,
    /// Margin samples, most-recent first.
    pub margin_samples: Vec<Decimal>,
    /// Latency samples in ms, most-recent first.
    pub latency_samples: Vec<i64>,
}

impl CustomerRiskStats {
    fn new(customer_id: CustomerId) -> Self {
        Self {
            customer_id,
            margin_samples: Vec::new(),
            latency_samples: Vec::new(),
        }
    }

    /// Mean margin percent, or 0 when there are no samples.
    pub fn avg_margin(&self) -> Decimal {
        mean(self.margin_samples.iter().copied())
    }

    /// Mean latency in ms, or 0 when there are no samples.
    pub fn avg_latency(&self) -> Decimal {
        mean(self.latency_samples.iter().map(|&ms| Decimal::from(ms)))
    }
}

fn mean(samples: impl ExactSizeIterator<Item = Decimal>) -> Decimal {
    let count = samples.len();
    if count == 0 {
        return Decimal::ZERO;
    }
    let sum: Decimal = samples.sum();
    sum / Decimal::from(count as u64)
}

/// Group the `window_limit` most-recent records by customer.
///
/// - Records missing a metric contribute no sample for that metric
///   (skipped, not zeroed).
/// - Every customer inside the window appears in the output, even with
///   empty sample lists.
/// - Sample order within a customer is most-recent first; the sort is
///   stable, so records with equal timestamps keep their input order.
pub fn aggregate(
    records: &[TransactionRecord],
    window_limit: usize,
) -> HashMap<CustomerId, CustomerRiskStats> {
    let mut window: Vec<&TransactionRecord> = records.iter().collect();
    window.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    window.truncate(window_limit);

    let mut stats: HashMap<CustomerId, CustomerRiskStats> = HashMap::new();
    for record in window {
        let entry = stats
            .entry(record.customer_id.clone())
            .or_insert_with(|| CustomerRiskStats::new(record.customer_id.clone()));

        if let Some(margin) = record.margin_percent {
            entry.margin_samples.push(margin);
        }
        if let Some(latency) = record.latency_ms {
            entry.latency_samples.push(latency);
        }
    }

    stats
}
