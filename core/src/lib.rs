//! calldesk-core: unit economics and customer risk analytics for the
//! voice-call CRM.
//!
//! Two entry points, both pure transformations over immutable inputs:
//!
//! - [`economics::compute_call_economics`] — provider stack + duration
//!   → cost / revenue / margin for one call.
//! - [`risk_classifier::compute_risk_flags`] — bounded window of call
//!   records → per-customer risk flags.
//!
//! Persistence, HTTP transport, and demo seeding live in the
//! surrounding services. This crate never mutates its inputs and never
//! blocks.

pub mod config;
pub mod cost_table;
pub mod economics;
pub mod error;
pub mod risk_aggregator;
pub mod risk_classifier;
pub mod types;
