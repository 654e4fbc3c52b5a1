//! Economics calculator tests — known values, rounding, fallbacks.

use calldesk_core::{
    config::CoreConfig,
    cost_table::ProviderCategory,
    economics::{compute_call_economics, StackSelection},
    error::CoreError,
};
use rust_decimal_macros::dec;

fn stack(llm: &str, tts: &str, telephony: &str) -> StackSelection {
    StackSelection {
        llm: llm.into(),
        tts: tts.into(),
        telephony: telephony.into(),
    }
}

/// The canonical scenario: gpt-4 + elevenlabs + twilio for 60 seconds
/// at a $0.02/min markup.
#[test]
fn known_value_scenario() {
    let config = CoreConfig::default_test();

    let economics =
        compute_call_economics(&stack("gpt-4", "elevenlabs", "twilio"), 60, &config.pricing)
            .unwrap();

    assert_eq!(economics.total_cost, dec!(0.1250));
    assert_eq!(economics.total_revenue, dec!(0.1450));
    assert_eq!(economics.margin_percent, dec!(13.8));
    assert!(
        economics.is_low_margin,
        "13.8% margin is below the 20% threshold"
    );
    assert!(
        economics.unpriced_categories.is_empty(),
        "all three providers are in the table"
    );
}

/// Provider ids match regardless of case.
#[test]
fn provider_lookup_is_case_insensitive() {
    let config = CoreConfig::default_test();

    let lower =
        compute_call_economics(&stack("gpt-4", "elevenlabs", "twilio"), 60, &config.pricing)
            .unwrap();
    let mixed =
        compute_call_economics(&stack("GPT-4", "ElevenLabs", "TWILIO"), 60, &config.pricing)
            .unwrap();

    assert_eq!(lower, mixed);
}

/// An unrecognized provider contributes zero cost, and the defaulted
/// category is reported so callers can tell it apart from a genuinely
/// free provider.
#[test]
fn unknown_provider_defaults_to_zero_cost() {
    let config = CoreConfig::default_test();

    let economics = compute_call_economics(
        &stack("mistral-large", "elevenlabs", "twilio"),
        60,
        &config.pricing,
    )
    .unwrap();

    // Only tts (0.05) and telephony (0.015) are priced.
    assert_eq!(economics.total_cost, dec!(0.0650));
    assert_eq!(economics.unpriced_categories, vec![ProviderCategory::Llm]);
}

/// Negative durations are a contract violation, not a zero-cost call.
#[test]
fn negative_duration_rejected() {
    let config = CoreConfig::default_test();

    let result =
        compute_call_economics(&stack("gpt-4", "elevenlabs", "twilio"), -1, &config.pricing);

    assert!(matches!(result, Err(CoreError::InvalidInput(_))));
}

/// A blank provider id means the stack selection is missing a category.
#[test]
fn blank_provider_rejected() {
    let config = CoreConfig::default_test();

    let result = compute_call_economics(&stack("gpt-4", "", "twilio"), 60, &config.pricing);

    assert!(matches!(result, Err(CoreError::InvalidInput(_))));
}

/// Zero duration is a valid call with zero economics. Zero revenue
/// means zero margin by definition, never a division failure.
#[test]
fn zero_duration_produces_zero_economics() {
    let config = CoreConfig::default_test();

    let economics =
        compute_call_economics(&stack("gpt-4", "elevenlabs", "twilio"), 0, &config.pricing)
            .unwrap();

    assert_eq!(economics.total_cost, dec!(0));
    assert_eq!(economics.total_revenue, dec!(0));
    assert_eq!(economics.margin_percent, dec!(0));
    assert!(economics.is_low_margin);
}

/// Monetary rounding is 4 decimal places, half-up.
#[test]
fn rounding_is_half_up() {
    let config = CoreConfig::default_test();

    // cost/min = 0.002 + 0.015 + 0.010 = 0.027; 45s = 0.75 min.
    // raw cost = 0.02025, which rounds up to 0.0203.
    let economics = compute_call_economics(
        &stack("gpt-3.5-turbo", "deepgram", "plivo"),
        45,
        &config.pricing,
    )
    .unwrap();

    assert_eq!(economics.total_cost, dec!(0.0203));
    assert_eq!(economics.total_revenue, dec!(0.0353));
    // raw margin = (0.047 - 0.027) / 0.047 * 100 = 42.553...
    assert_eq!(economics.margin_percent, dec!(42.6));
    assert!(!economics.is_low_margin);
}

/// Identical inputs produce identical output across invocations.
#[test]
fn repeated_invocations_are_identical() {
    let config = CoreConfig::default_test();
    let selection = stack("claude-3-opus", "deepgram", "plivo");

    let first = compute_call_economics(&selection, 187, &config.pricing).unwrap();
    let second = compute_call_economics(&selection, 187, &config.pricing).unwrap();

    assert_eq!(first, second);
}

/// For non-negative rates and markup, margin stays in [0, 100].
#[test]
fn margin_within_range_for_nonnegative_inputs() {
    let config = CoreConfig::default_test();

    let stacks = [
        stack("gpt-4", "elevenlabs", "twilio"),
        stack("gpt-3.5-turbo", "deepgram", "plivo"),
        stack("claude-3-opus", "openai-tts", "twilio"),
        stack("nonexistent", "nonexistent", "nonexistent"),
    ];

    for selection in &stacks {
        for duration in [0i64, 1, 59, 60, 61, 3600, 86400] {
            let economics = compute_call_economics(selection, duration, &config.pricing).unwrap();
            assert!(
                economics.margin_percent >= dec!(0) && economics.margin_percent <= dec!(100),
                "margin {} out of range for duration {duration}",
                economics.margin_percent
            );
        }
    }
}
