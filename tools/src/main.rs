//! econ-runner: headless runner for the calldesk core.
//!
//! Usage:
//!   econ-runner economics --llm gpt-4 --tts elevenlabs --telephony twilio --duration 60
//!   econ-runner risk --records calls.json --directory customers.json
//!
//! Both subcommands accept --data-dir (default ./data) to load an
//! alternate pricing/risk configuration, and print JSON to stdout.

use anyhow::Result;
use calldesk_core::{
    config::CoreConfig,
    economics::{compute_call_economics, StackSelection},
    risk_aggregator::TransactionRecord,
    risk_classifier::{compute_risk_flags, CustomerDirectory},
};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mode = args.get(1).map(String::as_str).unwrap_or("");
    let data_dir = args
        .windows(2)
        .find(|w| w[0] == "--data-dir")
        .map(|w| w[1].as_str())
        .unwrap_or("./data");

    let config = CoreConfig::load(data_dir)?;

    match mode {
        "economics" => run_economics(&args, &config),
        "risk" => run_risk(&args, &config),
        _ => {
            eprintln!("usage: econ-runner <economics|risk> [options]");
            eprintln!("  economics --llm X --tts Y --telephony Z --duration SECONDS");
            eprintln!("  risk --records FILE [--directory FILE]");
            eprintln!("  common: --data-dir DIR (default ./data)");
            std::process::exit(2);
        }
    }
}

fn run_economics(args: &[String], config: &CoreConfig) -> Result<()> {
    let stack = StackSelection {
        llm: parse_str_arg(args, "--llm").unwrap_or_default().to_string(),
        tts: parse_str_arg(args, "--tts").unwrap_or_default().to_string(),
        telephony: parse_str_arg(args, "--telephony")
            .unwrap_or_default()
            .to_string(),
    };
    let duration_seconds = parse_arg(args, "--duration", 60i64);

    let economics = compute_call_economics(&stack, duration_seconds, &config.pricing)?;
    println!("{}", serde_json::to_string_pretty(&economics)?);
    Ok(())
}

fn run_risk(args: &[String], config: &CoreConfig) -> Result<()> {
    let records_path = parse_str_arg(args, "--records")
        .ok_or_else(|| anyhow::anyhow!("risk mode requires --records FILE"))?;
    let records_content = std::fs::read_to_string(records_path)
        .map_err(|e| anyhow::anyhow!("Cannot read {records_path}: {e}"))?;
    let records: Vec<TransactionRecord> = serde_json::from_str(&records_content)?;

    let directory: CustomerDirectory = match parse_str_arg(args, "--directory") {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
            serde_json::from_str(&content)?
        }
        None => CustomerDirectory::new(),
    };

    let flags = compute_risk_flags(&records, &directory, &config.risk);
    log::info!(
        "classified {} records into {} risk flags",
        records.len(),
        flags.len()
    );
    println!("{}", serde_json::to_string_pretty(&flags)?);
    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn parse_str_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
