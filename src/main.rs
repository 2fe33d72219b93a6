use anyhow::Result;
use std::env;
use std::process;
use tracing_subscriber::EnvFilter;

use broker_risk::{Broker, BrokerService, Config};

const USAGE: &str = "\
Usage: broker-risk <command> [args]

Commands:
  list [config]        all brokers with risk level and score
  show <id> [config]   one broker's risk profile and signals
  flagged [config]     flagged brokers, highest risk first
  export [config]      enriched broker list as JSON

Config defaults to $BROKER_RISK_CONFIG, then ./broker-risk.json";

fn main() -> Result<()> {
    // Logs go to stderr so `export` output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(String::as_str);

    match command {
        Some("list") => run_list(&load_service(args.get(2))?),
        Some("flagged") => run_flagged(&load_service(args.get(2))?),
        Some("export") => run_export(&load_service(args.get(2))?)?,
        Some("show") => {
            let Some(id) = args.get(2) else {
                eprintln!("{}", USAGE);
                process::exit(2);
            };
            if !run_show(&load_service(args.get(3))?, id) {
                eprintln!("❌ Broker not found: {}", id);
                process::exit(1);
            }
        }
        _ => {
            eprintln!("{}", USAGE);
            process::exit(2);
        }
    }

    Ok(())
}

fn load_service(config_arg: Option<&String>) -> Result<BrokerService> {
    let path = Config::resolve_path(config_arg.map(String::as_str));
    Config::from_file(&path)?.build_service()
}

fn print_row(broker: &Broker) {
    let (level, score) = match &broker.risk_profile {
        Some(profile) => (profile.level.as_str(), profile.score.to_string()),
        None => ("-", "-".to_string()),
    };
    println!("{:<24} {:<32} {:<9} {:>5}", broker.id, broker.name, level, score);
}

fn print_header() {
    println!("{:<24} {:<32} {:<9} {:>5}", "ID", "NAME", "LEVEL", "SCORE");
    println!("{}", "━".repeat(73));
}

fn run_list(service: &BrokerService) {
    let brokers = service.get_brokers();
    print_header();
    for broker in brokers.iter() {
        print_row(broker);
    }
}

fn run_flagged(service: &BrokerService) {
    let flagged = service.flagged_brokers();
    print_header();
    for broker in &flagged {
        print_row(broker);
    }
    println!("\n{} of {} brokers flagged", flagged.len(), service.get_brokers().len());
}

fn run_show(service: &BrokerService, id: &str) -> bool {
    let Some(broker) = service.get_broker_by_id(id) else {
        return false;
    };

    println!("🏦 {} ({})", broker.name, broker.website_url);
    match &broker.risk_profile {
        None => println!("✓ No adverse findings"),
        Some(profile) => {
            println!("{}", profile.describe());
            if let Some(summary) = &profile.summary {
                println!("  {}", summary);
            }
            for signal in &profile.signals {
                println!(
                    "  • [{}] {} (+{}) - {}",
                    signal.signal_type.as_str(),
                    signal.source,
                    signal.score_weight,
                    signal.description
                );
                if let Some(url) = &signal.evidence_url {
                    let date = signal
                        .timestamp
                        .date()
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_else(|| signal.timestamp.to_string());
                    println!("    {} | {}", url, date);
                }
            }
        }
    }
    true
}

fn run_export(service: &BrokerService) -> Result<()> {
    let brokers = service.get_brokers();
    println!("{}", serde_json::to_string_pretty(brokers.as_slice())?);
    Ok(())
}
