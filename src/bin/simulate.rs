//! Night balance simulator CLI.
//!
//! Run Monte Carlo simulations to analyze how survivable the night is.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                       # Default: 1000 nights
//!   cargo run --bin simulate -- -n 200 --seed 42   # Reproducible batch
//!   cargo run --bin simulate -- --config night.toml --json

use campfire::core::config::SurvivalConfig;
use campfire::simulator::{run_simulation, AutopilotPolicy, SimConfig};
use std::env;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let args: Vec<String> = env::args().collect();
    let (config, write_json) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("simulate: {}", message);
            process::exit(1);
        }
    };

    let level = if config.verbosity >= 2 {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              CAMPFIRE BALANCE SIMULATOR                       ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Nights:         {}", config.num_runs);
    println!("  Tick:           {}s", config.dt);
    println!("  Max Ticks:      {}", config.max_ticks_per_run);
    println!("  Sunrise After:  {}s", config.survival.sunrise_seconds);
    println!(
        "  Whistling:      {:.0}% after {:.1}s",
        config.policy.whistle_accuracy * 100.0,
        config.policy.whistle_latency
    );
    if config.policy.stay_at_camp {
        println!("  Exploring:      never");
    }
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);

    println!("{}", report.to_text());

    if write_json {
        let filename = format!(
            "campfire_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        if let Err(err) = std::fs::write(&filename, report.to_json()) {
            eprintln!("simulate: failed to write {}: {}", filename, err);
            process::exit(1);
        }
        println!("JSON report saved to: {}", filename);
    }
}

/// Value following a flag, parsed.
fn value<T: std::str::FromStr>(args: &[String], i: usize) -> Result<T, String> {
    let flag = &args[i];
    let raw = args
        .get(i + 1)
        .ok_or_else(|| format!("{} needs a value", flag))?;
    raw.parse()
        .map_err(|_| format!("invalid value for {}: {}", flag, raw))
}

fn parse_args(args: &[String]) -> Result<(SimConfig, bool), String> {
    let mut config = SimConfig::default();
    let mut write_json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                config.num_runs = value(args, i)?;
                i += 1;
            }
            "-s" | "--seed" => {
                config.seed = Some(value(args, i)?);
                i += 1;
            }
            "-t" | "--ticks" => {
                config.max_ticks_per_run = value(args, i)?;
                i += 1;
            }
            "--dt" => {
                let dt: f64 = value(args, i)?;
                if !(dt.is_finite() && dt > 0.0) {
                    return Err(format!("--dt must be positive, got {}", dt));
                }
                config.dt = dt;
                i += 1;
            }
            "-c" | "--config" => {
                let path: String = value(args, i)?;
                config.survival = SurvivalConfig::load(&path)
                    .map_err(|err| format!("{}: {}", path, err))?;
                i += 1;
            }
            "--accuracy" => {
                config.policy.whistle_accuracy = value(args, i)?;
                i += 1;
            }
            "--latency" => {
                config.policy.whistle_latency = value(args, i)?;
                i += 1;
            }
            "--homebody" => {
                config.policy = AutopilotPolicy {
                    stay_at_camp: true,
                    ..config.policy
                };
            }
            "--perfect" => {
                config.policy = AutopilotPolicy::perfect_ears();
            }
            "--quick" => {
                let seed = config.seed.unwrap_or(42);
                config = SimConfig {
                    survival: config.survival,
                    ..SimConfig::quick(seed)
                };
            }
            "--json" => {
                write_json = true;
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-h" | "--help" => {
                print_help();
                process::exit(0);
            }
            other => return Err(format!("unknown option: {}", other)),
        }
        i += 1;
    }

    config.policy.validate()?;
    Ok((config, write_json))
}

fn print_help() {
    println!("Campfire Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>      Number of nights (default: 1000)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    -t, --ticks <T>     Max ticks per night (default: 100,000)");
    println!("    --dt <SECONDS>      Seconds per tick (default: 0.1)");
    println!("    -c, --config <F>    Load night tunables from a TOML file");
    println!("    --accuracy <P>      Chance of answering a whisper (default: 0.85)");
    println!("    --latency <S>       Seconds before whistling back (default: 1.2)");
    println!("    --homebody          Never leave the fire");
    println!("    --perfect           Answer every whisper instantly");
    println!("    --quick             Quick test (100 seeded nights)");
    println!("    -v, --verbose       Log every night to stderr");
    println!("    --json              Save JSON report");
    println!("    -h, --help          Show this help");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run --bin simulate                        # Default run");
    println!("    cargo run --bin simulate -- -n 100 --seed 42    # Reproducible");
    println!("    cargo run --bin simulate -- --homebody --quick  # Never explore");
    println!("    RUST_LOG=campfire=debug cargo run --bin simulate -- -n 1");
}
