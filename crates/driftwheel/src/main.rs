//! Binary entrypoint for the driftwheel demo host.
//!
//! Runs the engines against a simulated page: a fixed viewport with
//! stand-in UI exclusion zones, a configurable number of floating
//! elements, and an optional spin with a card render at the end. Every
//! engine event is logged as it would be applied by a real host.

use std::{path::PathBuf, process};

use clap::{Args, Parser};
use tracing::error;
use tracing_subscriber::EnvFilter;

mod sim;

/// Logging controls.
#[derive(Debug, Clone, Args)]
struct LogArgs {
    /// Set global log level to trace (our crates only)
    #[arg(long, conflicts_with_all = ["debug", "log_filter"])]
    trace: bool,

    /// Set global log level to debug (our crates only)
    #[arg(long, conflicts_with_all = ["trace", "log_filter"])]
    debug: bool,

    /// Set an explicit tracing filter directive (overrides other flags)
    /// e.g. "driftwheel_engine=trace"
    #[arg(long)]
    log_filter: Option<String>,
}

/// Crate targets that constitute "our" logs.
const OUR_CRATES: &[&str] = &["driftwheel", "driftwheel_engine", "driftwheel_card", "config"];

/// Filter spec with precedence: explicit filter, then trace/debug flags,
/// then `RUST_LOG`, then crate-scoped info.
fn log_spec(args: &LogArgs) -> String {
    if let Some(spec) = &args.log_filter {
        return spec.clone();
    }
    let level_spec = |level: &str| -> String {
        OUR_CRATES
            .iter()
            .map(|target| format!("{target}={level}"))
            .collect::<Vec<_>>()
            .join(",")
    };
    if args.trace {
        return level_spec("trace");
    }
    if args.debug {
        return level_spec("debug");
    }
    if let Ok(spec) = std::env::var("RUST_LOG") {
        return spec;
    }
    level_spec("info")
}

#[derive(Parser, Debug)]
#[command(name = "driftwheel", about = "Floating placement + prize wheel demo", version)]
struct Cli {
    /// Number of wheel segments / floating elements
    #[arg(long, default_value_t = 9)]
    items: usize,

    /// Reveal steps to simulate before stopping the cycle
    #[arg(long, default_value_t = 6)]
    reveals: usize,

    /// Trigger a spin after the reveals
    #[arg(long)]
    spin: bool,

    /// Pre-select the winning segment instead of drawing one
    #[arg(long, value_name = "INDEX")]
    winner: Option<usize>,

    /// Simulate a narrow (mobile-class) viewport
    #[arg(long)]
    narrow: bool,

    /// Seed the random source for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Path to a RON config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Render the winner card to this PNG path after the spin
    #[arg(long, value_name = "PATH")]
    card_out: Option<PathBuf>,

    /// Portrait image for the winner card (a flat color is used if absent)
    #[arg(long, value_name = "PATH")]
    portrait: Option<PathBuf>,

    #[command(flatten)]
    log: LogArgs,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_spec(&cli.log)))
        .init();

    let cfg = match &cli.config {
        Some(path) => match config::load_from_path(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!("{e}");
                process::exit(2);
            }
        },
        None => config::Config::default(),
    };

    // The engines treat these as preconditions; the host boundary is
    // where they get checked.
    if cli.items == 0 {
        error!("--items must be at least 1");
        process::exit(2);
    }
    if let Some(winner) = cli.winner {
        if winner >= cli.items {
            error!("--winner must be below --items");
            process::exit(2);
        }
    }

    let opts = sim::DemoOpts {
        items: cli.items,
        reveals: cli.reveals,
        spin: cli.spin || cli.winner.is_some(),
        winner: cli.winner,
        narrow: cli.narrow,
        seed: cli.seed,
        card_out: cli.card_out,
        portrait: cli.portrait,
    };
    sim::run(cfg, opts).await;
}
