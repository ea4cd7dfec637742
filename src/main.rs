use benchgate::bench;
use benchgate::config::RunConfig;
use benchgate::models::{BenchReport, EngineDescriptor};
use clap::Parser;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Validate a chess engine binary's bench before admitting it to a test run
#[derive(Debug, Parser)]
#[command(name = "benchgate", version, about)]
struct Args {
    /// Path to the engine binary, relative to the working directory
    #[arg(long)]
    binary: PathBuf,

    /// Path to an external evaluation-network file
    #[arg(long)]
    network: Option<PathBuf>,

    /// Engine requires the network to be set via a runtime option
    #[arg(long)]
    private: bool,

    /// Concurrent bench attempts per set
    #[arg(long)]
    threads: Option<usize>,

    /// Number of times to repeat the batch
    #[arg(long)]
    sets: Option<usize>,

    /// Expected node count; a mismatch fails the run
    #[arg(long)]
    expected: Option<u64>,

    /// Emit the report as JSON on stdout
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // Config-file defaults, overridden by whatever was passed on the line
    let mut config = RunConfig::load().unwrap_or_else(|err| {
        warn!(%err, "ignoring unreadable config file");
        RunConfig::default()
    });
    if let Some(threads) = args.threads {
        config = config.with_threads(threads);
    }
    if let Some(sets) = args.sets {
        config = config.with_sets(sets);
    }
    if args.expected.is_some() {
        config = config.with_expected_nodes(args.expected);
    }

    let mut engine = EngineDescriptor::new(args.binary).with_private(args.private);
    if let Some(network) = args.network {
        engine = engine.with_network(network);
    }

    match bench::run_benchmark(&engine, &config).await {
        Ok(result) => {
            let report = BenchReport::new(engine.name(), config.threads, config.sets, result);
            if args.json {
                match serde_json::to_string_pretty(&report) {
                    Ok(json) => println!("{}", json),
                    Err(err) => {
                        eprintln!("Failed to serialize report: {}", err);
                        std::process::exit(1);
                    }
                }
            } else {
                println!("{}", report.summary());
            }
        }
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    }
}
