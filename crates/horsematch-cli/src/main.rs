//! `horsematch` - match riders to horses for one day.
//!
//! Reads a stable roster and a day query as JSON, prints the ranked plans as
//! JSON on stdout. Logs go to stderr; set `RUST_LOG` to tune them.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use horsematch::{DayQuery, EngineConfig, InMemoryStable, MatchingEngine};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about, rename_all = "kebab")]
struct Args {
    /// Stable roster: JSON with `horses` and `riders`.
    #[arg(long, short = 's', value_name = "FILE")]
    stable: PathBuf,

    /// Day query: JSON with `hours` and `dailyExcludes`.
    #[arg(long, short = 'q', value_name = "FILE")]
    query: PathBuf,

    /// Engine configuration, TOML or YAML. Defaults apply when omitted.
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print at most this many plans.
    #[arg(long, value_name = "N")]
    limit: Option<usize>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    init_tracing();

    let args = Args::parse();
    run(args)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,horsematch_solver=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<ExitCode> {
    let config = load_config(args.config.as_deref())?;
    let stable = InMemoryStable::from_json_file(&args.stable)
        .wrap_err_with(|| format!("failed to load stable from {}", args.stable.display()))?;
    let query_text = std::fs::read_to_string(&args.query)
        .wrap_err_with(|| format!("failed to read query from {}", args.query.display()))?;
    let query: DayQuery = serde_json::from_str(&query_text)
        .wrap_err_with(|| format!("failed to parse query from {}", args.query.display()))?;

    let engine = MatchingEngine::new(stable, config);
    let mut response = engine.compute_matches(&query);
    if let Some(limit) = args.limit {
        response.results.truncate(limit);
    }

    let output = if args.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{output}");

    Ok(if response.error_msg.is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::load("horsematch.toml").unwrap_or_default());
    };
    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
    let config = if is_yaml {
        EngineConfig::from_yaml_file(path)
    } else {
        EngineConfig::from_toml_file(path)
    };
    config.wrap_err_with(|| format!("failed to load config from {}", path.display()))
}
