use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

mod banner;
mod error;
mod oracle;
mod process;
mod search;

use banner::Banner;
use oracle::{
    DEFAULT_EXECUTABLE, DEFAULT_PARAM_NAME, DEFAULT_POLL_INTERVAL, OracleInvocation,
    ProcessOracle,
};
use search::{Method, Order, ParallelConfig, SearchConfig, SearchResult, run_search};

// --- Command Line Arguments ---

#[derive(Parser)]
#[command(name = "esbmc-parallel")]
#[command(about = "ESBMC Parallel Runner - find where a verifier's verdict flips")]
#[command(version)]
#[command(arg_required_else_help = true)]
struct Args {
    /// Source file handed to the verifier
    filename: PathBuf,
    /// Lower end of the parameter range (inclusive)
    #[arg(allow_negative_numbers = true)]
    hmin: i64,
    /// Upper end of the parameter range (inclusive)
    #[arg(allow_negative_numbers = true)]
    hmax: i64,

    // --- Strategy selection ---
    /// Search strategy: sequential, sequential_opt or binary
    #[arg(long)]
    method: Method,
    /// Scan direction for the sequential strategies: asc or desc
    #[arg(long, default_value = "asc")]
    order: Order,

    // --- Oracle invocation ---
    /// Verifier executable
    #[arg(long, default_value = DEFAULT_EXECUTABLE)]
    executable: PathBuf,
    /// Options passed to the verifier before the parameter define
    #[arg(long, default_value = "--boolector --quiet", allow_hyphen_values = true)]
    options: String,
    /// Name of the define carrying the parameter value
    #[arg(long, default_value = DEFAULT_PARAM_NAME)]
    param: String,

    // --- Worker pool ---
    /// Number of parallel workers (default: number of CPUs - 1)
    #[arg(short = 'j', long)]
    workers: Option<usize>,
    /// Milliseconds between cancellation checks of a running verifier
    #[arg(long)]
    poll_ms: Option<u64>,
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_writer(std::io::stderr)
        .init();
}

fn print_result(result: &SearchResult) {
    println!();
    match result.boundary {
        Some(boundary) => println!(
            "The best solution is: {} in {}s",
            boundary,
            result.statistics.elapsed_time.as_secs()
        ),
        None => println!("No solution found :("),
    }
    println!();
    println!("Search Statistics:");
    print!("{}", result.statistics.format_summary());
}

fn main() -> anyhow::Result<()> {
    let started_at = Instant::now();
    init_logging();
    let args = Args::parse();

    let invocation = OracleInvocation::default()
        .with_executable(args.executable)
        .with_filename(args.filename)
        .with_options(args.options.split_whitespace().map(String::from).collect())
        .with_param_name(args.param);

    let config = SearchConfig::default()
        .with_range(args.hmin, args.hmax)
        .with_method(args.method)
        .with_order(args.order)
        .with_invocation(invocation)
        .with_start(started_at);
    config.validate().context("invalid configuration")?;

    let parallel = ParallelConfig::default().with_workers_option(args.workers);
    let poll_interval = args
        .poll_ms
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_POLL_INTERVAL);
    let oracle = ProcessOracle::new(config.invocation.clone()).with_poll_interval(poll_interval);

    println!();
    println!("{}", Banner::collect(&config));
    println!();
    println!("RUNNING:");

    let result = run_search(&oracle, &config, &parallel);
    print_result(&result);

    Ok(())
}
