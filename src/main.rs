use acbf::io_utils::search_cli_error;
use acbf::{
    available_workers, Checksum, ChecksumDeriver, CpuSummary, FixedKey, ProgressBars, Scheduler,
    SearchConfig, SearchResult,
};
use clap::Parser;
use serde::Serialize;
use tracing::{warn, Level};

/// Bruteforce the activation bytes of an audible audiobook from its checksum
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Audiobook checksum as a SHA-1 hash (40 hex digits)
    checksum: Checksum,

    /// First block to search; skips blocks already covered by earlier runs
    #[arg(short, long, value_name = "BLOCK", default_value_t = 0)]
    start: u8,

    /// Last block to search, inclusive
    #[arg(short, long, value_name = "BLOCK", default_value_t = 255)]
    end: u8,

    /// Limit the number of worker threads (defaults to all available cores)
    #[arg(short, long, value_name = "CORES", value_parser = clap::value_parser!(u32).range(1..))]
    cores: Option<u32>,

    /// Don't draw progress bars
    #[arg(long)]
    no_progress: bool,

    /// Print the result as JSON instead of the text summary
    #[arg(long)]
    json: bool,

    /// Log per-block activity
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct Report {
    checksum: Checksum,
    start_block: u8,
    end_block: u8,
    workers: usize,
    elapsed_ms: u128,
    result: SearchResult,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool, bars_visible: bool) {
    // Info lines would tear the progress bars, which share stderr.
    let level = match (verbose, bars_visible) {
        (true, _) => Level::DEBUG,
        (false, true) => Level::WARN,
        (false, false) => Level::INFO,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let available = available_workers();
    let requested = args.cores.map_or(available, |n| n as usize);
    let workers = requested.min(available);

    let config = SearchConfig::new(args.start, args.end, workers);
    let bars = ProgressBars::new(
        workers,
        config.combinations_per_worker(),
        !args.no_progress && !args.json,
    );
    init_logging(args.verbose, bars.is_visible());

    if requested > available {
        warn!(requested, available, "more cores requested than available, clamping");
    }
    config
        .validate()
        .map_err(|e| search_cli_error("invalid search range", e))?;

    if !args.json {
        let cpu = CpuSummary::detect();
        println!();
        println!("> Checksum: {}", args.checksum);
        println!("> CPU: {} (using {}/{} cores)", cpu.model, workers, cpu.cores);
        println!("> Combinations: {}", config.total_combinations());
        println!("> Combinations per Core: {}", config.combinations_per_worker());
        println!();
    }

    let deriver = ChecksumDeriver::new(FixedKey::AUDIBLE);

    let started = std::time::Instant::now();
    let result = Scheduler::new(&deriver, &bars)
        .run(args.checksum, &config)
        .map_err(|e| search_cli_error("search failed", e))?;
    bars.finish();

    if args.json {
        let report = Report {
            checksum: args.checksum,
            start_block: args.start,
            end_block: args.end,
            workers,
            elapsed_ms: started.elapsed().as_millis(),
            result,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    match result {
        SearchResult::Found(ab) => println!("> Activation Bytes: {ab}"),
        SearchResult::NotFound => println!("> No Activation Bytes found!"),
    }
    Ok(())
}
