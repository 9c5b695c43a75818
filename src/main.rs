use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use wait_time_analysis::{analysis, busy, trace};

/// Calculates the perceived wait time for a set of jobs, where the wait
/// is taken only as the time between submitting a job and having
/// something running on the machine.
#[derive(Parser, Debug)]
#[command(name = "waittime")]
#[command(version)]
#[command(about, long_about = None)]
struct Cli {
    /// Job log with one "submit start stop" line per job
    #[arg(value_name = "TIMES")]
    file: Option<PathBuf>,

    /// List the merged busy periods before the totals
    #[arg(long)]
    busy: bool,

    /// Also report job count, busy periods, mean wait and utilization
    #[arg(long)]
    stats: bool,

    /// Unit label for the reported times
    #[arg(long, value_name = "NAME", default_value = "seconds")]
    unit: String,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Log to stderr; RUST_LOG takes precedence over -v.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.verbose);

    let Some(path) = args.file else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let jobs = trace::load_jobs(&path)
        .with_context(|| format!("unable to read job log {}", path.display()))?;
    ensure!(!jobs.is_empty(), "job log {} contains no jobs", path.display());

    let busy = busy::merge(&jobs).context("unable to merge busy periods")?;
    if args.busy {
        print!("{}", busy);
    }

    let summary = analysis::summarize(&jobs, busy).context("unable to attribute wait time")?;
    print!("{}", summary.report(&args.unit));

    if args.stats {
        println!("Jobs:            {}", summary.jobs);
        println!("Busy periods:    {}", summary.busy_periods);
        if let Some(mean) = summary.mean_wait() {
            println!("Mean wait time:  {:.2} {}", mean, args.unit);
        }
        if let Some(utilization) = summary.utilization() {
            println!("Utilization:     {:.1}%", utilization * 100.0);
        }
    }

    Ok(())
}
