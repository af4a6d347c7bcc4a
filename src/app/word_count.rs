use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use mrlocal::workload::wc::WordCount;
use mrlocal::{engine, JobConfig, Mode};
use tracing_subscriber::EnvFilter;

/// Count word occurrences in a line-oriented text file.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the input text file
    #[arg(short, long)]
    input: PathBuf,

    /// Worker threads used by the parallel mode
    #[arg(short, long, default_value_t = mrlocal::DEFAULT_WORKERS)]
    workers: usize,

    /// Execution mode
    #[arg(short, long, value_enum, default_value = "parallel")]
    mode: Mode,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = JobConfig::new(args.input).workers(args.workers);
    let mut job = WordCount::new();
    engine::run(&mut job, &config, args.mode, &mut io::stdout().lock())?;
    Ok(())
}
