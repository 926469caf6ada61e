// src/main.rs
mod cli;
mod error;
mod join;
mod naming;
mod progress;
mod split;
mod stream;
mod times;

use anyhow::Result;
use clap::Parser;
use log::debug;
use std::process;

use cli::{Cli, Invocation};
use error::{UsageError, EXIT_IO_FAILURE};
use progress::Reporter;
use split::SplitOutcome;

fn main() {
    let cli = Cli::parse();
    init_logging(log_filter(cli.verbose, cli.quiet));

    let invocation = match cli.invocation() {
        Ok(inv) => inv,
        Err(e) => {
            if matches!(e, UsageError::TooManyParameters(_)) {
                if let Err(e) = cli::print_usage() {
                    eprintln!("Error: printing usage: {}", e);
                }
            }
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    };

    let reporter = Reporter::new(cli.quiet, cli.progress);
    if let Err(e) = run(invocation, reporter) {
        eprintln!("Error: {:#}", e);
        process::exit(EXIT_IO_FAILURE);
    }
}

fn run(invocation: Invocation, mut reporter: Reporter) -> Result<()> {
    match invocation {
        Invocation::Usage => cli::print_usage()?,
        Invocation::Join(chunk) => {
            let summary = join::join_chunks(&chunk, &mut reporter)?;
            debug!(
                "rebuilt {} from {} chunks ({} bytes)",
                summary.output, summary.chunks, summary.bytes
            );
        }
        Invocation::Split { source, chunk_size } => {
            match split::split_file(&source, chunk_size, &mut reporter)? {
                SplitOutcome::SourceMissing => debug!("no chunks written for {}", source),
                SplitOutcome::Split { chunks, bytes } => {
                    debug!("{} cut into {} chunks ({} bytes)", source, chunks, bytes)
                }
            }
        }
    }
    Ok(())
}

/// Default filter when RUST_LOG is unset. Missing sources and numbering
/// gaps are logged at `info`, so they stay silent unless asked for.
fn log_filter(verbose: bool, quiet: bool) -> &'static str {
    match (verbose, quiet) {
        (true, _) => "debug",
        (false, true) => "off",
        (false, false) => "error",
    }
}

fn init_logging(default: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}
