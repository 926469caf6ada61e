// src/cli.rs
use clap::{CommandFactory, Parser};
use std::io;

use crate::error::UsageError;
use crate::naming;

const EXAMPLES: &str = "\
Examples:
  Split bigvideo.mp4 into 2 000 000-byte chunks:
    slicer bigvideo.mp4 2000000
  Rebuild bigvideo.mp4 from its chunks (any chunk of the set works):
    slicer bigvideo.mp4.chunk.1

All chunks must sit in the same folder. Chunks are numbered from 1 without gaps;
rebuilding stops at the first missing number.";

/// slicer: cut big files into chunks, or rebuild them from the chunks
#[derive(Parser, Debug)]
#[command(name = "slicer", author, version, about, after_long_help = EXAMPLES)]
pub struct Cli {
    /// Log what is going on (same as RUST_LOG=debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Print nothing but errors
    #[arg(short, long, conflicts_with = "progress")]
    pub quiet: bool,

    /// Draw a byte progress bar while working
    #[arg(long)]
    pub progress: bool,

    /// File to split, or any chunk file ("name.chunk.N") to rebuild from
    #[arg(value_name = "FILE")]
    pub file: Option<String>,

    /// Chunk size in bytes; giving it selects splitting
    #[arg(value_name = "SIZE", allow_negative_numbers = true)]
    pub size: Option<String>,

    #[arg(hide = true)]
    pub extra: Vec<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Invocation {
    Usage,
    Join(String),
    Split { source: String, chunk_size: u64 },
}

impl Cli {
    /// Picks the operation from how many positional tokens were given.
    pub fn invocation(&self) -> Result<Invocation, UsageError> {
        match (&self.file, &self.size) {
            (None, _) => Ok(Invocation::Usage),
            (Some(file), None) => {
                if naming::is_chunk_name(file) {
                    Ok(Invocation::Join(file.clone()))
                } else {
                    Err(UsageError::NotAChunkFile(file.clone()))
                }
            }
            (Some(_), Some(_)) if !self.extra.is_empty() => {
                Err(UsageError::TooManyParameters(self.extra.len() + 2))
            }
            (Some(file), Some(size)) => {
                let chunk_size = size
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| UsageError::SizeNotAnInteger(size.clone()))?;
                Ok(Invocation::Split { source: file.clone(), chunk_size })
            }
        }
    }
}

pub fn print_usage() -> io::Result<()> {
    Cli::command().print_long_help()?;
    println!();
    Ok(())
}
