// src/join.rs
use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use std::{fs::File, io::Write, path::Path};

use crate::naming;
use crate::progress::Reporter;
use crate::stream::{read_up_to, IO_BLOCK_SIZE};
use crate::times::Timestamps;

#[derive(Debug, PartialEq, Eq)]
pub struct JoinSummary {
    pub output: String,
    pub chunks: u64,
    pub bytes: u64,
}

/// Rebuilds the file that `chunk` was cut from by concatenating
/// `base.chunk.1`, `base.chunk.2`, ... until the first missing number.
///
/// The rebuilt file takes the timestamps of `chunk` itself, or of chunk 1
/// when `chunk` does not exist. A gap in the numbering ends the file early
/// without an error.
pub fn join_chunks(chunk: &str, reporter: &mut Reporter) -> Result<JoinSummary> {
    let base = naming::base_from_chunk(chunk)
        .ok_or_else(|| anyhow!("'{}' is not a chunk file", chunk))?;
    let stamps = source_timestamps(chunk, base)?;

    info!("joining chunks of {} from {}", base, chunk);
    reporter.begin(None)?;
    reporter.line(format!("Rebuilding {} from {}...", base, chunk));

    let mut output = File::create(base)
        .with_context(|| format!("creating output '{}'", base))?;
    let mut buf = vec![0u8; IO_BLOCK_SIZE];
    let mut chunks = 0u64;
    let mut bytes = 0u64;

    loop {
        let part = naming::chunk_path(base, chunks + 1);
        if !Path::new(&part).is_file() {
            break;
        }
        reporter.line(format!("  ← {}", part));

        let mut input = File::open(&part)
            .with_context(|| format!("opening chunk '{}'", part))?;
        loop {
            let n = read_up_to(&mut input, &mut buf)
                .with_context(|| format!("reading chunk '{}'", part))?;
            if n == 0 {
                break;
            }
            output
                .write_all(&buf[..n])
                .with_context(|| format!("writing '{}'", base))?;
            reporter.advance(n as u64);
            bytes += n as u64;
        }
        chunks += 1;
        debug!("appended {}", part);
    }

    output
        .flush()
        .with_context(|| format!("flushing '{}'", base))?;
    drop(output);

    let after_gap = naming::chunk_path(base, chunks + 2);
    if Path::new(&after_gap).exists() {
        info!(
            "{} is missing but {} exists; {} stops after chunk {}",
            naming::chunk_path(base, chunks + 1),
            after_gap,
            base,
            chunks
        );
    }

    if let Some(stamps) = stamps {
        stamps.apply(Path::new(base))?;
    }

    reporter.finish(format!("✅ Join complete ({} chunks, {} bytes).", chunks, bytes));
    Ok(JoinSummary { output: base.to_string(), chunks, bytes })
}

/// Times of the named chunk, falling back to chunk 1, then to none at all.
fn source_timestamps(chunk: &str, base: &str) -> Result<Option<Timestamps>> {
    let named = Path::new(chunk);
    if named.is_file() {
        return Timestamps::capture(named).map(Some);
    }
    let first = naming::chunk_path(base, 1);
    if Path::new(&first).is_file() {
        info!("{} does not exist, taking timestamps from {}", chunk, first);
        return Timestamps::capture(Path::new(&first)).map(Some);
    }
    info!("no chunk of {} found", base);
    Ok(None)
}
