// src/split.rs
use anyhow::{Context, Result};
use log::{debug, info};
use std::{fs::File, io::Write, path::Path};

use crate::naming;
use crate::progress::Reporter;
use crate::stream::{read_up_to, IO_BLOCK_SIZE};
use crate::times::Timestamps;

#[derive(Debug, PartialEq, Eq)]
pub enum SplitOutcome {
    /// Nothing to read; no chunk was written.
    SourceMissing,
    Split { chunks: u64, bytes: u64 },
}

/// Cuts `source` into `source.chunk.1`, `source.chunk.2`, ... of at most
/// `chunk_size` bytes each, then stamps the source's times onto every chunk.
///
/// A missing source is not an error. A chunk size of zero writes nothing.
pub fn split_file(source: &str, chunk_size: u64, reporter: &mut Reporter) -> Result<SplitOutcome> {
    let source_path = Path::new(source);
    if !source_path.is_file() {
        info!("'{}' does not exist, nothing to split", source);
        return Ok(SplitOutcome::SourceMissing);
    }

    let stamps = Timestamps::capture(source_path)?;
    let mut input = File::open(source_path)
        .with_context(|| format!("opening source '{}'", source))?;
    let total = input
        .metadata()
        .with_context(|| format!("reading metadata for '{}'", source))?
        .len();

    info!("splitting {} ({} bytes) into {}-byte chunks", source, total, chunk_size);
    reporter.begin(Some(total))?;
    reporter.line(format!("Splitting {} into {}-byte chunks...", source, chunk_size));

    let block = chunk_size.min(IO_BLOCK_SIZE as u64) as usize;
    let mut buf = vec![0u8; block];
    let mut chunks = 0u64;
    let mut bytes = 0u64;

    loop {
        // no chunk file is created until there is at least one byte for it
        let first = read_up_to(&mut input, &mut buf)
            .with_context(|| format!("reading '{}'", source))?;
        if first == 0 {
            break;
        }

        chunks += 1;
        let chunk = naming::chunk_path(source, chunks);
        reporter.line(format!("  → {}", chunk));
        let mut out = File::create(&chunk)
            .with_context(|| format!("creating chunk '{}'", chunk))?;

        out.write_all(&buf[..first])
            .with_context(|| format!("writing chunk '{}'", chunk))?;
        reporter.advance(first as u64);
        let mut written = first as u64;
        let mut eof = first < block;

        while !eof && written < chunk_size {
            let want = (chunk_size - written).min(block as u64) as usize;
            let n = read_up_to(&mut input, &mut buf[..want])
                .with_context(|| format!("reading '{}'", source))?;
            out.write_all(&buf[..n])
                .with_context(|| format!("writing chunk '{}'", chunk))?;
            reporter.advance(n as u64);
            written += n as u64;
            eof = n < want;
        }

        out.flush()
            .with_context(|| format!("flushing chunk '{}'", chunk))?;
        debug!("{} holds {} bytes", chunk, written);
        bytes += written;
        if eof {
            break;
        }
    }
    drop(input);

    for index in 1..=chunks {
        let chunk = naming::chunk_path(source, index);
        let chunk_path = Path::new(&chunk);
        if chunk_path.exists() {
            stamps.apply(chunk_path)?;
        }
    }

    reporter.finish(format!("✅ Split complete ({} chunks, {} bytes).", chunks, bytes));
    Ok(SplitOutcome::Split { chunks, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use filetime::FileTime;
    use std::fs;

    fn source_in(dir: &tempfile::TempDir, name: &str, data: &[u8]) -> String {
        let path = dir.path().join(name);
        fs::write(&path, data).unwrap();
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn twelve_bytes_in_fives() {
        let dir = tempfile::tempdir().unwrap();
        let src = source_in(&dir, "letters.txt", b"ABCDEFGHIJKL");

        let outcome = split_file(&src, 5, &mut Reporter::silent()).unwrap();
        assert_eq!(outcome, SplitOutcome::Split { chunks: 3, bytes: 12 });

        assert_eq!(fs::read(format!("{src}.chunk.1")).unwrap(), b"ABCDE");
        assert_eq!(fs::read(format!("{src}.chunk.2")).unwrap(), b"FGHIJ");
        assert_eq!(fs::read(format!("{src}.chunk.3")).unwrap(), b"KL");
        assert!(!Path::new(&format!("{src}.chunk.4")).exists());
        assert_eq!(fs::read(&src).unwrap(), b"ABCDEFGHIJKL");
    }

    #[test]
    fn chunk_count_and_last_length() {
        let data: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        for size in [1u64, 7, 100, 250, 999, 1000, 1001, 4096] {
            let dir = tempfile::tempdir().unwrap();
            let src = source_in(&dir, "data.bin", &data);

            let expected = (data.len() as u64).div_ceil(size);
            let outcome = split_file(&src, size, &mut Reporter::silent()).unwrap();
            assert_eq!(outcome, SplitOutcome::Split { chunks: expected, bytes: 1000 });

            let last = fs::read(naming::chunk_path(&src, expected)).unwrap();
            let rem = data.len() as u64 % size;
            assert_eq!(last.len() as u64, if rem == 0 { size } else { rem });
            assert!(!Path::new(&naming::chunk_path(&src, expected + 1)).exists());

            let mut joined = Vec::new();
            for i in 1..=expected {
                joined.extend(fs::read(naming::chunk_path(&src, i)).unwrap());
            }
            assert_eq!(joined, data);
        }
    }

    #[test]
    fn chunk_larger_than_io_block() {
        let data: Vec<u8> = (0..IO_BLOCK_SIZE + 10).map(|i| (i % 251) as u8).collect();
        let dir = tempfile::tempdir().unwrap();
        let src = source_in(&dir, "big.bin", &data);

        let size = IO_BLOCK_SIZE as u64 + 5;
        let outcome = split_file(&src, size, &mut Reporter::silent()).unwrap();
        assert_eq!(outcome, SplitOutcome::Split { chunks: 2, bytes: data.len() as u64 });
        assert_eq!(fs::read(naming::chunk_path(&src, 1)).unwrap(), &data[..size as usize]);
        assert_eq!(fs::read(naming::chunk_path(&src, 2)).unwrap(), &data[size as usize..]);
    }

    #[test]
    fn missing_source_is_a_quiet_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("nonexistent.bin");
        let src = src.to_str().unwrap();

        let outcome = split_file(src, 1000, &mut Reporter::silent()).unwrap();
        assert_eq!(outcome, SplitOutcome::SourceMissing);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn empty_source_and_zero_size_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let empty = source_in(&dir, "empty.bin", b"");
        assert_eq!(
            split_file(&empty, 10, &mut Reporter::silent()).unwrap(),
            SplitOutcome::Split { chunks: 0, bytes: 0 }
        );

        let src = source_in(&dir, "data.bin", b"abc");
        assert_eq!(
            split_file(&src, 0, &mut Reporter::silent()).unwrap(),
            SplitOutcome::Split { chunks: 0, bytes: 0 }
        );
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn chunks_carry_source_timestamps() {
        let dir = tempfile::tempdir().unwrap();
        let src = source_in(&dir, "stamped.bin", &[7u8; 25]);
        let atime = FileTime::from_unix_time(1_650_000_000, 0);
        let mtime = FileTime::from_unix_time(1_400_000_000, 0);
        filetime::set_file_times(&src, atime, mtime).unwrap();

        split_file(&src, 10, &mut Reporter::silent()).unwrap();

        for i in 1..=3 {
            let meta = fs::metadata(naming::chunk_path(&src, i)).unwrap();
            assert_eq!(FileTime::from_last_modification_time(&meta), mtime);
            assert_eq!(FileTime::from_last_access_time(&meta), atime);
        }
    }
}
