// src/stream.rs
use std::io::{self, Read};

/// Upper bound on a single read or write, for both directions.
pub const IO_BLOCK_SIZE: usize = 7_000_000;

/// Reads until `buf` is full or the reader is exhausted; a short count means EOF.
pub fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
