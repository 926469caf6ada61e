// src/naming.rs
//! Chunk file naming: `<base>.chunk.<n>`, n counting from 1 with no padding.

/// Separator between the base file name and the chunk number.
pub const MARKER: &str = ".chunk.";

/// True when `name` looks like a chunk file (contains the marker anywhere).
pub fn is_chunk_name(name: &str) -> bool {
    name.contains(MARKER)
}

/// Name of chunk `index` of `base`.
pub fn chunk_path(base: &str, index: u64) -> String {
    format!("{base}{MARKER}{index}")
}

/// Strips everything from the last marker onward.
pub fn base_from_chunk(chunk: &str) -> Option<&str> {
    chunk.rfind(MARKER).map(|at| &chunk[..at])
}
