// src/error.rs
use thiserror::Error;

/// Exit code for I/O faults that abort an operation part way.
pub const EXIT_IO_FAILURE: i32 = 4;

/// Argument-shape errors, detected before any file is touched.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum UsageError {
    #[error("'{0}' is not a chunk file (expected a name like 'file.chunk.1')")]
    NotAChunkFile(String),

    #[error("second parameter '{0}' is not an integer")]
    SizeNotAnInteger(String),

    #[error("too many parameters ({0} given, at most 2 accepted)")]
    TooManyParameters(usize),
}

impl UsageError {
    pub fn exit_code(&self) -> i32 {
        match self {
            UsageError::NotAChunkFile(_) => 1,
            UsageError::SizeNotAnInteger(_) => 2,
            UsageError::TooManyParameters(_) => 3,
        }
    }
}
