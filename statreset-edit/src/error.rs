//! Error types for statreset-edit.
//!
//! Every variant is a per-record failure: the batch reports it and moves on.

use camino::Utf8PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    /// The record could not be opened or read.
    #[error("read failed: {0}")]
    Read(#[source] std::io::Error),

    /// The record is not valid UTF-8.
    #[error("not valid UTF-8 (first bad byte at offset {valid_up_to})")]
    Decode {
        path: Utf8PathBuf,
        valid_up_to: usize,
    },

    /// The rewritten record could not be written back.
    #[error("write failed: {0}")]
    Write(#[source] std::io::Error),
}

pub type RecordResult<T> = Result<T, RecordError>;
