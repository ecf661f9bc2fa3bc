//! Errors raised by the transforms and the container code.
//!
//! Every error is detected synchronously while a block is being transformed or decoded. Nothing
//! is retried: a corrupt record makes the rest of the container unusable.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LzwbError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Bad magic, truncated header or record, short payload, wrong decoded length.
    #[error("Invalid container format: {0}")]
    Format(String),
    /// A decoded LZW code that is neither in the dictionary nor the next code to be inserted.
    #[error("Invalid LZW code {code} (next dictionary code is {next_code})")]
    InvalidCode { code: u32, next_code: u32 },
    #[error("Primary index {index} is out of range for a block of {len} bytes")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Invalid configuration: {0}")]
    Configuration(String),
    #[error("Unable to start worker threads: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, LzwbError>;

impl LzwbError {
    pub(crate) fn format(msg: impl Into<String>) -> Self {
        LzwbError::Format(msg.into())
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        LzwbError::Configuration(msg.into())
    }
}
