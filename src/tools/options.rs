/// Compression options - structs and impls shared by the library and the command line
use std::{fmt::Display, fmt::Formatter};

use crate::error::{LzwbError, Result};
use crate::lzw_coding::lzw::check_code_size;

/// Default block size, 512 KiB.
pub const DEFAULT_BLOCK_SIZE: usize = 512 * 1024;
/// Largest block accepted. Bounds the suffix sort's working memory.
pub const MAX_BLOCK_SIZE: usize = 16 * 1024 * 1024;
pub const DEFAULT_CODE_SIZE: u8 = 12;

/// Transforms applied to each block before LZW.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pipeline {
    /// BWT, then LZW.
    Bwt,
    /// BWT, Move To Front, then LZW.
    BwtMtf,
}
impl Display for Pipeline {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Pipeline::Bwt => write!(f, "BWT+LZW"),
            Pipeline::BwtMtf => write!(f, "BWT+MTF+LZW"),
        }
    }
}

/// Defines all user settable options to control compression
#[derive(Clone, Debug)]
pub struct Options {
    /// Bits per LZW code, 9-16
    pub code_size: u8,
    /// Maximum input block size in bytes
    pub block_size: usize,
    /// Which transforms run before LZW
    pub pipeline: Pipeline,
    /// Worker threads for block processing. 0 lets rayon decide.
    pub threads: usize,
}

impl Options {
    pub fn new() -> Self {
        Self {
            code_size: DEFAULT_CODE_SIZE,
            block_size: DEFAULT_BLOCK_SIZE,
            pipeline: Pipeline::BwtMtf,
            threads: 0,
        }
    }

    pub fn code_size(mut self, code_size: u8) -> Self {
        self.code_size = code_size;
        self
    }

    pub fn block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Check every setting before any data is touched.
    pub fn validate(&self) -> Result<()> {
        check_code_size(self.code_size)?;
        if self.block_size == 0 {
            return Err(LzwbError::config("block size must be at least one byte"));
        }
        if self.block_size > MAX_BLOCK_SIZE {
            return Err(LzwbError::config(format!(
                "block size {} exceeds the maximum of {} bytes",
                self.block_size, MAX_BLOCK_SIZE
            )));
        }
        Ok(())
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}
