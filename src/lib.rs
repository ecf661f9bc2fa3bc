//! Block-sorting LZW compressor.
//!
//! Provides lossless compression and decompression of arbitrary byte streams. Input is cut into
//! blocks (512 KiB by default). Each block is permuted by a Burrows-Wheeler Transform, optionally
//! remapped by Move-To-Front, then coded by LZW with a fixed code width of 9-16 bits. Every block
//! is stored as an independent record, so blocks are processed on all cores and the container
//! needs no end marker.
//!
//! Basic usage to compress a file is as follows:
//!
//! `$> bwlzw -z test.txt`
//!
//! This will compress the file and create the file test.txt.lzwb. `bwlzw -d test.txt.lzwb`
//! restores it.
//!
//! From Rust:
//!
//! ```no_run
//! use bwlzw::{compress, decompress, Options};
//!
//! let packed = compress(b"banana bandana", &Options::new().code_size(10)).unwrap();
//! assert_eq!(decompress(&packed).unwrap(), b"banana bandana");
//! ```
//!
pub mod bitstream;
pub mod bwt_algorithms;
pub mod compression;
pub mod error;
pub mod lzw_coding;
pub mod tools;

pub use compression::compress::{compress, compress_file, compress_file_with, compress_stream, StreamStats};
pub use compression::compress_block::{compress_block, BlockMetadata};
pub use compression::decompress::{
    decompress, decompress_block, decompress_file, decompress_file_with, decompress_stream,
};
pub use error::{LzwbError, Result};
pub use tools::options::{Options, Pipeline};
