//! The compression module drives the block pipeline and the container format.
//!
//! Compression happens in the following steps, once per block:
//! - Burrows Wheeler Transform: Sort the block's suffixes so bytes that share a context end up
//!   next to each other. The primary index records where the block starts.
//! - Move To Front transform (optional): Turn those clusters into runs of small values.
//! - LZW: Replace repeated strings with fixed width dictionary codes, packed LSB first.
//!
//! Each block becomes one record (original length, primary index, payload length, payload)
//! behind a five byte stream header. Blocks share no state, so they are compressed and
//! decompressed in parallel and written in their original order.
//!
//! Decompression follows the inverse of the compression process.
//! - LZW decoding, bounded by the stored original length.
//! - MTF decoding, if the header says MTF was used.
//! - BWT reversal with the stored primary index.
//!

pub mod compress;
pub mod compress_block;
pub mod container;
pub mod decompress;
