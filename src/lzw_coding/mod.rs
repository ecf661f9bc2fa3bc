//! The lzw_coding module is the entropy-reducing back end of the block pipeline.
//!
//! LZW replaces repeated byte strings with fixed width codes. The dictionary is built from the
//! data itself: the encoder adds one string per emitted code, and the decoder rebuilds exactly
//! the same strings by replaying the code stream, so no table is ever stored in the output.
//!
//! Codes are `code_size` bits wide (9-16), which also caps the dictionary at `2^code_size`
//! entries. A full dictionary is frozen rather than reset.
//!
pub mod dictionary;
pub mod lzw;
