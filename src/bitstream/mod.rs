//! The bitstream module packs and unpacks the LZW code stream.
//!
//! LZW codes are a fixed number of bits wide (9-16), so they almost never line up with byte
//! boundaries. BitPacker queues codes and pushes out complete bytes, least significant bit
//! first. BitUnpacker reverses that. The last byte of a payload is padded with zero bits; since
//! the padding is always shorter than one code, a reader can never mistake it for a code.
//!
pub mod bitpacker;
pub mod bitunpacker;
