//! The bwt_algorithms module forms the sorting subsystem of the block pipeline.
//!
//! The Burrows-Wheeler Transform reorders a block so that bytes which are followed by similar
//! contexts sit together, which makes runs of identical bytes more likely. The order comes from
//! a suffix array built by prefix doubling with radix passes.
//!
//! No end-of-block byte is ever appended. The primary index alone marks where the block starts,
//! so blocks may contain every byte value, 0x00 and 0xff included.
//!
pub mod bwt_sort;
pub mod suffix_array;
