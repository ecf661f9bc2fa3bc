use log::trace;

use super::suffix_array::build_suffix_array;
use crate::error::{LzwbError, Result};
use crate::tools::freq_count::{freqs, starts};

/// Burrows-Wheeler-Transform of a block, ordered by suffix. Nothing is appended to the block, so
/// every byte value is allowed. Returns the transformed bytes and the primary index: the row of
/// the suffix that starts at offset 0, which holds the wrapped last byte of the block.
pub fn bwt_transform(data: &[u8]) -> (Vec<u8>, u32) {
    let sa = build_suffix_array(data);

    let mut key = 0_u32;
    let mut bwt = vec![0; data.len()];
    for (i, (&pos, out)) in sa.iter().zip(bwt.iter_mut()).enumerate() {
        if pos == 0 {
            key = i as u32;
            *out = data[data.len() - 1];
        } else {
            *out = data[pos as usize - 1];
        }
    }
    trace!("BWT of {} bytes, primary index {}", data.len(), key);
    (bwt, key)
}

/// Decode a Burrows-Wheeler-Transform produced by [`bwt_transform`].
///
/// The suffix order is the row order of the block with an end marker appended, minus the
/// marker's own row. That row is rebuilt on the fly: row 0 ends with the wrapped last byte
/// (stored at the primary index), row `primary + 1` ends with the marker, and row `i + 1` ends
/// with `bwt[i]` otherwise. The LF-mapping over those n + 1 rows is then walked from row 0,
/// emitting the block back to front.
pub fn bwt_inverse(bwt: &[u8], primary_index: u32) -> Result<Vec<u8>> {
    let end = bwt.len();
    let primary = primary_index as usize;
    if end == 0 {
        return match primary {
            0 => Ok(Vec::new()),
            _ => Err(LzwbError::IndexOutOfRange {
                index: primary,
                len: 0,
            }),
        };
    }
    if primary >= end {
        return Err(LzwbError::IndexOutOfRange {
            index: primary,
            len: end,
        });
    }

    // Last column byte of each conceptual row. None is the end marker.
    let last = |row: usize| -> Option<u8> {
        match row {
            0 => Some(bwt[primary]),
            r if r == primary + 1 => None,
            r => Some(bwt[r - 1]),
        }
    };

    // First column offsets: the end marker owns row 0, so every byte starts one row later.
    let mut next = starts(&freqs(bwt), 1);

    // LF-map: lf[row] is the row whose suffix is one byte longer than row's suffix.
    let mut lf = vec![0_u32; end + 1];
    for (row, slot) in lf.iter_mut().enumerate() {
        if let Some(b) = last(row) {
            *slot = next[b as usize];
            next[b as usize] += 1;
        }
    }

    let mut data = vec![0_u8; end];
    let mut row = 0_usize;
    for out in data.iter_mut().rev() {
        // Only the final row visited could be the marker row, and that one is never read
        *out = last(row).unwrap_or_default();
        row = lf[row] as usize;
    }
    Ok(data)
}
