use log::{debug, trace};

use super::dictionary::{DecodeDictionary, EncodeDictionary, ROOTS};
use crate::bitstream::bitpacker::BitPacker;
use crate::bitstream::bitunpacker::BitUnpacker;
use crate::error::{LzwbError, Result};

/// Smallest supported code width. Anything narrower could not hold the 256 roots plus growth.
pub const MIN_CODE_SIZE: u8 = 9;
/// Largest supported code width.
pub const MAX_CODE_SIZE: u8 = 16;

/// Reject code widths outside 9-16 bits.
pub fn check_code_size(code_size: u8) -> Result<()> {
    if (MIN_CODE_SIZE..=MAX_CODE_SIZE).contains(&code_size) {
        Ok(())
    } else {
        Err(LzwbError::config(format!(
            "code size {} is outside {}-{} bits",
            code_size, MIN_CODE_SIZE, MAX_CODE_SIZE
        )))
    }
}

/// LZW-compress `data` into a stream of `code_size` bit codes, least significant bit first.
/// The stream has no end code; the reader must know how many bytes to expect.
pub fn lzw_compress(data: &[u8], code_size: u8) -> Result<Vec<u8>> {
    check_code_size(code_size)?;
    let mut iter = data.iter();
    let Some(&first) = iter.next() else {
        return Ok(Vec::new());
    };

    let mut dict = EncodeDictionary::new(code_size);
    let mut bp = BitPacker::new(data.len() * code_size as usize / 8 / 2 + 8);
    let mut codes = 0_usize;

    // s is the code of the longest match so far
    let mut s = first as u32;
    for &c in iter {
        match dict.find(s, c) {
            Some(code) => s = code,
            None => {
                bp.out(s, code_size);
                codes += 1;
                dict.insert(s, c);
                s = c as u32;
            }
        }
    }
    bp.out(s, code_size);
    codes += 1;
    trace!("LZW stream ends at {}", bp.loc());

    debug!(
        "LZW: {} bytes in, {} codes of {} bits, dictionary {} entries{}",
        data.len(),
        codes,
        code_size,
        dict.len(),
        if dict.is_full() { " (full)" } else { "" }
    );
    Ok(bp.finish())
}

/// Decode an LZW code stream back into bytes. Decoding stops at the end of the stream or once
/// `expected_length` bytes exist; output past that length is dropped.
pub fn lzw_decompress(stream: &[u8], code_size: u8, expected_length: usize) -> Result<Vec<u8>> {
    check_code_size(code_size)?;
    if expected_length == 0 {
        return Ok(Vec::new());
    }

    let mut bu = BitUnpacker::new(stream);
    let Some(first) = bu.bits(code_size) else {
        return Ok(Vec::new());
    };
    if first >= ROOTS {
        return Err(LzwbError::InvalidCode {
            code: first,
            next_code: ROOTS,
        });
    }

    let mut dict = DecodeDictionary::new(code_size);
    // A corrupt length field must not turn into a huge allocation
    let mut out = Vec::with_capacity(expected_length.min(stream.len().saturating_mul(64)));
    out.push(first as u8);
    let mut old = first;

    while out.len() < expected_length {
        let Some(code) = bu.bits(code_size) else {
            break;
        };
        let head = if dict.contains(code) {
            dict.expand(code, &mut out);
            dict.first(code)
        } else if code == dict.next_code() {
            // The code being defined right now: old followed by its own first byte
            let head = dict.first(old);
            dict.expand(old, &mut out);
            out.push(head);
            head
        } else {
            return Err(LzwbError::InvalidCode {
                code,
                next_code: dict.next_code(),
            });
        };
        dict.insert(old, head);
        old = code;
    }
    out.truncate(expected_length);
    Ok(out)
}
