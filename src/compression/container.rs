//! Container framing. All integers are little-endian.
//!
//! ```text
//! magic:      4 bytes  "LZWB" (BWT+LZW) or "LZWM" (BWT+MTF+LZW)
//! code_size:  1 byte   bits per LZW code, 9-16
//! then, once per block, in block order:
//!   original_block_length   4 bytes
//!   primary_index           4 bytes
//!   compressed_payload_len  4 bytes
//!   compressed_payload      compressed_payload_len bytes
//! ```
//!
//! The stream simply ends after the last record. Empty input is a header with no records.

use std::io::{self, Read, Write};

use crate::error::{LzwbError, Result};
use crate::lzw_coding::lzw::check_code_size;
use crate::tools::options::Pipeline;

pub const MAGIC_BWT: [u8; 4] = *b"LZWB";
pub const MAGIC_BWT_MTF: [u8; 4] = *b"LZWM";
/// Magic plus code size.
pub const HEADER_SIZE: usize = 5;
/// Three u32 fields in front of every payload.
pub const RECORD_HEADER_SIZE: usize = 12;

/// The stream header: which pipeline made the blocks and how wide the LZW codes are.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreamHeader {
    pub code_size: u8,
    pub pipeline: Pipeline,
}

impl StreamHeader {
    pub fn magic(&self) -> [u8; 4] {
        match self.pipeline {
            Pipeline::Bwt => MAGIC_BWT,
            Pipeline::BwtMtf => MAGIC_BWT_MTF,
        }
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.magic())?;
        writer.write_all(&[self.code_size])?;
        Ok(())
    }

    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut buf = [0_u8; HEADER_SIZE];
        let got = read_full(reader, &mut buf)?;
        if got < HEADER_SIZE {
            return Err(LzwbError::format(format!(
                "truncated header: {} of {} bytes",
                got, HEADER_SIZE
            )));
        }
        let pipeline = match [buf[0], buf[1], buf[2], buf[3]] {
            MAGIC_BWT => Pipeline::Bwt,
            MAGIC_BWT_MTF => Pipeline::BwtMtf,
            other => {
                return Err(LzwbError::format(format!(
                    "bad magic {:02x?}, not a block-LZW container",
                    other
                )))
            }
        };
        let code_size = buf[4];
        check_code_size(code_size)
            .map_err(|_| LzwbError::format(format!("header declares code size {}", code_size)))?;
        Ok(Self {
            code_size,
            pipeline,
        })
    }
}

/// One compressed block as stored in the container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockRecord {
    pub original_length: u32,
    pub primary_index: u32,
    pub payload: Vec<u8>,
}

impl BlockRecord {
    /// Bytes this record occupies in the container.
    pub fn stored_len(&self) -> usize {
        RECORD_HEADER_SIZE + self.payload.len()
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let payload_len = u32::try_from(self.payload.len()).map_err(|_| {
            LzwbError::format(format!("payload of {} bytes is too large", self.payload.len()))
        })?;
        let mut head = [0_u8; RECORD_HEADER_SIZE];
        head[0..4].copy_from_slice(&self.original_length.to_le_bytes());
        head[4..8].copy_from_slice(&self.primary_index.to_le_bytes());
        head[8..12].copy_from_slice(&payload_len.to_le_bytes());
        writer.write_all(&head)?;
        writer.write_all(&self.payload)?;
        Ok(())
    }

    /// Read the next record. Returns None at a clean end of stream (no bytes at all).
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Option<Self>> {
        let mut head = [0_u8; RECORD_HEADER_SIZE];
        let got = read_full(reader, &mut head)?;
        if got == 0 {
            return Ok(None);
        }
        if got < RECORD_HEADER_SIZE {
            return Err(LzwbError::format(format!(
                "truncated record header: {} of {} bytes",
                got, RECORD_HEADER_SIZE
            )));
        }
        let field = |i: usize| u32::from_le_bytes([head[i], head[i + 1], head[i + 2], head[i + 3]]);
        let original_length = field(0);
        let primary_index = field(4);
        let payload_len = field(8);

        // Grow with the data rather than trusting the length field for the allocation
        let mut payload = Vec::new();
        reader
            .by_ref()
            .take(payload_len as u64)
            .read_to_end(&mut payload)?;
        if payload.len() < payload_len as usize {
            return Err(LzwbError::format(format!(
                "payload shorter than declared: {} of {} bytes",
                payload.len(),
                payload_len
            )));
        }
        Ok(Some(Self {
            original_length,
            primary_index,
            payload,
        }))
    }
}

/// Read until `buf` is full or the source is exhausted. Returns how many bytes were read.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
