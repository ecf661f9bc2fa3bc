//! BitUnpacker: reads codes back out of a buffer written by BitPacker.
//!
//! Bits are consumed least significant bit first, matching the packer. The unpacker works on
//! an in-memory slice because every compressed payload is fully buffered before it is decoded.
//!

/// Reads fixed or variable width codes from a packed byte buffer.
#[derive(Debug)]
pub struct BitUnpacker<'a> {
    buffer: &'a [u8],
    cursor: usize,
    queue: u64,
    q_bits: u8,
}

impl<'a> BitUnpacker<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            cursor: 0,
            queue: 0,
            q_bits: 0,
        }
    }

    /// Return Option<u32> of the next n bits (1-32), or None if fewer than n bits are left.
    /// On None nothing is consumed.
    pub fn bits(&mut self, n: u8) -> Option<u32> {
        debug_assert!((1..=32).contains(&n));
        // Top up the queue a byte at a time until it can satisfy the request
        while self.q_bits < n {
            let &byte = self.buffer.get(self.cursor)?;
            self.queue |= (byte as u64) << self.q_bits;
            self.q_bits += 8;
            self.cursor += 1;
        }
        let value = (self.queue & (u64::MAX >> (64 - n as u32))) as u32;
        self.queue >>= n;
        self.q_bits -= n;
        Some(value)
    }

    /// Returns a byte as an Option<u8>, or None if there is no more data to read.
    pub fn byte(&mut self) -> Option<u8> {
        self.bits(8).map(|byte| byte as u8)
    }

    /// Number of bits not yet consumed.
    pub fn remaining(&self) -> usize {
        (self.buffer.len() - self.cursor) * 8 + self.q_bits as usize
    }

    /// Debugging function. Report current position as bytes.bits consumed.
    pub fn loc(&self) -> String {
        let used = self.cursor * 8 - self.q_bits as usize;
        format!("[{}.{}]", used / 8, used % 8)
    }
}
