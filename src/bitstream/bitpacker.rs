use log::error;

/// Packs variable width codes into bytes, least significant bit first. The first code written
/// occupies the low bits of the first byte.
pub struct BitPacker {
    pub output: Vec<u8>,
    /// Number of valid bits in the final byte after a flush (0 means the byte is full).
    pub last_bits: u8,
    queue: u64,
    q_bits: u8,
}

impl BitPacker {
    /// Create a new BitPacker with an output buffer of size specified. Call flush() to push
    /// the partial last byte out before taking the buffer.
    pub fn new(size: usize) -> Self {
        Self {
            output: Vec::with_capacity(size),
            last_bits: 0,
            queue: 0,
            q_bits: 0,
        }
    }

    /// Move every complete byte in the queue to the output buffer.
    fn write_stream(&mut self) {
        while self.q_bits > 7 {
            self.output.push(self.queue as u8);
            self.queue >>= 8;
            self.q_bits -= 8;
        }
    }

    /// Write the low `bits` bits of `data` (1-32 bits). Higher bits of `data` are masked out.
    pub fn out(&mut self, data: u32, bits: u8) {
        debug_assert!((1..=32).contains(&bits));
        let mask = u64::MAX >> (64 - bits as u32);
        self.queue |= (data as u64 & mask) << self.q_bits;
        self.q_bits += bits;
        self.write_stream();
    }

    /// Puts a whole byte on the stream.
    pub fn out8(&mut self, data: u8) {
        self.out(data as u32, 8);
    }

    /// Flushes the remaining bits (1-7) from the queue, padding the high bits of the last byte
    /// with zeros.
    pub fn flush(&mut self) {
        self.last_bits = self.q_bits % 8;
        if self.q_bits > 0 {
            self.q_bits += 8 - self.q_bits;
            self.write_stream();
            if self.q_bits > 0 {
                error!("Stuff left in the BitPacker queue.");
            }
        }
    }

    /// Flush and hand back the packed bytes.
    pub fn finish(mut self) -> Vec<u8> {
        self.flush();
        self.output
    }

    /// Debugging function to return the number of bytes.bits output so far
    pub fn loc(&self) -> String {
        let bits = self.output.len() * 8 + self.q_bits as usize;
        format!("[{}.{}]", bits / 8, bits % 8)
    }
}

#[cfg(test)]
mod test {
    use super::BitPacker;

    #[test]
    fn out8_test() {
        let mut bp = BitPacker::new(100);
        bp.out8(b'!');
        bp.out8(b' ');
        bp.flush();
        assert_eq!(bp.output, "! ".as_bytes());
    }

    #[test]
    fn lsb_first_test() {
        let mut bp = BitPacker::new(100);
        bp.out(0b1, 1);
        bp.out(0b10, 2);
        bp.out(0b11111, 5);
        assert_eq!(bp.output, [0b1111_1101]);
    }

    #[test]
    fn nine_bit_codes_test() {
        // 0x1ff then 0x001: low byte of the first code, then its top bit plus 7 bits of the next.
        let mut bp = BitPacker::new(100);
        bp.out(0x1ff, 9);
        bp.out(0x001, 9);
        bp.flush();
        assert_eq!(bp.output, [0xff, 0b0000_0011, 0b0000_0000]);
        assert_eq!(bp.last_bits, 2);
    }

    #[test]
    fn masks_high_bits_test() {
        let mut bp = BitPacker::new(100);
        bp.out(0xffff_ff0f, 4);
        bp.out(0, 4);
        assert_eq!(bp.output, [0x0f]);
    }

    #[test]
    fn out32_and_loc_test() {
        let mut bp = BitPacker::new(100);
        bp.out(0x2021_2021, 32);
        assert_eq!("[4.0]", &bp.loc());
        bp.out(0b101, 3);
        assert_eq!("[4.3]", &bp.loc());
        let out = bp.finish();
        assert_eq!(out, [0x21, 0x20, 0x21, 0x20, 0b101]);
    }

    #[test]
    fn empty_flush_test() {
        let bp = BitPacker::new(0);
        assert!(bp.finish().is_empty());
    }
}
