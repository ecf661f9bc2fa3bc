use crate::error::{LzwbError, Result};

/// Move To Front coder. Holds the recency list of all 256 byte values; index 0 is the most
/// recently used. Encoder and decoder must start from the same list.
#[derive(Clone, Debug)]
pub struct MoveToFront {
    index: [u8; 256],
}

impl MoveToFront {
    /// Start from the natural order 0, 1, ... 255.
    pub fn new() -> Self {
        let mut index = [0_u8; 256];
        index
            .iter_mut()
            .enumerate()
            .for_each(|(i, slot)| *slot = i as u8);
        Self { index }
    }

    /// Start from a custom order shared by both sides of the stream. The order must contain
    /// every byte value exactly once.
    pub fn with_order(order: &[u8]) -> Result<Self> {
        let mut seen = [false; 256];
        for &b in order {
            if seen[b as usize] {
                return Err(LzwbError::config(format!(
                    "MTF order repeats byte value {}",
                    b
                )));
            }
            seen[b as usize] = true;
        }
        if order.len() != 256 {
            return Err(LzwbError::config(format!(
                "MTF order has {} entries, needs all 256 byte values",
                order.len()
            )));
        }
        let mut index = [0_u8; 256];
        index.copy_from_slice(order);
        Ok(Self { index })
    }

    /// Current recency list, front first.
    pub fn order(&self) -> &[u8; 256] {
        &self.index
    }

    /// Shift every entry in front of `idx` back one slot and put `sym` at the front.
    #[inline]
    fn promote(&mut self, idx: usize, sym: u8) {
        self.index.copy_within(0..idx, 1);
        self.index[0] = sym;
    }

    /// Replace each byte with its position in the recency list, then move it to the front.
    pub fn encode(&mut self, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(data.len());
        for &byte in data {
            // Every byte value is always in the list
            let idx = self
                .index
                .iter()
                .position(|&c| c == byte)
                .unwrap_or_default();
            out.push(idx as u8);
            self.promote(idx, byte);
        }
        out
    }

    /// Replace each rank with the byte at that position in the recency list, then move the
    /// byte to the front.
    pub fn decode(&mut self, ranks: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(ranks.len());
        for &rank in ranks {
            let idx = rank as usize;
            let sym = self.index[idx];
            out.push(sym);
            self.promote(idx, sym);
        }
        out
    }
}

impl Default for MoveToFront {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode data using Move To Front transform from the natural byte order.
pub fn mtf_encode(data: &[u8]) -> Vec<u8> {
    MoveToFront::new().encode(data)
}

/// Decode Move To Front ranks produced by [`mtf_encode`].
pub fn mtf_decode(ranks: &[u8]) -> Vec<u8> {
    MoveToFront::new().decode(ranks)
}

#[cfg(test)]
mod test {
    use super::{mtf_decode, mtf_encode, MoveToFront};
    use crate::tools::pseudo_random;

    #[test]
    fn known_ranks_test() {
        // b=98 first, then a=97 (shifted to 98 since b moved in front of it), ...
        assert_eq!(mtf_encode(b"bananaaa"), vec![98, 98, 110, 1, 1, 1, 0, 0]);
    }

    #[test]
    fn runs_become_zeros_test() {
        let ranks = mtf_encode(&[7, 7, 7, 7, 0, 0, 0]);
        assert_eq!(ranks, vec![7, 0, 0, 0, 1, 0, 0]);
    }

    #[test]
    fn round_trip_test() {
        for data in [
            b"".to_vec(),
            b"x".to_vec(),
            (0..=255).collect::<Vec<u8>>(),
            (0..=255).rev().collect::<Vec<u8>>(),
            vec![0xff; 300],
            pseudo_random(10_000, 3),
        ] {
            assert_eq!(mtf_decode(&mtf_encode(&data)), data);
        }
    }

    #[test]
    fn input_is_not_modified_test() {
        let data = b"abracadabra".to_vec();
        let copy = data.clone();
        let ranks = mtf_encode(&data);
        assert_eq!(data, copy);
        assert_eq!(mtf_decode(&ranks), copy);
    }

    #[test]
    fn custom_order_test() {
        let order: Vec<u8> = (0..=255).rev().collect();
        let mut enc = MoveToFront::with_order(&order).unwrap();
        let ranks = enc.encode(b"\xff\xff\x00");
        assert_eq!(ranks, vec![0, 0, 255]);
        assert_eq!(enc.order()[0], 0x00);
        let mut dec = MoveToFront::with_order(&order).unwrap();
        assert_eq!(dec.decode(&ranks), b"\xff\xff\x00");
    }

    #[test]
    fn bad_order_test() {
        assert!(MoveToFront::with_order(&[1, 2, 3]).is_err());
        let mut dup: Vec<u8> = (0..=255).collect();
        dup[10] = 11;
        assert!(MoveToFront::with_order(&dup).is_err());
    }
}
