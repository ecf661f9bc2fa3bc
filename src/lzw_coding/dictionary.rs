//! LZW dictionaries.
//!
//! Both sides start with the 256 single-byte strings at codes 0-255 and append one entry per
//! step, in code order, until `2^code_size` entries exist. After that the dictionary is frozen.
//! Every multi-byte entry is stored as (prefix code, last byte), so the table is an append-only
//! array indexed by code and is never transmitted.

use rustc_hash::FxHashMap;

/// Number of single-byte roots.
pub const ROOTS: u32 = 256;

/// Encoder side: finds the code for "string of `prefix` followed by `byte`".
pub struct EncodeDictionary {
    children: FxHashMap<(u32, u8), u32>,
    next_code: u32,
    capacity: u32,
}

impl EncodeDictionary {
    pub fn new(code_size: u8) -> Self {
        let capacity = 1_u32 << code_size;
        let mut children = FxHashMap::default();
        children.reserve((capacity - ROOTS) as usize);
        Self {
            children,
            next_code: ROOTS,
            capacity,
        }
    }

    /// Code of the string `prefix` + `byte`, if it has been added.
    #[inline]
    pub fn find(&self, prefix: u32, byte: u8) -> Option<u32> {
        self.children.get(&(prefix, byte)).copied()
    }

    /// Append `prefix` + `byte` at the next code. Does nothing once the dictionary is full.
    #[inline]
    pub fn insert(&mut self, prefix: u32, byte: u8) {
        if self.next_code < self.capacity {
            self.children.insert((prefix, byte), self.next_code);
            self.next_code += 1;
        }
    }

    /// Number of codes in use, roots included.
    pub fn len(&self) -> u32 {
        self.next_code
    }

    pub fn is_full(&self) -> bool {
        self.next_code == self.capacity
    }
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    /// Code of the string without its last byte (unused for roots).
    prefix: u32,
    last: u8,
    first: u8,
    len: u32,
}

/// Decoder side: expands codes back into strings.
pub struct DecodeDictionary {
    entries: Vec<Entry>,
    capacity: u32,
}

impl DecodeDictionary {
    pub fn new(code_size: u8) -> Self {
        let capacity = 1_u32 << code_size;
        let mut entries = Vec::with_capacity(capacity as usize);
        entries.extend((0..ROOTS).map(|b| Entry {
            prefix: 0,
            last: b as u8,
            first: b as u8,
            len: 1,
        }));
        Self { entries, capacity }
    }

    /// The code the next insertion will receive.
    pub fn next_code(&self) -> u32 {
        self.entries.len() as u32
    }

    pub fn contains(&self, code: u32) -> bool {
        code < self.next_code()
    }

    /// First byte of the string for `code`. The code must be present.
    pub fn first(&self, code: u32) -> u8 {
        self.entries[code as usize].first
    }

    /// Append the string for `code` to `out`. The code must be present.
    pub fn expand(&self, code: u32, out: &mut Vec<u8>) {
        let entry = self.entries[code as usize];
        let start = out.len();
        out.resize(start + entry.len as usize, 0);
        // Walk the prefix chain, filling from the last byte back
        let mut code = code;
        for slot in out[start..].iter_mut().rev() {
            let e = &self.entries[code as usize];
            *slot = e.last;
            code = e.prefix;
        }
    }

    /// Append `prefix` + `byte` at the next code. Does nothing once the dictionary is full.
    pub fn insert(&mut self, prefix: u32, byte: u8) {
        if self.next_code() < self.capacity {
            let p = self.entries[prefix as usize];
            self.entries.push(Entry {
                prefix,
                last: byte,
                first: p.first,
                len: p.len + 1,
            });
        }
    }

    pub fn is_full(&self) -> bool {
        self.next_code() == self.capacity
    }
}
