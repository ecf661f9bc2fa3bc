//! Suffix array construction by prefix doubling.
//!
//! Each round sorts suffixes by the pair (rank of the first k bytes, rank of the next k bytes),
//! then renumbers them. Both keys are sorted with stable counting passes, least significant key
//! first, so a round costs O(n + number of ranks) and the result never depends on how a
//! comparison sort orders equal keys.

/// Rank of a position past the end of the block. Real ranks start at 1, so the end of the block
/// sorts before every byte value, including 0x00.
const SENTINEL: u32 = 0;

/// Returns the start offsets of all suffixes of `data` in lexicographic order. A suffix that is a
/// prefix of another sorts first.
pub fn build_suffix_array(data: &[u8]) -> Vec<u32> {
    let n = data.len();
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![0];
    }
    debug_assert!(n < u32::MAX as usize);

    let mut sa: Vec<u32> = (0..n as u32).collect();
    let mut rank: Vec<u32> = data.iter().map(|&b| b as u32 + 1).collect();
    // Scratch for the order after the first (second key) pass, and for the next round's ranks
    let mut by_second = vec![0_u32; n];
    let mut next_rank = vec![0_u32; n];
    let mut max_rank = 256_u32;

    let mut k = 1;
    while k < n {
        counting_sort(&sa, &mut by_second, max_rank, |i| second_key(&rank, i, k));
        counting_sort(&by_second, &mut sa, max_rank, |i| rank[i]);

        // Equal pairs share a rank, each new pair gets the next one
        let mut r = 1;
        next_rank[sa[0] as usize] = r;
        for w in sa.windows(2) {
            let (prev, curr) = (w[0] as usize, w[1] as usize);
            if rank[prev] != rank[curr] || second_key(&rank, prev, k) != second_key(&rank, curr, k)
            {
                r += 1;
            }
            next_rank[curr] = r;
        }
        std::mem::swap(&mut rank, &mut next_rank);
        max_rank = r;

        // Every suffix has a distinct rank, so the order is final
        if r as usize == n {
            break;
        }
        k <<= 1;
    }
    sa
}

/// Rank of the suffix k positions further on, or SENTINEL if that runs off the block.
#[inline]
fn second_key(rank: &[u32], i: usize, k: usize) -> u32 {
    rank.get(i + k).copied().unwrap_or(SENTINEL)
}

/// Stable counting sort of the positions in `src` into `dst`, by keys in 0..=max_key.
fn counting_sort(src: &[u32], dst: &mut [u32], max_key: u32, key: impl Fn(usize) -> u32) {
    // starts[key + 1] counts first, then the prefix sum turns starts[key] into the first slot
    let mut starts = vec![0_usize; max_key as usize + 2];
    for &i in src {
        starts[key(i as usize) as usize + 1] += 1;
    }
    for b in 1..starts.len() {
        starts[b] += starts[b - 1];
    }
    for &i in src {
        let slot = &mut starts[key(i as usize) as usize];
        dst[*slot] = i;
        *slot += 1;
    }
}
