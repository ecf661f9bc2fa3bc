use rayon::prelude::*;

/// Chunk size used when counting in parallel.
const CHUNK: usize = 16_000;

/// Returns a frequency count of every byte value in the input. Uses parallelism when the data
/// set is over 64k.
pub fn freqs(data: &[u8]) -> [u32; 256] {
    if data.len() > 64_000 {
        data.par_chunks(CHUNK)
            .fold(
                || [0_u32; 256],
                |mut freqs, chunk| {
                    chunk.iter().for_each(|&el| freqs[el as usize] += 1);
                    freqs
                },
            )
            .reduce(
                || [0_u32; 256],
                |mut s, f| {
                    s.iter_mut().zip(f.iter()).for_each(|(a, b)| *a += b);
                    s
                },
            )
    } else {
        let mut freqs = [0_u32; 256];
        data.iter().for_each(|&el| freqs[el as usize] += 1);
        freqs
    }
}

/// Exclusive prefix sums of a frequency table, starting from `base`. Entry `b` is the number
/// of symbols (plus `base`) that sort before byte value `b`.
pub fn starts(freqs: &[u32; 256], base: u32) -> [u32; 256] {
    let mut starts = [0_u32; 256];
    let mut total = base;
    for (start, &count) in starts.iter_mut().zip(freqs.iter()) {
        *start = total;
        total += count;
    }
    starts
}
