use log::{error, info, trace};
use rayon::prelude::*;

use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use super::compress::{build_pool, StreamStats};
use super::compress_block::BlockMetadata;
use super::container::{BlockRecord, StreamHeader, HEADER_SIZE};
use crate::bwt_algorithms::bwt_sort::bwt_inverse;
use crate::error::{LzwbError, Result};
use crate::lzw_coding::lzw::lzw_decompress;
use crate::tools::mtf::mtf_decode;
use crate::tools::options::Pipeline;

/// Decompress one block: LZW to exactly `original_length` bytes, undo MTF if it was used, then
/// invert the BWT with the stored primary index.
pub fn decompress_block(payload: &[u8], meta: &BlockMetadata) -> Result<Vec<u8>> {
    let expected = meta.original_length as usize;
    let staged = lzw_decompress(payload, meta.code_size, expected)?;
    if staged.len() != expected {
        return Err(LzwbError::format(format!(
            "block decoded to {} bytes, expected {}",
            staged.len(),
            expected
        )));
    }

    let bwt = match meta.pipeline {
        Pipeline::Bwt => staged,
        Pipeline::BwtMtf => mtf_decode(&staged),
    };
    bwt_inverse(&bwt, meta.primary_index)
}

/// Decompress a whole container from `reader` into `writer`. Records are read in batches, each
/// batch is decoded in parallel, and blocks are written back in their original order.
pub fn decompress_stream<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
    threads: usize,
) -> Result<StreamStats> {
    let header = StreamHeader::read_from(&mut reader)?;
    info!(
        "Found a valid {} container, {} bit codes.",
        header.pipeline, header.code_size
    );

    let pool = build_pool(threads)?;
    let batch = pool.current_num_threads().max(1);
    let mut stats = StreamStats {
        blocks: 0,
        bytes_in: HEADER_SIZE as u64,
        bytes_out: 0,
    };

    let mut exhausted = false;
    while !exhausted {
        let mut records = Vec::with_capacity(batch);
        while records.len() < batch {
            match BlockRecord::read_from(&mut reader)? {
                Some(record) => records.push(record),
                None => {
                    exhausted = true;
                    break;
                }
            }
        }

        let blocks = pool.install(|| {
            records
                .par_iter()
                .map(|record| {
                    decompress_block(
                        &record.payload,
                        &BlockMetadata::from_record(record, &header),
                    )
                })
                .collect::<Result<Vec<Vec<u8>>>>()
        })?;

        for (record, block) in records.iter().zip(blocks.iter()) {
            stats.blocks += 1;
            stats.bytes_in += record.stored_len() as u64;
            stats.bytes_out += block.len() as u64;
            trace!(
                "Block {}: {} bytes from {} byte record",
                stats.blocks,
                block.len(),
                record.stored_len()
            );
            writer.write_all(block)?;
        }
    }
    writer.flush()?;
    Ok(stats)
}

/// Decompress an in-memory container.
pub fn decompress(container: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    decompress_stream(container, &mut out, 0)?;
    Ok(out)
}

/// Decompress the container at `path_in` into `path_out`.
pub fn decompress_file<P: AsRef<Path>, Q: AsRef<Path>>(path_in: P, path_out: Q) -> Result<()> {
    decompress_file_with(path_in, path_out, 0).map(|_| ())
}

/// Decompress a file using `threads` workers (0 lets rayon decide). A failed decode removes the
/// partial output file.
pub fn decompress_file_with<P: AsRef<Path>, Q: AsRef<Path>>(
    path_in: P,
    path_out: Q,
    threads: usize,
) -> Result<StreamStats> {
    let (path_in, path_out) = (path_in.as_ref(), path_out.as_ref());
    let f_in = BufReader::new(File::open(path_in)?);
    let f_out = BufWriter::new(File::create(path_out)?);

    match decompress_stream(f_in, f_out, threads) {
        Ok(stats) => {
            info!(
                "{}: {} blocks, {} bytes restored to {}.",
                path_in.display(),
                stats.blocks,
                stats.bytes_out,
                path_out.display()
            );
            Ok(stats)
        }
        Err(e) => {
            error!("Fatal error: {} could not be decompressed: {}", path_in.display(), e);
            // The container is unusable past the error, so do not leave half a file behind
            let _ = fs::remove_file(path_out);
            Err(e)
        }
    }
}

#[cfg(test)]
mod test {
    use super::{decompress, decompress_block};
    use crate::compression::compress::compress;
    use crate::compression::compress_block::compress_block;
    use crate::error::LzwbError;
    use crate::tools::options::{Options, Pipeline};
    use crate::tools::pseudo_random;

    #[test]
    fn wrong_length_test() {
        let (payload, mut meta) = compress_block(b"hello hello", 12, Pipeline::Bwt).unwrap();
        meta.original_length += 5;
        assert!(matches!(
            decompress_block(&payload, &meta),
            Err(LzwbError::Format(_))
        ));
    }

    #[test]
    fn bad_primary_index_test() {
        let (payload, mut meta) = compress_block(b"hello hello", 12, Pipeline::BwtMtf).unwrap();
        meta.primary_index = 11;
        assert!(matches!(
            decompress_block(&payload, &meta),
            Err(LzwbError::IndexOutOfRange { index: 11, len: 11 })
        ));
    }

    #[test]
    fn header_only_test() {
        assert!(decompress(b"LZWM\x0c").unwrap().is_empty());
        assert!(matches!(decompress(b"LZ"), Err(LzwbError::Format(_))));
    }

    #[test]
    fn truncated_container_test() {
        let data = pseudo_random(5000, 4);
        let packed = compress(&data, &Options::new().block_size(1000)).unwrap();
        assert!(matches!(
            decompress(&packed[..packed.len() - 1]),
            Err(LzwbError::Format(_))
        ));
    }

    #[test]
    fn multi_threaded_order_test() {
        let data = pseudo_random(40_000, 8);
        let opts = Options::new().block_size(1024).threads(4);
        let packed = compress(&data, &opts).unwrap();
        let mut out = Vec::new();
        super::decompress_stream(&packed[..], &mut out, 3).unwrap();
        assert_eq!(out, data);
    }
}
