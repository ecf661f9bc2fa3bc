use log::{debug, trace};

use super::container::{BlockRecord, StreamHeader};
use crate::bwt_algorithms::bwt_sort::bwt_transform;
use crate::error::{LzwbError, Result};
use crate::lzw_coding::lzw::{check_code_size, lzw_compress};
use crate::tools::mtf::mtf_encode;
use crate::tools::options::Pipeline;

/// Everything needed to decode one compressed block besides its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockMetadata {
    /// Length of the block before compression. LZW decoding stops here.
    pub original_length: u32,
    /// BWT primary index.
    pub primary_index: u32,
    pub code_size: u8,
    pub pipeline: Pipeline,
}

impl BlockMetadata {
    /// Metadata for a record read from a container with the given header.
    pub fn from_record(record: &BlockRecord, header: &StreamHeader) -> Self {
        Self {
            original_length: record.original_length,
            primary_index: record.primary_index,
            code_size: header.code_size,
            pipeline: header.pipeline,
        }
    }
}

/// Compress one block: BWT, optional MTF, then LZW. Returns the LZW payload and the metadata
/// needed to undo it. Blocks share no state, so any number may run at once.
pub fn compress_block(
    data: &[u8],
    code_size: u8,
    pipeline: Pipeline,
) -> Result<(Vec<u8>, BlockMetadata)> {
    check_code_size(code_size)?;
    let original_length = u32::try_from(data.len()).map_err(|_| {
        LzwbError::config(format!("block of {} bytes is too large", data.len()))
    })?;

    let (bwt, primary_index) = bwt_transform(data);
    trace!("Block of {} bytes, primary index {}", data.len(), primary_index);

    let staged = match pipeline {
        Pipeline::Bwt => bwt,
        Pipeline::BwtMtf => mtf_encode(&bwt),
    };

    let payload = lzw_compress(&staged, code_size)?;
    debug!(
        "Block: {} bytes in, {} bytes of LZW codes ({})",
        data.len(),
        payload.len(),
        pipeline
    );

    Ok((
        payload,
        BlockMetadata {
            original_length,
            primary_index,
            code_size,
            pipeline,
        },
    ))
}

/// Compress one block straight into a container record.
pub fn compress_record(data: &[u8], code_size: u8, pipeline: Pipeline) -> Result<BlockRecord> {
    let (payload, meta) = compress_block(data, code_size, pipeline)?;
    Ok(BlockRecord {
        original_length: meta.original_length,
        primary_index: meta.primary_index,
        payload,
    })
}

#[cfg(test)]
mod test {
    use super::{compress_block, compress_record, BlockMetadata};
    use crate::compression::container::StreamHeader;
    use crate::compression::decompress::decompress_block;
    use crate::error::LzwbError;
    use crate::tools::options::Pipeline;
    use crate::tools::pseudo_random;

    #[test]
    fn metadata_test() {
        let (_, meta) = compress_block(b"banana", 12, Pipeline::Bwt).unwrap();
        assert_eq!(
            meta,
            BlockMetadata {
                original_length: 6,
                primary_index: 3,
                code_size: 12,
                pipeline: Pipeline::Bwt,
            }
        );
    }

    #[test]
    fn round_trip_test() {
        let inputs = [
            b"aaaa".to_vec(),
            b"banana".to_vec(),
            vec![0x00, 0xff, 0x00, 0xff, 0xff, 0x00],
            (0..=255).collect::<Vec<u8>>(),
            pseudo_random(30_000, 21),
            b"the quick brown fox jumps over the lazy dog ".repeat(300),
        ];
        for pipeline in [Pipeline::Bwt, Pipeline::BwtMtf] {
            for code_size in [9, 12, 16] {
                for data in &inputs {
                    let (payload, meta) = compress_block(data, code_size, pipeline).unwrap();
                    assert_eq!(&decompress_block(&payload, &meta).unwrap(), data);
                }
            }
        }
    }

    #[test]
    fn empty_block_test() {
        let (payload, meta) = compress_block(b"", 12, Pipeline::BwtMtf).unwrap();
        assert!(payload.is_empty());
        assert_eq!(meta.original_length, 0);
        assert!(decompress_block(&payload, &meta).unwrap().is_empty());
    }

    #[test]
    fn record_matches_block_test() {
        let rec = compress_record(b"mississippi", 10, Pipeline::BwtMtf).unwrap();
        let header = StreamHeader {
            code_size: 10,
            pipeline: Pipeline::BwtMtf,
        };
        let meta = BlockMetadata::from_record(&rec, &header);
        assert_eq!(decompress_block(&rec.payload, &meta).unwrap(), b"mississippi");
    }

    #[test]
    fn repetitive_input_shrinks_test() {
        let data = b"abcdefgh".repeat(4096);
        let (payload, _) = compress_block(&data, 12, Pipeline::BwtMtf).unwrap();
        assert!(payload.len() * 10 < data.len());
    }

    #[test]
    fn bad_code_size_test() {
        assert!(matches!(
            compress_block(b"abc", 20, Pipeline::Bwt),
            Err(LzwbError::Configuration(_))
        ));
    }
}
