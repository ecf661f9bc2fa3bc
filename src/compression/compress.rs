use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use log::{debug, info};
use rayon::prelude::*;

use super::compress_block::compress_record;
use super::container::{BlockRecord, StreamHeader, HEADER_SIZE};
use crate::error::Result;
use crate::tools::options::Options;

/*
    Input is read one batch at a time, a batch being as many blocks as there are worker
    threads. Each block of a batch goes through compress_record on its own thread. The
    records come back from the indexed collect in block order and are written out before
    the next batch is read, so memory stays bounded by batch size no matter how big the
    input is.
*/

/// Totals for one compressed or decompressed stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreamStats {
    pub blocks: usize,
    pub bytes_in: u64,
    pub bytes_out: u64,
}

impl StreamStats {
    /// Output size as a fraction of input size.
    pub fn ratio(&self) -> f64 {
        if self.bytes_in == 0 {
            0.0
        } else {
            self.bytes_out as f64 / self.bytes_in as f64
        }
    }
}

/// Worker pool for block processing. 0 threads lets rayon pick.
pub(crate) fn build_pool(threads: usize) -> Result<rayon::ThreadPool> {
    Ok(rayon::ThreadPoolBuilder::new().num_threads(threads).build()?)
}

/// Compress everything `reader` yields into a container on `writer`.
pub fn compress_stream<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
    opts: &Options,
) -> Result<StreamStats> {
    opts.validate()?;
    let header = StreamHeader {
        code_size: opts.code_size,
        pipeline: opts.pipeline,
    };
    header.write_to(&mut writer)?;

    let pool = build_pool(opts.threads)?;
    let batch_size = pool.current_num_threads().max(1) * opts.block_size;
    info!(
        "Compressing with {}, {} bit codes, {} byte blocks, {} threads.",
        opts.pipeline,
        opts.code_size,
        opts.block_size,
        pool.current_num_threads()
    );

    let mut stats = StreamStats {
        blocks: 0,
        bytes_in: 0,
        bytes_out: HEADER_SIZE as u64,
    };
    let mut buf = Vec::new();
    loop {
        buf.clear();
        reader
            .by_ref()
            .take(batch_size as u64)
            .read_to_end(&mut buf)?;
        if buf.is_empty() {
            break;
        }

        let records = pool.install(|| {
            buf.par_chunks(opts.block_size)
                .map(|block| compress_record(block, opts.code_size, opts.pipeline))
                .collect::<Result<Vec<BlockRecord>>>()
        })?;

        for record in &records {
            stats.blocks += 1;
            stats.bytes_in += record.original_length as u64;
            stats.bytes_out += record.stored_len() as u64;
            debug!(
                "Wrote block {}: {} bytes, primary index {}, payload {} bytes.",
                stats.blocks,
                record.original_length,
                record.primary_index,
                record.payload.len()
            );
            record.write_to(&mut writer)?;
        }

        // A short batch means the input ran out
        if buf.len() < batch_size {
            break;
        }
    }
    writer.flush()?;
    Ok(stats)
}

/// Compress an in-memory buffer into a complete container.
pub fn compress(data: &[u8], opts: &Options) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(data.len() / 2 + HEADER_SIZE);
    compress_stream(data, &mut out, opts)?;
    Ok(out)
}

/// Compress `path_in` into `path_out` with the default options and the given code width.
pub fn compress_file<P: AsRef<Path>, Q: AsRef<Path>>(
    path_in: P,
    path_out: Q,
    code_size: u8,
) -> Result<()> {
    compress_file_with(path_in, path_out, &Options::new().code_size(code_size)).map(|_| ())
}

/// Compress `path_in` into `path_out`.
pub fn compress_file_with<P: AsRef<Path>, Q: AsRef<Path>>(
    path_in: P,
    path_out: Q,
    opts: &Options,
) -> Result<StreamStats> {
    let (path_in, path_out) = (path_in.as_ref(), path_out.as_ref());
    // Refuse bad settings before creating the output file
    opts.validate()?;
    let f_in = File::open(path_in)?;
    let f_out = BufWriter::new(File::create(path_out)?);

    let stats = compress_stream(f_in, f_out, opts)?;
    info!(
        "{}: {} bytes in {} blocks -> {} bytes, ratio {:.3}.",
        path_in.display(),
        stats.bytes_in,
        stats.blocks,
        stats.bytes_out,
        stats.ratio()
    );
    Ok(stats)
}
