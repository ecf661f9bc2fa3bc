use std::path::{Path, PathBuf};
use std::{fmt::Display, fmt::Formatter};

use clap::Parser;
use log::{info, warn};

use super::options::{Options, Pipeline};
use crate::error::{LzwbError, Result};

/// Extension added to compressed files.
pub const EXTENSION: &str = "lzwb";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Zip, Unzip
pub enum Mode {
    Zip,
    Unzip,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "A block-sorting LZW file compressor",
    long_about = "
    Each block of the input is run through a Burrows-Wheeler transform, an optional
    Move-To-Front pass and an LZW coder with a fixed code width. Blocks are handled in
    parallel and written to a self-describing container (.lzwb)."
)]
pub struct Args {
    /// Files to process
    #[clap(required = true)]
    files: Vec<String>,

    /// Compress the input files (default)
    #[clap(short = 'z', long = "compress")]
    compress: bool,

    /// Decompress the input files
    #[clap(short = 'd', long = "decompress", conflicts_with = "compress")]
    decompress: bool,

    /// Bits per LZW code, 9-16
    #[clap(short = 'c', long = "code-size", default_value_t = 12)]
    code_size: u8,

    /// Block size in KiB
    #[clap(short = 'b', long = "block-size", default_value_t = 512)]
    block_kib: usize,

    /// Skip the Move-To-Front stage
    #[clap(long = "no-mtf")]
    no_mtf: bool,

    /// Worker threads, 0 for one per core
    #[clap(short = 'j', long = "threads", default_value_t = 0)]
    threads: usize,

    /// Output file (only with a single input file)
    #[clap(short = 'o', long = "output")]
    output: Option<String>,

    /// Overwrite existing output files
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Remove input files after success
    #[clap(long = "remove")]
    remove: bool,

    /// Sets verbosity. 0 is silent, 5 is chatty
    #[clap(short = 'v', default_value_t = 2)]
    v: u8,
}

/// Settings for one run of the binary.
#[derive(Debug)]
pub struct CliOpts {
    pub op_mode: Mode,
    pub files: Vec<String>,
    pub output: Option<String>,
    pub force_overwrite: bool,
    pub remove_input_files: bool,
    pub options: Options,
}

impl CliOpts {
    /// Output path for `file`: the -o name, `<file>.lzwb` when compressing, and `<file>`
    /// without `.lzwb` (or `<file>.out`) when decompressing.
    pub fn output_for(&self, file: &str) -> PathBuf {
        if let Some(out) = &self.output {
            return PathBuf::from(out);
        }
        match self.op_mode {
            Mode::Zip => PathBuf::from(format!("{}.{}", file, EXTENSION)),
            Mode::Unzip => {
                let path = Path::new(file);
                match path.extension() {
                    Some(ext) if ext == EXTENSION => path.with_extension(""),
                    _ => PathBuf::from(format!("{}.out", file)),
                }
            }
        }
    }
}

/// Parse the command line, set the log level and validate the settings.
pub fn cli_init() -> Result<CliOpts> {
    from_args(Args::parse())
}

fn from_args(args: Args) -> Result<CliOpts> {
    // Set the log level
    match args.v {
        0 => log::set_max_level(log::LevelFilter::Off),
        1 => log::set_max_level(log::LevelFilter::Error),
        2 => log::set_max_level(log::LevelFilter::Warn),
        3 => log::set_max_level(log::LevelFilter::Info),
        4 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    };

    if args.output.is_some() && args.files.len() > 1 {
        return Err(LzwbError::config("--output needs exactly one input file"));
    }

    let options = Options::new()
        .code_size(args.code_size)
        .block_size(args.block_kib.saturating_mul(1024))
        .pipeline(if args.no_mtf {
            Pipeline::Bwt
        } else {
            Pipeline::BwtMtf
        })
        .threads(args.threads);
    options.validate()?;

    let op_mode = if args.decompress { Mode::Unzip } else { Mode::Zip };

    // Below we report initialization status to the user
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", op_mode);
    if op_mode == Mode::Zip {
        info!(
            "{}, {} bit codes, {} KiB blocks",
            options.pipeline, options.code_size, args.block_kib
        );
    } else if args.no_mtf || args.code_size != 12 {
        warn!("Pipeline and code size are read from the container when decompressing");
    }

    Ok(CliOpts {
        op_mode,
        files: args.files,
        output: args.output,
        force_overwrite: args.force,
        remove_input_files: args.remove,
        options,
    })
}
