//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use std::fs;

use bwlzw::compression::compress::compress_file_with;
use bwlzw::compression::decompress::decompress_file_with;
use bwlzw::tools::cli::{cli_init, Mode};
use bwlzw::LzwbError;

use log::{error, info, warn, LevelFilter};
use simplelog::{Config, TermLogger, TerminalMode};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> Result<(), LzwbError> {
    // Available log levels are Error, Warn, Info, Debug, Trace. The -v flag narrows this down.
    let _ = TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    );

    let opts = match cli_init() {
        Ok(opts) => opts,
        Err(e) => {
            error!("{}", e);
            return Err(e);
        }
    };

    let mut failed = None;
    for file in &opts.files {
        let out = opts.output_for(file);
        if out.exists() && !opts.force_overwrite {
            warn!(
                "Skipping {}: {} already exists (use --force to overwrite).",
                file,
                out.display()
            );
            continue;
        }

        //----- Figure how what we need to do and go do it
        let result = match opts.op_mode {
            Mode::Zip => compress_file_with(file, &out, &opts.options),
            Mode::Unzip => decompress_file_with(file, &out, opts.options.threads),
        };

        match result {
            Ok(stats) => {
                info!(
                    "{} -> {}: {} blocks, ratio {:.3}.",
                    file,
                    out.display(),
                    stats.blocks,
                    stats.ratio()
                );
                if opts.remove_input_files {
                    fs::remove_file(file)?;
                }
            }
            Err(e) => {
                error!("{}: {}", file, e);
                failed = Some(e);
            }
        }
    }

    info!("Done.\n");
    match failed {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
