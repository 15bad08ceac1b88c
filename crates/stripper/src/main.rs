//! Stripper CLI - remove embedded metadata from a directory of images.
//!
//! Every eligible image is decoded to pixels and re-encoded, so EXIF, ICC and
//! text metadata are dropped structurally. Work is spread over a fixed pool of
//! worker threads.
//!
//! # Usage
//!
//! ```bash
//! # Strip the top level of a directory
//! stripper --input ./photos --output ./clean
//!
//! # Recurse into subdirectories with 8 workers
//! stripper --input ./photos --output ./clean --recursive --threads 8
//!
//! # Legacy single-dash form
//! stripper -input ./photos -output ./clean -recursive=false -threads 2
//! ```

use clap::Parser;
use std::process::ExitCode;

mod cli;
mod logging;

#[cfg(test)]
#[path = "../../stripper-core/tests/common/mod.rs"]
mod fixtures;

/// Stripper - remove embedded metadata from images.
#[derive(Parser, Debug)]
#[command(name = "stripper")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(flatten)]
    strip: cli::strip::StripArgs,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse_from(cli::legacy::normalize_args(std::env::args_os()));

    // Logging isn't initialized yet, so config warnings go straight to stderr.
    let config = cli::strip::load_config(&cli.strip)?;
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Stripper v{}", stripper_core::VERSION);

    cli::strip::execute(cli.strip, config)
}
