//! The strip command: walk the input, strip every eligible image, report.

use anyhow::Context;
use clap::{Args, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use stripper_core::{BatchProcessor, BatchSummary, Config, FileDiscovery};

/// Arguments for a strip run.
#[derive(Args, Debug)]
pub struct StripArgs {
    /// Input directory containing photos
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output directory for cleaned photos (created if missing)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Process subdirectories recursively
    #[arg(
        short,
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub recursive: Option<bool>,

    /// Number of concurrent processing threads [default: 4]
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Config file (defaults to the platform config directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Also treat the JFIF APP0 marker as metadata during verification
    #[arg(long, conflicts_with = "no_verify")]
    pub strict_verify: bool,

    /// Skip the post-write header scan
    #[arg(long)]
    pub no_verify: bool,

    /// Delete the output file of a task that fails after writing it
    #[arg(long)]
    pub remove_failed: bool,

    /// Log every EXIF tag of each input before stripping it
    #[arg(long)]
    pub report_tags: bool,

    /// List the files that would be processed and exit
    #[arg(long)]
    pub dry_run: bool,

    /// Summary format printed to stdout
    #[arg(long, value_enum, default_value = "text")]
    pub summary: SummaryFormat,
}

/// Supported summary formats.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SummaryFormat {
    /// Human-readable counts
    Text,
    /// Single JSON object
    Json,
}

/// Load the config file named on the command line, or the default one.
///
/// An explicit path must exist and parse. A broken default file only warns.
/// Runs before logging is initialized, so warnings go to stderr directly.
pub fn load_config(args: &StripArgs) -> anyhow::Result<Config> {
    if let Some(path) = &args.config {
        let path = expand(path);
        return Config::load_from(&path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }
    match Config::load() {
        Ok(config) => Ok(config),
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Config path: {}",
                Config::default_path().display()
            );
            Ok(Config::default())
        }
    }
}

/// Execute a strip run.
///
/// Exits non-zero only when the directory walk itself failed. Per-file
/// failures are reported in the summary.
pub fn execute(args: StripArgs, mut config: Config) -> anyhow::Result<ExitCode> {
    apply_overrides(&args, &mut config);
    config.validate()?;

    let input = expand(&args.input);
    let output = expand(&args.output);

    if args.dry_run {
        let files = FileDiscovery::new(config.processing.clone()).discover(&input)?;
        for file in &files {
            println!("{}", file.display());
        }
        tracing::info!("{} file(s) would be processed", files.len());
        return Ok(ExitCode::SUCCESS);
    }

    std::fs::create_dir_all(&output)
        .with_context(|| format!("Error creating output directory {}", output.display()))?;

    tracing::info!(
        "Stripping {} -> {} ({} worker(s), recursive: {})",
        input.display(),
        output.display(),
        config.processing.parallel_workers,
        config.processing.recursive
    );

    let start = std::time::Instant::now();
    let summary = BatchProcessor::new(&config).run(&input, &output)?;
    tracing::debug!("Finished in {:?}", start.elapsed());

    print_summary(&summary, args.summary)?;

    if summary.traversal_error.is_some() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn apply_overrides(args: &StripArgs, config: &mut Config) {
    if let Some(threads) = args.threads {
        config.processing.parallel_workers = threads;
    }
    if let Some(recursive) = args.recursive {
        config.processing.recursive = recursive;
    }
    if args.strict_verify {
        config.verify.flag_jfif_marker = true;
    }
    if args.no_verify {
        config.verify.enabled = false;
    }
    if args.remove_failed {
        config.processing.remove_failed_output = true;
    }
    if args.report_tags {
        config.processing.report_tags = true;
    }
}

fn expand(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(&path_str).into_owned())
}

fn print_summary(summary: &BatchSummary, format: SummaryFormat) -> anyhow::Result<()> {
    match format {
        SummaryFormat::Json => println!("{}", serde_json::to_string_pretty(summary)?),
        SummaryFormat::Text => {
            if let Some(err) = &summary.traversal_error {
                println!("{}", err);
            }
            println!("\nProcessing complete:");
            println!("Processed: {} images", summary.processed);
            println!("Failed: {} images", summary.failed);
        }
    }
    Ok(())
}
