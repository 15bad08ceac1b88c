//! Pipeline orchestration - wires the scanner, dispatch queue and worker pool.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Config;
use crate::error::{PipelineResult, Result};
use crate::types::{BatchSummary, ProcessingResult, Task};

use super::channel::{handoff_channel, Dispatcher};
use super::discovery::FileDiscovery;
use super::metadata::{LoggingVisitor, MetadataExtractor};
use super::pool::{TaskHandler, WorkerPool};
use super::strip::Stripper;

/// Build the output path for `input`: `output_dir/<prefix><base name>`.
///
/// Directory structure is flattened, so two inputs with the same base name
/// map to the same output and the last writer wins.
pub fn output_path_for(output_dir: &Path, prefix: &str, input: &Path) -> PathBuf {
    let base = input.file_name().unwrap_or(input.as_os_str());
    let mut name = OsString::from(prefix);
    name.push(base);
    output_dir.join(name)
}

/// Task handler that strips each input into the output directory.
pub struct StripTaskHandler {
    stripper: Stripper,
    output_dir: PathBuf,
    prefix: String,
    report_tags: bool,
}

impl StripTaskHandler {
    /// Create a handler writing into `output_dir`.
    pub fn new(config: &Config, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            stripper: Stripper::new(config),
            output_dir: output_dir.into(),
            prefix: config.processing.output_prefix.clone(),
            report_tags: config.processing.report_tags,
        }
    }

    /// Where the clean copy of `input` is written.
    pub fn output_path(&self, input: &Path) -> PathBuf {
        output_path_for(&self.output_dir, &self.prefix, input)
    }
}

impl TaskHandler for StripTaskHandler {
    fn handle(&self, task: &Task) -> PipelineResult<()> {
        let input = task.path();
        tracing::info!("Processing: {}", input.display());

        if self.report_tags {
            match MetadataExtractor::walk(input, &mut LoggingVisitor::new(input)) {
                Ok(0) => tracing::debug!("No EXIF tags in {}", input.display()),
                Ok(count) => tracing::debug!("{} EXIF tag(s) in {}", count, input.display()),
                Err(e) => tracing::warn!("{}", e),
            }
        }

        self.stripper.strip(input, &self.output_path(input))
    }
}

/// Runs a whole batch: one scanner on the calling thread, N workers behind a
/// zero-capacity handoff.
pub struct BatchProcessor {
    config: Config,
    discovery: FileDiscovery,
}

impl BatchProcessor {
    /// Create a new batch processor with the given configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            discovery: FileDiscovery::new(config.processing.clone()),
        }
    }

    /// Strip every eligible file under `input` into `output_dir`.
    ///
    /// `output_dir` must already exist.
    pub fn run(&self, input: &Path, output_dir: &Path) -> Result<BatchSummary> {
        let handler = Arc::new(StripTaskHandler::new(&self.config, output_dir));
        self.run_with_handler(input, handler)
    }

    /// Run the scanner and pool with an arbitrary per-task handler.
    ///
    /// A traversal error does not abort the call: the queue is still closed,
    /// every worker is joined, and the error is reported in the summary.
    pub fn run_with_handler<H>(&self, input: &Path, handler: Arc<H>) -> Result<BatchSummary>
    where
        H: TaskHandler + ?Sized + 'static,
    {
        let workers = self.config.processing.parallel_workers;
        let result = Arc::new(ProcessingResult::new());
        let (tx, rx) = handoff_channel();

        let pool = WorkerPool::spawn(workers, handler, rx, Arc::clone(&result))?;
        tracing::debug!("Started {} worker(s)", pool.size());

        let dispatcher = Dispatcher::new(tx, Arc::clone(&result));
        let walked = self
            .discovery
            .walk(input, |path| dispatcher.dispatch(path));
        dispatcher.close();

        let per_worker = pool.join();

        let traversal_error = match walked {
            Ok(count) => {
                tracing::debug!("Traversal complete: {} file(s) dispatched", count);
                None
            }
            Err(e) => {
                tracing::error!("{}", e);
                Some(e.to_string())
            }
        };

        Ok(BatchSummary::from_result(&result, per_worker, traversal_error))
    }
}
