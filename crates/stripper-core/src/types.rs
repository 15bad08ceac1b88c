//! Core data types shared across the stripping pipeline.
//!
//! `Task` is what the scanner hands to the worker pool. `ProcessingResult` is
//! the shared tally both sides write into, and `BatchSummary` is the frozen
//! snapshot reported once every worker has joined.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// A single file believed to be an image, consumed by exactly one worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    path: PathBuf,
}

impl Task {
    /// Create a task for the given input path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the input file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A task that failed, with its error rendered for reporting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FailedFile {
    /// Input path of the failed task
    pub path: PathBuf,

    /// Rendered error message
    pub error: String,
}

/// Running tally shared by the scanner and the workers.
///
/// `processed` counts tasks *offered* to the pool (incremented on handoff),
/// not tasks that finished cleanly. `failed` counts tasks whose strip
/// returned an error.
#[derive(Debug, Default)]
pub struct ProcessingResult {
    processed: AtomicU64,
    failed: AtomicU64,
    failures: Mutex<Vec<FailedFile>>,
}

impl ProcessingResult {
    /// Create an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a task was handed to a worker.
    pub fn record_offered(&self) {
        self.processed.fetch_add(1, Ordering::SeqCst);
    }

    /// Record a failed task.
    pub fn record_failure(&self, path: &Path, error: &impl std::fmt::Display) {
        self.failed.fetch_add(1, Ordering::SeqCst);
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(FailedFile {
                path: path.to_path_buf(),
                error: error.to_string(),
            });
    }

    /// Number of tasks offered so far.
    pub fn processed(&self) -> u64 {
        self.processed.load(Ordering::SeqCst)
    }

    /// Number of tasks that failed so far.
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::SeqCst)
    }

    /// Snapshot of the failures recorded so far.
    pub fn failures(&self) -> Vec<FailedFile> {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Final report for a batch run, produced after all workers have joined.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Tasks handed to the pool
    pub processed: u64,

    /// Tasks whose strip failed
    pub failed: u64,

    /// Tasks received by each worker, indexed by worker id
    pub per_worker: Vec<usize>,

    /// Per-file failures in completion order
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub failures: Vec<FailedFile>,

    /// Set when the directory walk itself aborted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traversal_error: Option<String>,
}

impl BatchSummary {
    /// Freeze a tally into a summary.
    pub fn from_result(
        result: &ProcessingResult,
        per_worker: Vec<usize>,
        traversal_error: Option<String>,
    ) -> Self {
        Self {
            processed: result.processed(),
            failed: result.failed(),
            per_worker,
            failures: result.failures(),
            traversal_error,
        }
    }

    /// Tasks that were offered and did not fail.
    pub fn succeeded(&self) -> u64 {
        self.processed.saturating_sub(self.failed)
    }

    /// Total tasks received across all workers.
    pub fn handled(&self) -> usize {
        self.per_worker.iter().sum()
    }
}
