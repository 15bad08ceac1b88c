//! Fixed pool of worker threads consuming tasks from the dispatch queue.

use crossbeam_channel::Receiver;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::error::PipelineResult;
use crate::types::{ProcessingResult, Task};

/// Work performed by a pool worker for each task it receives.
pub trait TaskHandler: Send + Sync {
    /// Process one task. Errors are logged and counted, never retried.
    fn handle(&self, task: &Task) -> PipelineResult<()>;
}

impl<F> TaskHandler for F
where
    F: Fn(&Task) -> PipelineResult<()> + Send + Sync,
{
    fn handle(&self, task: &Task) -> PipelineResult<()> {
        self(task)
    }
}

/// N independent worker threads sharing one task receiver.
///
/// Each worker loops until the queue is both empty and closed. A failing task
/// never stops its worker.
pub struct WorkerPool {
    workers: Vec<JoinHandle<usize>>,
}

impl WorkerPool {
    /// Spawn `count` workers. They block on `tasks` until work arrives.
    pub fn spawn<H>(
        count: usize,
        handler: Arc<H>,
        tasks: Receiver<Task>,
        result: Arc<ProcessingResult>,
    ) -> std::io::Result<Self>
    where
        H: TaskHandler + ?Sized + 'static,
    {
        let mut workers = Vec::with_capacity(count);
        for id in 0..count {
            let handler = Arc::clone(&handler);
            let tasks = tasks.clone();
            let result = Arc::clone(&result);
            let worker = thread::Builder::new()
                .name(format!("strip-worker-{id}"))
                .spawn(move || run_worker(id, &*handler, &tasks, &result))?;
            workers.push(worker);
        }
        Ok(Self { workers })
    }

    /// Number of workers in the pool.
    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Wait for every worker to exit and return how many tasks each received.
    ///
    /// Only returns once all workers are gone, so the queue must already be
    /// closed or this blocks forever.
    pub fn join(self) -> Vec<usize> {
        self.workers
            .into_iter()
            .enumerate()
            .map(|(id, worker)| match worker.join() {
                Ok(handled) => handled,
                Err(_) => {
                    tracing::error!(worker = id, "Worker panicked");
                    0
                }
            })
            .collect()
    }
}

fn run_worker<H>(id: usize, handler: &H, tasks: &Receiver<Task>, result: &ProcessingResult) -> usize
where
    H: TaskHandler + ?Sized,
{
    tracing::debug!(worker = id, "Worker started");
    let mut handled = 0;

    for task in tasks.iter() {
        handled += 1;
        if let Err(e) = handler.handle(&task) {
            tracing::error!("Error processing {}: {}", task.path().display(), e);
            result.record_failure(task.path(), &e);
        }
    }

    tracing::debug!(worker = id, handled, "Worker finished");
    handled
}
