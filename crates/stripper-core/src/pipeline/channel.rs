//! Zero-capacity handoff between the scanner and the worker pool.
//!
//! A send only completes once a worker has taken the task, so traversal can
//! never run more than one item ahead of consumption.

use crossbeam_channel::{Receiver, Sender};
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{PipelineError, PipelineResult};
use crate::types::{ProcessingResult, Task};

/// Create a rendezvous channel: every send blocks until a receive pairs with it.
pub fn handoff_channel<T>() -> (Sender<T>, Receiver<T>) {
    crossbeam_channel::bounded(0)
}

/// Producer side of the dispatch queue.
///
/// Counts every task it hands off in the shared tally. Dropping the
/// dispatcher (or calling [`Dispatcher::close`]) closes the queue, which is
/// the only signal workers get to stop.
pub struct Dispatcher {
    tasks: Sender<Task>,
    result: Arc<ProcessingResult>,
}

impl Dispatcher {
    /// Wrap the sending half of a handoff channel.
    pub fn new(tasks: Sender<Task>, result: Arc<ProcessingResult>) -> Self {
        Self { tasks, result }
    }

    /// Hand a path to the next free worker, blocking until one accepts it.
    pub fn dispatch(&self, path: PathBuf) -> PipelineResult<()> {
        self.tasks
            .send(Task::new(path))
            .map_err(|_| PipelineError::DispatchClosed)?;
        self.result.record_offered();
        Ok(())
    }

    /// Close the queue. Workers drain what they hold and exit.
    pub fn close(self) {
        drop(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_handoff_has_no_buffer() {
        let (tx, rx) = handoff_channel::<i32>();
        assert_eq!(tx.capacity(), Some(0));

        // Nobody is receiving, so a non-blocking send cannot complete.
        assert!(tx.try_send(1).is_err());

        let consumer = std::thread::spawn(move || rx.recv().unwrap());
        tx.send_timeout(42, Duration::from_secs(5)).unwrap();
        assert_eq!(consumer.join().unwrap(), 42);
    }

    #[test]
    fn test_dispatch_counts_handoffs() {
        let (tx, rx) = handoff_channel();
        let result = Arc::new(ProcessingResult::new());
        let dispatcher = Dispatcher::new(tx, Arc::clone(&result));

        let consumer = std::thread::spawn(move || rx.iter().count());
        dispatcher.dispatch(PathBuf::from("a.jpg")).unwrap();
        dispatcher.dispatch(PathBuf::from("b.png")).unwrap();
        dispatcher.close();

        assert_eq!(consumer.join().unwrap(), 2);
        assert_eq!(result.processed(), 2);
    }

    #[test]
    fn test_dispatch_without_workers_fails() {
        let (tx, rx) = handoff_channel();
        drop(rx);
        let result = Arc::new(ProcessingResult::new());
        let dispatcher = Dispatcher::new(tx, Arc::clone(&result));

        let err = dispatcher.dispatch(PathBuf::from("a.jpg")).unwrap_err();
        assert!(matches!(err, PipelineError::DispatchClosed));
        assert_eq!(result.processed(), 0);
    }
}
