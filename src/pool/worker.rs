use super::Action;

use crate::{
    breaker::Breaker,
    session::{Aggregator, Tolerance},
    task::{ErrorKind, Task},
    Reader,
};
use log::{debug, error, warn};
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{channel, Receiver, Sender},
        Arc,
    },
    thread::{self, JoinHandle},
};

type TaskChannel = (Sender<Task>, Receiver<Task>);

/// Reports the end of the worker's thread to `Session`. Being dropped on unwinding as well, it
/// guarantees that `Session` knows about a lost worker even if hashing panicked.
struct Farewell {
    id: usize,
    available: Arc<AtomicBool>,
    tx_queue: Sender<Action>,
}

impl Drop for Farewell {
    fn drop(&mut self) {
        self.available.store(false, Ordering::SeqCst);
        if self
            .tx_queue
            .send(Action::WorkerShutdownNotification(self.id))
            .is_err()
        {
            debug!("Hasher worker #{} is down; session is already closed", self.id);
        }
    }
}

/// `Worker` is one slot of the pool. It owns a thread which takes tasks one by one, hashes the file
/// of a task and puts the outcome into `Aggregator`. After each task the worker notifies `Session`
/// that it is free for the next one. The listener loop ends as soon as the task channel is closed
/// with `shutdown()`.
///
/// Error handling: `Worker` doesn't stop the listener loop on per-file errors. Failed files are
/// stored as outcomes like any others; depending on `Tolerance` the error is logged, or the
/// whole session is aborted with `Breaker`.
pub struct Worker {
    id: usize,
    tx_task: Option<Sender<Task>>,
    available: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    /// Runs a new `Worker` instance.
    ///
    /// # Parameters
    ///
    /// - `id`: Identifier of the worker inside of the pool.
    /// - `tx_queue`: The sender channel for notifying `Session`.
    /// - `aggregator`: Storage of outcomes.
    /// - `tolerance`: What to do on per-file errors.
    /// - `breaker`: The breaker to handle interruptions.
    pub fn run<R: Reader + 'static>(
        id: usize,
        tx_queue: Sender<Action>,
        aggregator: Arc<Aggregator>,
        tolerance: Tolerance,
        breaker: Breaker,
    ) -> Self {
        let (tx_task, rx_task): TaskChannel = channel();
        let available: Arc<AtomicBool> = Arc::new(AtomicBool::new(true));
        let farewell = Farewell {
            id,
            available: available.clone(),
            tx_queue: tx_queue.clone(),
        };
        let handle = thread::spawn(move || {
            let _farewell = farewell;
            while let Ok(task) = rx_task.recv() {
                let outcome = task.run::<R>(&breaker);
                if let Err(err) = &outcome {
                    match (err.kind(), &tolerance) {
                        (ErrorKind::Cancelled, _) => {
                            debug!("{err}");
                        }
                        (ErrorKind::InvalidState, _) => {
                            error!("{err}");
                        }
                        (_, Tolerance::StopOnErrors) => {
                            error!("{err}; session will be stopped");
                            breaker.abort();
                        }
                        (_, Tolerance::LogErrors) => {
                            warn!("{err}");
                        }
                        (_, Tolerance::DoNotLogErrors) => {}
                    }
                }
                if let Err(err) = aggregator.insert(outcome) {
                    error!("Hasher worker #{id} cannot store an outcome: {err}. Worker will be closed");
                    break;
                }
                if tx_queue.send(Action::Processed(id)).is_err() {
                    error!("Worker cannot communicate with session. Channel error. Worker will be closed");
                    break;
                }
            }
            debug!("Hasher worker #{id} has been shutdown");
        });
        Self {
            id,
            tx_task: Some(tx_task),
            available,
            handle: Some(handle),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Checks if the worker's thread is still alive and can take tasks.
    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    /// Delegates a task to the worker.
    ///
    /// # Returns
    ///
    /// - `Err(Task)` with the task back if the worker isn't able to accept it.
    pub fn delegate(&self, task: Task) -> Result<(), Task> {
        let Some(tx_task) = self.tx_task.as_ref() else {
            return Err(task);
        };
        if !self.is_available() {
            return Err(task);
        }
        tx_task.send(task).map_err(|err| err.0)
    }

    /// Closes the task channel; the worker exits from the listener loop once the current task is
    /// done. After that the `Worker` cannot be reused.
    pub fn shutdown(&mut self) {
        self.tx_task = None;
    }

    /// Waits for the worker's thread to be finished.
    pub fn wait(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("Hasher worker #{} has been finished with panic", self.id);
            }
        }
    }
}
