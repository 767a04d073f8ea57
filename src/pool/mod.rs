mod worker;

use crate::{
    breaker::Breaker,
    session::{Aggregator, Tolerance},
    Reader,
};
use std::{
    slice::Iter,
    sync::{mpsc::Sender, Arc},
};
pub use worker::Worker;

/// Message for communication between workers and `Session` during hashing.
pub enum Action {
    /// Worker has stored an outcome and is ready for the next task.
    ///
    /// # Parameters
    /// - `usize`: Worker's ID.
    Processed(usize),

    /// Used by workers to notify `Session` about the closing of a worker's thread.
    ///
    /// # Parameters
    /// - `usize`: Worker's ID.
    WorkerShutdownNotification(usize),
}

/// Fixed set of hashing slots. Each slot is a `Worker` with its own thread, so no more than
/// `count` files are hashed at the same time.
pub struct Pool {
    workers: Vec<Worker>,
}

impl Pool {
    /// Creates a new `Pool` with the specified number of workers.
    ///
    /// # Parameters
    ///
    /// - `count`: The number of workers to create.
    /// - `tx_queue`: The sender channel used by workers to report to `Session`.
    /// - `aggregator`: Storage of outcomes shared between workers.
    /// - `tolerance`: Reaction of workers on per-file errors.
    /// - `breaker`: The breaker to handle interruptions.
    pub fn new<R: Reader + 'static>(
        count: usize,
        tx_queue: Sender<Action>,
        aggregator: &Arc<Aggregator>,
        tolerance: &Tolerance,
        breaker: &Breaker,
    ) -> Self {
        let mut workers: Vec<Worker> = Vec::new();
        for id in 0..count {
            workers.push(Worker::run::<R>(
                id,
                tx_queue.clone(),
                aggregator.clone(),
                tolerance.clone(),
                breaker.clone(),
            ));
        }
        Self { workers }
    }

    pub fn iter(&self) -> Iter<Worker> {
        self.workers.iter()
    }

    pub fn get(&self, id: usize) -> Option<&Worker> {
        self.workers.iter().find(|w| w.id() == id)
    }

    pub fn is_all_down(&self) -> bool {
        !self.workers.iter().any(|w| w.is_available())
    }

    pub fn shutdown(&mut self) -> &mut Self {
        for worker in self.workers.iter_mut() {
            worker.shutdown();
        }
        self
    }

    pub fn wait(&mut self) {
        for worker in self.workers.iter_mut() {
            worker.wait();
        }
    }
}
