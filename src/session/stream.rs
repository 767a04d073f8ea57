use super::E;
use crate::{task::Outcome, Breaker};
use log::error;
use std::{sync::mpsc::Receiver, thread::JoinHandle};

/// Lazy sequence of outcomes in order of completion. `Outcomes` is finite: it ends as soon as each
/// file of the session has been reported, and it cannot be restarted.
///
/// Dropping `Outcomes` before the end aborts the session: files in the queue aren't hashed.
pub struct Outcomes {
    rx: Receiver<Outcome>,
    remaining: usize,
    handle: Option<JoinHandle<Result<(), E>>>,
    breaker: Breaker,
}

impl Outcomes {
    pub(crate) fn new(
        rx: Receiver<Outcome>,
        expected: usize,
        handle: JoinHandle<Result<(), E>>,
        breaker: Breaker,
    ) -> Self {
        Self {
            rx,
            remaining: expected,
            handle: Some(handle),
            breaker,
        }
    }

    /// Number of outcomes which are still expected.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    fn join(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        match handle.join() {
            Ok(Ok(())) => {}
            Ok(Err(err)) => error!("Hashing session has been finished with error: {err}"),
            Err(err) => error!("Hashing session has been finished with panic: {err:?}"),
        }
    }
}

impl Iterator for Outcomes {
    type Item = Outcome;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            self.join();
            return None;
        }
        match self.rx.recv() {
            Ok(outcome) => {
                self.remaining -= 1;
                Some(outcome)
            }
            Err(_) => {
                error!(
                    "Hashing session is closed, but {} outcome(s) haven't been received",
                    self.remaining
                );
                self.remaining = 0;
                self.join();
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

impl Drop for Outcomes {
    fn drop(&mut self) {
        if self.remaining > 0 {
            self.breaker.abort();
        }
    }
}
