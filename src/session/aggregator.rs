use super::E;
use crate::task::Outcome;
use std::{
    mem,
    sync::{mpsc::Sender, Condvar, Mutex, MutexGuard},
};

#[derive(Default)]
struct State {
    received: usize,
    outcomes: Vec<Outcome>,
    stream: Option<Sender<Outcome>>,
    sealed: bool,
}

/// Collection of outcomes shared between workers. Each finished task inserts exactly one outcome;
/// the caller is blocked in `await_all()` until all expected outcomes are in.
///
/// In streaming mode outcomes aren't kept; each of them is forwarded to the consumer as soon as
/// it's inserted.
pub struct Aggregator {
    expected: usize,
    state: Mutex<State>,
    done: Condvar,
}

impl Aggregator {
    /// Creates an aggregator which keeps all outcomes until `await_all()`.
    pub fn new(expected: usize) -> Self {
        Self {
            expected,
            state: Mutex::new(State {
                outcomes: Vec::with_capacity(expected),
                ..Default::default()
            }),
            done: Condvar::new(),
        }
    }

    /// Creates an aggregator which forwards outcomes into the given channel.
    pub fn streaming(expected: usize, tx: Sender<Outcome>) -> Self {
        Self {
            expected,
            state: Mutex::new(State {
                stream: Some(tx),
                ..Default::default()
            }),
            done: Condvar::new(),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, E> {
        self.state
            .lock()
            .map_err(|err| E::PoisonError(err.to_string()))
    }

    /// Stores the outcome of one task.
    ///
    /// # Errors
    ///
    /// - `E::Overflow` if all expected outcomes were already received.
    pub fn insert(&self, outcome: Outcome) -> Result<(), E> {
        let mut guard = self.lock()?;
        let state = &mut *guard;
        if state.received >= self.expected {
            return Err(E::Overflow(self.expected));
        }
        state.received += 1;
        if let Some(tx) = state.stream.as_ref() {
            // Consumer might stop listening; the outcome is counted anyway
            let _ = tx.send(outcome);
        } else {
            state.outcomes.push(outcome);
        }
        if state.received == self.expected {
            state.stream = None;
            self.done.notify_all();
        }
        Ok(())
    }

    /// Marks that no more outcomes will be inserted. Wakes up waiting callers even if the
    /// collection is incomplete, and closes the stream.
    pub fn seal(&self) -> Result<(), E> {
        let mut state = self.lock()?;
        state.sealed = true;
        state.stream = None;
        self.done.notify_all();
        Ok(())
    }

    /// Number of outcomes inserted so far.
    #[cfg(test)]
    pub fn count(&self) -> Result<usize, E> {
        Ok(self.lock()?.received)
    }

    /// Blocks until all expected outcomes have been inserted and takes them.
    ///
    /// # Errors
    ///
    /// - `E::Incomplete` if the aggregator was sealed before all outcomes arrived.
    pub fn await_all(&self) -> Result<Vec<Outcome>, E> {
        let mut state = self.lock()?;
        while state.received < self.expected && !state.sealed {
            state = self
                .done
                .wait(state)
                .map_err(|err| E::PoisonError(err.to_string()))?;
        }
        if state.received < self.expected {
            return Err(E::Incomplete {
                expected: self.expected,
                received: state.received,
            });
        }
        Ok(mem::take(&mut state.outcomes))
    }
}
