use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Shutdown flag of a hashing session. After `abort()` queued files aren't dispatched anymore and
/// files being read are dropped at the next block; each of them gets a `Cancelled` outcome.
///
/// All clones share one flag: a clone taken with `Session::breaker()` stops the session it came
/// from, whichever thread calls it. The flag is never cleared.
#[derive(Default, Debug, Clone)]
pub struct Breaker {
    state: Arc<AtomicBool>,
}

impl Breaker {
    pub fn new() -> Self {
        Self {
            state: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_aborted(&self) -> bool {
        self.state.load(Ordering::SeqCst)
    }

    /// Stops the session; calling it again has no effect.
    pub fn abort(&self) {
        self.state.store(true, Ordering::SeqCst)
    }
}
