mod aggregator;
mod error;
pub(crate) mod options;
mod result;
mod stream;

use crate::{
    hasher::{Algorithm, AlgorithmSpec},
    pool::{Action, Pool},
    task::{ErrorKind, FileError, Task, E as TaskError},
    Breaker, Reader,
};
pub(crate) use aggregator::Aggregator;
pub use error::E;
use log::{debug, error};
pub use options::{Options, Tolerance, DEFAULT_THREADS};
pub use result::BatchResult;
use std::{
    collections::{HashMap, VecDeque},
    path::PathBuf,
    sync::{mpsc::channel, Arc},
    thread::{self, JoinHandle},
    time::Instant,
};
pub use stream::Outcomes;

/// `Session` hashes a batch of files with a set of algorithms. Each file is read only once,
/// whatever number of algorithms is requested; up to `threads` files are hashed at the same time.
///
/// Each file of the session gets exactly one outcome: digests and size, or an error. A failure
/// of one file never affects other files. Results can be taken in two ways:
/// - `hash()` blocks until all files are done and returns `BatchResult`;
/// - `stream()` returns immediately a lazy sequence of outcomes in order of completion.
///
/// Hashing is an interruptible operation. To interrupt, get a `Breaker` by calling the
/// `breaker()` method and call `abort()` on it. Files in the queue aren't hashed anymore and files
/// being read are interrupted at the next block; all of them are reported as cancelled. Once
/// aborted, a session remains aborted; create a new one to hash again.
///
/// # Example
///
/// ```
/// use multihasher::{reader::buffering::Buffering, Options};
///
/// let mut opt = Options::new();
/// opt.paths(["Cargo.toml"]).unwrap().algorithms(["md5", "sha1"]).unwrap();
/// let results = opt.session().unwrap().hash::<Buffering>().unwrap();
/// for (path, outcome) in results.iter() {
///     println!("{}: {outcome:?}", path.display());
/// }
/// ```
#[derive(Debug)]
pub struct Session {
    /// Validated settings.
    opt: Options,

    /// Algorithms given to each task; `Algorithm::DEFAULTS` if nothing was requested.
    algorithms: Arc<[AlgorithmSpec]>,

    /// `Breaker` for shutting down the session.
    breaker: Breaker,
}

impl Session {
    pub(crate) fn new(opt: Options) -> Self {
        let algorithms: Arc<[AlgorithmSpec]> = if opt.algorithms.is_empty() {
            Algorithm::DEFAULTS.iter().map(|a| a.spec()).collect()
        } else {
            opt.algorithms.iter().cloned().collect()
        };
        Self {
            opt,
            algorithms,
            breaker: Breaker::new(),
        }
    }

    /// Number of files in the session.
    pub fn count(&self) -> usize {
        self.opt.paths.len()
    }

    /// Identifiers of algorithms in the order digests are reported.
    pub fn algorithms(&self) -> Vec<&str> {
        self.algorithms.iter().map(|a| a.id()).collect()
    }

    /// Returns a `Breaker` which can be used to shut down hashing.
    pub fn breaker(&self) -> Breaker {
        self.breaker.clone()
    }

    /// Hashes all files and returns outcomes keyed by path.
    ///
    /// # Errors
    ///
    /// Per-file problems don't cause an error; they are stored in the file's outcome. An error is
    /// returned only on an internal failure: a hasher in invalid state, a lost worker or broken
    /// synchronization.
    pub fn hash<R: Reader + 'static>(&self) -> Result<BatchResult, E> {
        let now = Instant::now();
        let aggregator = Arc::new(Aggregator::new(self.count()));
        let handle = self.spawn::<R>(aggregator.clone());
        let outcomes = aggregator.await_all();
        handle
            .join()
            .map_err(|e| E::JoinError(format!("{e:?}")))??;
        let outcomes = outcomes?;
        if let Some(Err(err)) = outcomes
            .iter()
            .find(|o| matches!(o, Err(err) if err.kind() == ErrorKind::InvalidState))
        {
            return Err(E::InvalidState(err.path.clone(), err.err.to_string()));
        }
        debug!(
            "hashing of {} files in {}µs / {}ms / {}s",
            outcomes.len(),
            now.elapsed().as_micros(),
            now.elapsed().as_millis(),
            now.elapsed().as_secs()
        );
        Ok(BatchResult::new(self.opt.paths.clone(), outcomes))
    }

    /// Starts hashing and returns outcomes as soon as they are ready. Internal failures (which
    /// `hash()` returns as an error) are yielded as outcomes with `ErrorKind::InvalidState`.
    pub fn stream<R: Reader + 'static>(&self) -> Outcomes {
        let (tx, rx) = channel();
        let aggregator = Arc::new(Aggregator::streaming(self.count(), tx));
        let handle = self.spawn::<R>(aggregator);
        Outcomes::new(rx, self.count(), handle, self.breaker.clone())
    }

    fn spawn<R: Reader + 'static>(&self, aggregator: Arc<Aggregator>) -> JoinHandle<Result<(), E>> {
        let mut queue: VecDeque<Task> = self
            .opt
            .paths
            .iter()
            .map(|path| {
                Task::new(
                    path.clone(),
                    self.algorithms.clone(),
                    self.opt.block_size,
                )
            })
            .collect();
        let slots = self.opt.threads.min(queue.len());
        let tolerance = self.opt.tolerance.clone();
        let breaker = self.breaker.clone();
        thread::spawn(move || {
            let result = dispatch::<R>(&mut queue, slots, &aggregator, &tolerance, &breaker);
            if !queue.is_empty() {
                error!("{} file(s) haven't been dispatched", queue.len());
            }
            let sealed = aggregator.seal();
            result.and(sealed)
        })
    }
}

/// Gives queued tasks to free workers one by one (FIFO) until each task is done.
fn dispatch<R: Reader + 'static>(
    queue: &mut VecDeque<Task>,
    slots: usize,
    aggregator: &Arc<Aggregator>,
    tolerance: &Tolerance,
    breaker: &Breaker,
) -> Result<(), E> {
    let (tx_queue, rx_queue) = channel::<Action>();
    let mut pool = Pool::new::<R>(slots, tx_queue, aggregator, tolerance, breaker);
    debug!("Created pool with {slots} workers for hashing");
    // Worker's ID => path of the file being hashed
    let mut active: HashMap<usize, PathBuf> = HashMap::new();
    let result: Result<(), E> = 'outer: loop {
        if breaker.is_aborted() {
            while let Some(task) = queue.pop_front() {
                let path = task.path().to_path_buf();
                if let Err(err) = aggregator.insert(Err(FileError::new(path, TaskError::Cancelled)))
                {
                    break 'outer Err(err);
                }
            }
        }
        let free: Vec<usize> = pool
            .iter()
            .filter(|w| w.is_available() && !active.contains_key(&w.id()))
            .map(|w| w.id())
            .collect();
        for id in free {
            let Some(worker) = pool.get(id) else {
                continue;
            };
            let Some(task) = queue.pop_front() else {
                break;
            };
            let path = task.path().to_path_buf();
            match worker.delegate(task) {
                Ok(()) => {
                    active.insert(id, path);
                }
                Err(task) => queue.push_front(task),
            }
        }
        if active.is_empty() {
            if queue.is_empty() {
                break 'outer Ok(());
            }
            if pool.is_all_down() {
                error!("All hasher workers are down; {} file(s) left", queue.len());
                while let Some(task) = queue.pop_front() {
                    let path = task.path().to_path_buf();
                    if let Err(err) =
                        aggregator.insert(Err(FileError::new(path, TaskError::WorkerDown)))
                    {
                        break 'outer Err(err);
                    }
                }
                break 'outer Ok(());
            }
        }
        let Ok(action) = rx_queue.recv() else {
            error!("Hasher workers are unreachable; {} file(s) in progress", active.len());
            for (_, path) in active.drain() {
                if let Err(err) = aggregator.insert(Err(FileError::new(path, TaskError::WorkerDown)))
                {
                    break 'outer Err(err);
                }
            }
            continue;
        };
        match action {
            Action::Processed(id) => {
                active.remove(&id);
            }
            Action::WorkerShutdownNotification(id) => {
                if let Some(path) = active.remove(&id) {
                    error!("Hasher worker #{id} is down while hashing {}", path.display());
                    if let Err(err) =
                        aggregator.insert(Err(FileError::new(path, TaskError::WorkerDown)))
                    {
                        break 'outer Err(err);
                    }
                }
            }
        }
    };
    pool.shutdown().wait();
    result
}
