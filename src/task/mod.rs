mod error;

use crate::{hasher::AlgorithmSpec, Breaker, Hasher, Reader};
pub use error::{ErrorKind, FileError, E};
use std::{
    io::{self, Read},
    path::{Path, PathBuf},
    sync::Arc,
};

/// The default number of bytes read from a file at once (1 MB).
pub const DEFAULT_BLOCK_SIZE: usize = 1024 * 1024;

/// Outcome of hashing of one file.
pub type Outcome = Result<FileResult, FileError>;

/// Successful outcome of hashing of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileResult {
    pub path: PathBuf,
    /// Number of bytes read from the file.
    pub size: u64,
    /// Encoded digests in the order of requested algorithms: `(algorithm id, digest)`.
    pub digests: Vec<(String, String)>,
}

impl FileResult {
    /// Returns the digest calculated with the given algorithm.
    pub fn digest<S: AsRef<str>>(&self, id: S) -> Option<&str> {
        self.digests
            .iter()
            .find(|(alg, _)| alg == id.as_ref())
            .map(|(_, digest)| digest.as_str())
    }
}

/// Path of a file bound to a finished outcome.
pub fn outcome_path(outcome: &Outcome) -> &Path {
    match outcome {
        Ok(result) => &result.path,
        Err(err) => &err.path,
    }
}

/// `Task` represents the job of hashing one file with all requested algorithms. The file is read
/// only once: each block is given to every hasher before the next block is read. Memory used by
/// a task doesn't depend on the size of the file; it's one buffer of `block_size` plus the state
/// of the hashers.
#[derive(Debug, Clone)]
pub struct Task {
    path: PathBuf,
    algorithms: Arc<[AlgorithmSpec]>,
    block_size: usize,
}

impl Task {
    /// Creates a new task.
    ///
    /// # Parameters
    ///
    /// - `path`: The path to the file.
    /// - `algorithms`: Algorithms to hash the file with; shared between tasks of a session.
    /// - `block_size`: Number of bytes read at once; must be a positive number.
    pub fn new(path: PathBuf, algorithms: Arc<[AlgorithmSpec]>, block_size: usize) -> Self {
        Self {
            path,
            algorithms,
            block_size: block_size.max(1),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Hashes the file and consumes the task. Each call produces exactly one outcome.
    ///
    /// # Parameters
    ///
    /// - `breaker`: Checked before opening the file and before each block.
    ///
    /// # Returns
    ///
    /// - `Outcome`: Digests and the size of the file, or `FileError`.
    pub fn run<R: Reader>(self, breaker: &Breaker) -> Outcome {
        match self.digest::<R>(breaker) {
            Ok((size, digests)) => Ok(FileResult {
                path: self.path,
                size,
                digests,
            }),
            Err(err) => Err(FileError::new(self.path, err)),
        }
    }

    fn digest<R: Reader>(&self, breaker: &Breaker) -> Result<(u64, Vec<(String, String)>), E> {
        if breaker.is_aborted() {
            return Err(E::Cancelled);
        }
        let mut reader = R::bind(&self.path).map_err(E::OpenFailed)?;
        let mut hashers: Vec<Box<dyn Hasher>> =
            self.algorithms.iter().map(|spec| spec.hasher()).collect();
        let mut size: u64 = 0;
        let mut buffer = vec![0u8; self.block_size];
        loop {
            if breaker.is_aborted() {
                return Err(E::Cancelled);
            }
            let bytes_read = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(E::ReadFailed(err.into())),
            };
            let block = &buffer[..bytes_read];
            for hasher in hashers.iter_mut() {
                hasher.absorb(block)?;
            }
            size += bytes_read as u64;
        }
        let mut digests = Vec::with_capacity(hashers.len());
        for (spec, hasher) in self.algorithms.iter().zip(hashers.iter_mut()) {
            hasher.finish()?;
            digests.push((spec.id().to_owned(), hasher.encode()?));
        }
        Ok((size, digests))
    }
}
