use crate::hasher;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum E {
    #[error("No files to hash")]
    NoPaths,
    #[error("Number of threads should be 1 or more; given: {0}")]
    InvalidThreads(usize),
    #[error("Block size should be a positive number of bytes")]
    InvalidBlockSize,
    #[error("Path {0} is listed more than once")]
    DuplicatePath(PathBuf),
    #[error("Algorithm {0} is listed more than once")]
    DuplicateAlgorithm(String),
    #[error("{0}")]
    Hasher(#[from] hasher::E),
    #[error("Fail to get access to data between threads: {0}")]
    PoisonError(String),
    #[error("Fail get feedback from hashing thread: {0}")]
    JoinError(String),
    #[error("Not all files have been reported: expected {expected}; received {received}")]
    Incomplete { expected: usize, received: usize },
    #[error("More outcomes than files ({0})")]
    Overflow(usize),
    #[error("Internal error on {0}: {1}")]
    InvalidState(PathBuf, String),
}

impl E {
    /// Errors caused by invalid parameters of a session; such errors are reported before any
    /// file has been touched.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            E::NoPaths
                | E::InvalidThreads(..)
                | E::InvalidBlockSize
                | E::DuplicatePath(..)
                | E::DuplicateAlgorithm(..)
                | E::Hasher(hasher::E::UnknownAlgorithm(..))
        )
    }
}
