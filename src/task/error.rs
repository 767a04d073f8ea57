use crate::{hasher, reader};
use std::{fmt, path::PathBuf};
use thiserror::Error;

/// Class of a per-file failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    OpenFailed,
    ReadFailed,
    Cancelled,
    InvalidState,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::OpenFailed => "open failed",
                Self::ReadFailed => "read failed",
                Self::Cancelled => "cancelled",
                Self::InvalidState => "invalid state",
            },
        )
    }
}

#[derive(Error, Debug)]
pub enum E {
    #[error("Fail to open: {0}")]
    OpenFailed(reader::E),
    #[error("Fail to read: {0}")]
    ReadFailed(reader::E),
    #[error("Hashing has been cancelled")]
    Cancelled,
    #[error("Hasher is in invalid state: {0}")]
    InvalidState(hasher::E),
    #[error("Worker has been shut down before reporting the result")]
    WorkerDown,
}

impl E {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::OpenFailed(..) => ErrorKind::OpenFailed,
            Self::ReadFailed(..) => ErrorKind::ReadFailed,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::InvalidState(..) | Self::WorkerDown => ErrorKind::InvalidState,
        }
    }
}

impl From<hasher::E> for E {
    fn from(err: hasher::E) -> Self {
        E::InvalidState(err)
    }
}

/// Failed outcome of hashing of one file. No digests are reported for a failed file, even if some
/// content was already absorbed.
#[derive(Error, Debug)]
#[error("{}: {}", .path.display(), .err)]
pub struct FileError {
    pub path: PathBuf,
    pub err: E,
}

impl FileError {
    pub fn new(path: PathBuf, err: E) -> Self {
        Self { path, err }
    }

    pub fn kind(&self) -> ErrorKind {
        self.err.kind()
    }
}
