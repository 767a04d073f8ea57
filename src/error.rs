use crate::{hasher, reader, session};
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum E {
    #[error("{0}")]
    Session(session::E),
    #[error("{0}")]
    Hasher(hasher::E),
    #[error("{0}")]
    Reader(reader::E),
    #[error("IO: {0}")]
    IO(#[from] io::Error),
}

impl E {
    /// `true` if the error was caused by invalid parameters (nothing has been hashed).
    pub fn is_config(&self) -> bool {
        match self {
            E::Session(err) => err.is_config(),
            E::Hasher(hasher::E::UnknownAlgorithm(..)) => true,
            _ => false,
        }
    }
}

impl From<session::E> for E {
    fn from(err: session::E) -> Self {
        E::Session(err)
    }
}

impl From<hasher::E> for E {
    fn from(err: hasher::E) -> Self {
        E::Hasher(err)
    }
}

impl From<reader::E> for E {
    fn from(err: reader::E) -> Self {
        E::Reader(err)
    }
}
