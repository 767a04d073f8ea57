use thiserror::Error;

#[derive(Error, Debug)]
pub enum E {
    #[error("Hashing not finished")]
    NotFinished,
    #[error("Hashing already finished")]
    AlreadyFinished,
    #[error("Unknown hash algorithm: {0}")]
    UnknownAlgorithm(String),
    #[error("Hasher error: {0}")]
    Other(String),
}

impl E {
    /// Wraps an error of a custom hasher implementation.
    pub fn other<Er: std::error::Error>(err: Er) -> E {
        E::Other(err.to_string())
    }
}
