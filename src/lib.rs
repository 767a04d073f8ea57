#![doc = include_str!("../README.md")]

mod breaker;
mod error;
pub mod hasher;
pub(crate) mod pool;
pub mod reader;
pub mod session;
pub mod task;

pub use breaker::Breaker;
pub use error::E;
pub use hasher::{Algorithm, AlgorithmSpec, Hasher};
pub use reader::Reader;
pub use session::{BatchResult, Options, Outcomes, Session, Tolerance};
pub use task::{ErrorKind, FileError, FileResult, Outcome};

use reader::buffering::Buffering;
use std::path::PathBuf;

/// Hashes files with the given algorithms (names like "md5", "sha256"), hashing no more than
/// `threads` files at the same time. Each file is read only once.
///
/// # Errors
///
/// Configuration errors (no paths, duplicated paths, unknown algorithm, zero threads) are returned
/// before any file is touched. Files which cannot be hashed don't cause an error; they have an
/// error outcome in `BatchResult`.
///
/// # Example
///
/// ```
/// let results = multihasher::hash_files(&["Cargo.toml"], &["md5", "sha256"], 8).unwrap();
/// assert_eq!(results.len(), 1);
/// ```
pub fn hash_files<P, A>(paths: &[P], algorithms: &[A], threads: usize) -> Result<BatchResult, E>
where
    P: Into<PathBuf> + Clone,
    A: AsRef<str>,
{
    let mut opt = Options::new();
    opt.paths(paths.iter().cloned())?
        .algorithms(algorithms)?
        .threads(threads)?;
    Ok(opt.session()?.hash::<Buffering>()?)
}
