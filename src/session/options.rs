use super::{Session, E};
use crate::{
    hasher::{Algorithm, AlgorithmSpec},
    task::DEFAULT_BLOCK_SIZE,
};
use std::{mem, path::PathBuf, str::FromStr};

/// The default number of files hashed at the same time.
pub const DEFAULT_THREADS: usize = 8;

/// Reaction of the session on a file which cannot be hashed. In any case the file gets its
/// outcome with an error.
#[derive(Debug, Clone, Default)]
pub enum Tolerance {
    /// Error is logged as a warning; other files are hashed as usual.
    #[default]
    LogErrors,
    /// Error is silently stored in the file's outcome.
    DoNotLogErrors,
    /// First error stops the session: files in the queue aren't hashed and are reported as
    /// cancelled.
    StopOnErrors,
}

/// Settings of a hashing session. `Options` validates each value as soon as it's given, so
/// misconfiguration is reported before any file is touched.
///
/// # Example
///
/// ```
/// use multihasher::{Algorithm, Options};
///
/// let mut opt = Options::new();
/// opt.path("Cargo.toml")
///     .unwrap()
///     .algorithm(Algorithm::Sha256)
///     .unwrap()
///     .threads(2)
///     .unwrap();
/// let session = opt.session().unwrap();
/// assert_eq!(session.count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    pub(crate) paths: Vec<PathBuf>,
    pub(crate) algorithms: Vec<AlgorithmSpec>,
    pub(crate) threads: usize,
    pub(crate) block_size: usize,
    pub(crate) tolerance: Tolerance,
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}

impl Options {
    pub fn new() -> Self {
        Self {
            paths: Vec::new(),
            algorithms: Vec::new(),
            threads: DEFAULT_THREADS,
            block_size: DEFAULT_BLOCK_SIZE,
            tolerance: Tolerance::default(),
        }
    }

    /// Adds a file to hash. The same path cannot be added twice, because results are keyed by
    /// path. Paths are compared as given, without resolving them.
    pub fn path<P: Into<PathBuf>>(&mut self, path: P) -> Result<&mut Self, E> {
        let path = path.into();
        if self.paths.contains(&path) {
            return Err(E::DuplicatePath(path));
        }
        self.paths.push(path);
        Ok(self)
    }

    /// Adds files to hash; see `path()`.
    pub fn paths<I, P>(&mut self, paths: I) -> Result<&mut Self, E>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        for path in paths {
            self.path(path)?;
        }
        Ok(self)
    }

    /// Adds an algorithm (built-in or a custom `AlgorithmSpec`). If no algorithm is added,
    /// `Algorithm::DEFAULTS` are used.
    pub fn algorithm<A: Into<AlgorithmSpec>>(&mut self, algorithm: A) -> Result<&mut Self, E> {
        let algorithm = algorithm.into();
        if self.algorithms.iter().any(|a| a.id() == algorithm.id()) {
            return Err(E::DuplicateAlgorithm(algorithm.id().to_owned()));
        }
        self.algorithms.push(algorithm);
        Ok(self)
    }

    /// Adds built-in algorithms by their names (like "md5" or "sha256").
    pub fn algorithms<I, S>(&mut self, names: I) -> Result<&mut Self, E>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.algorithm(Algorithm::from_str(name.as_ref())?)?;
        }
        Ok(self)
    }

    /// Sets the maximum number of files hashed at the same time. Should be 1 or more.
    pub fn threads(&mut self, threads: usize) -> Result<&mut Self, E> {
        if threads == 0 {
            return Err(E::InvalidThreads(threads));
        }
        self.threads = threads;
        Ok(self)
    }

    /// Sets the number of bytes read from a file at once. Should be a positive number.
    pub fn block_size(&mut self, block_size: usize) -> Result<&mut Self, E> {
        if block_size == 0 {
            return Err(E::InvalidBlockSize);
        }
        self.block_size = block_size;
        Ok(self)
    }

    pub fn tolerance(&mut self, tolerance: Tolerance) -> &mut Self {
        self.tolerance = tolerance;
        self
    }

    /// Validates options and creates a `Session`. On success options are moved into the session;
    /// rejected options are left untouched, so they can be corrected and used again.
    pub fn session(&mut self) -> Result<Session, E> {
        self.validate()?;
        Ok(Session::new(Options {
            paths: mem::take(&mut self.paths),
            algorithms: mem::take(&mut self.algorithms),
            threads: self.threads,
            block_size: self.block_size,
            tolerance: mem::take(&mut self.tolerance),
        }))
    }

    fn validate(&self) -> Result<(), E> {
        if self.paths.is_empty() {
            return Err(E::NoPaths);
        }
        if self.threads == 0 {
            return Err(E::InvalidThreads(self.threads));
        }
        if self.block_size == 0 {
            return Err(E::InvalidBlockSize);
        }
        for (n, path) in self.paths.iter().enumerate() {
            if self.paths[..n].contains(path) {
                return Err(E::DuplicatePath(path.clone()));
            }
        }
        Ok(())
    }
}
