use super::{
    blake::Blake,
    digest::{Md5, Sha1, Sha256, Sha512},
    entropy::Entropy,
    Hasher, E,
};
use std::{fmt, str::FromStr, sync::Arc};

/// Built-in algorithms, listed in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Md5,
    Sha1,
    Sha256,
    Sha512,
    Blake3,
    Entropy,
}

impl Algorithm {
    /// Algorithms used when nothing was requested explicitly.
    pub const DEFAULTS: [Algorithm; 4] = [
        Algorithm::Md5,
        Algorithm::Sha1,
        Algorithm::Sha256,
        Algorithm::Sha512,
    ];

    pub fn all() -> &'static [Algorithm] {
        &[
            Algorithm::Md5,
            Algorithm::Sha1,
            Algorithm::Sha256,
            Algorithm::Sha512,
            Algorithm::Blake3,
            Algorithm::Entropy,
        ]
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
            Self::Blake3 => "blake3",
            Self::Entropy => "entropy",
        }
    }

    /// Creates a fresh hasher instance of this algorithm.
    pub fn hasher(&self) -> Box<dyn Hasher> {
        match self {
            Self::Md5 => Box::new(Md5::new()),
            Self::Sha1 => Box::new(Sha1::new()),
            Self::Sha256 => Box::new(Sha256::new()),
            Self::Sha512 => Box::new(Sha512::new()),
            Self::Blake3 => Box::new(Blake::new()),
            Self::Entropy => Box::new(Entropy::new()),
        }
    }

    pub fn spec(&self) -> AlgorithmSpec {
        let algorithm = *self;
        AlgorithmSpec::new(self.id(), move || algorithm.hasher())
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Algorithm {
    type Err = E;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase().replace('-', "");
        Algorithm::all()
            .iter()
            .find(|algorithm| algorithm.id() == name)
            .copied()
            .ok_or_else(|| E::UnknownAlgorithm(s.to_owned()))
    }
}

pub type Factory = Arc<dyn Fn() -> Box<dyn Hasher> + Send + Sync>;

/// Identifier of an algorithm bound with a factory of hashers. `AlgorithmSpec` is immutable and
/// cheap to clone; one instance is shared by all tasks of a session, while each task gets its own
/// hasher from the factory.
#[derive(Clone)]
pub struct AlgorithmSpec {
    id: String,
    factory: Factory,
}

impl AlgorithmSpec {
    /// # Parameters
    ///
    /// - `id`: Name of the algorithm, used as a key of the digest in results.
    /// - `factory`: Closure producing a fresh hasher for each file.
    pub fn new<S, F>(id: S, factory: F) -> Self
    where
        S: AsRef<str>,
        F: Fn() -> Box<dyn Hasher> + Send + Sync + 'static,
    {
        Self {
            id: id.as_ref().to_owned(),
            factory: Arc::new(factory),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn hasher(&self) -> Box<dyn Hasher> {
        (self.factory)()
    }
}

impl fmt::Debug for AlgorithmSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgorithmSpec").field("id", &self.id).finish()
    }
}

impl From<Algorithm> for AlgorithmSpec {
    fn from(algorithm: Algorithm) -> Self {
        algorithm.spec()
    }
}

impl FromStr for AlgorithmSpec {
    type Err = E;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Algorithm::from_str(s)?.spec())
    }
}
