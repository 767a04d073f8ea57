use super::{Hasher, E};
use sha2::Digest;

/// Hasher based on any algorithm from the RustCrypto family (`md-5`, `sha1`, `sha2`).
pub struct Digested<D: Digest + Send> {
    hasher: Option<D>,
    hash: Option<Vec<u8>>,
}

pub type Md5 = Digested<md5::Md5>;
pub type Sha1 = Digested<sha1::Sha1>;
pub type Sha256 = Digested<sha2::Sha256>;
pub type Sha512 = Digested<sha2::Sha512>;

impl<D: Digest + Send> Default for Digested<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Digest + Send> Digested<D> {
    /// Creates a new instance of hasher with a clean state.
    pub fn new() -> Self {
        Digested {
            hasher: Some(D::new()),
            hash: None,
        }
    }
}

impl<D: Digest + Send> Hasher for Digested<D> {
    fn absorb(&mut self, data: &[u8]) -> Result<(), E> {
        let Some(hasher) = self.hasher.as_mut() else {
            return Err(E::AlreadyFinished);
        };
        hasher.update(data);
        Ok(())
    }

    fn finish(&mut self) -> Result<(), E> {
        let Some(hasher) = self.hasher.take() else {
            return Err(E::AlreadyFinished);
        };
        self.hash = Some(hasher.finalize().to_vec());
        Ok(())
    }

    fn hash(&self) -> Result<&[u8], E> {
        self.hash.as_deref().ok_or(E::NotFinished)
    }
}
