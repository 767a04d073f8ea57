pub mod algorithm;
pub mod blake;
pub mod digest;
pub mod entropy;
mod error;

pub use algorithm::{Algorithm, AlgorithmSpec, Factory};
pub use error::E;

/// A trait that defines the behavior of a hasher (digest accumulator), which receives the content
/// of exactly one file and produces the digest of it. Implementers of this trait must also
/// implement `Send`, because each instance lives inside of a worker's thread.
///
/// `Session` never shares an instance of a hasher between files or threads. For each file that
/// needs to be hashed, the task does the following with each requested algorithm:
/// - Creates a fresh instance of `Hasher` (with the factory from `AlgorithmSpec`).
/// - Adds file's content block by block, in file order (with method `absorb(..)`).
/// - Finalizes hash calculation for the file (with method `finish()`).
/// - Requests encoded file's hash (with method `encode()`).
/// - Drops the instance of `Hasher`.
pub trait Hasher: Send {
    /// Absorbs data into the hasher. This method processes the input data and updates the hasher
    /// state. This method might be called multiple times during the reading of a file.
    ///
    /// # Parameters
    ///
    /// - `data`: A reference to a slice of bytes to be absorbed by the hasher.
    ///
    /// # Returns
    ///
    /// - `Result<(), E>`: On success, returns `Ok(())`. If hashing was already finished, returns
    ///   `E::AlreadyFinished`.
    fn absorb(&mut self, data: &[u8]) -> Result<(), E>;

    /// Finalizes the hashing process. This method should be called after all data has been
    /// absorbed. It can be called only once; a repeated call returns `E::AlreadyFinished`.
    ///
    /// # Returns
    ///
    /// - `Result<(), E>`: On success, returns `Ok(())`. On failure, returns an error.
    fn finish(&mut self) -> Result<(), E>;

    /// Retrieves the computed hash. This method should be called after `finish`.
    ///
    /// # Returns
    ///
    /// - `Result<&[u8], E>`: On success, returns a reference to the computed hash. If hashing
    ///   isn't finished yet, returns `E::NotFinished`.
    fn hash(&self) -> Result<&[u8], E>;

    /// Returns the printable form of the computed hash. By default it's a lowercase hex string.
    fn encode(&self) -> Result<String, E> {
        Ok(hex::encode(self.hash()?))
    }
}
