pub mod buffering;
mod error;

pub use error::E;
use std::{fs::File, io::Read, path::Path};

/// A trait that extends the standard `Read` trait with additional capabilities for reading data.
/// Implementers of this trait must also implement `Send`.
///
/// The task of hashing creates one instance of a reader for each file:
/// - Binds the reader to the target file (with method `bind(..)`). Any error here is reported as
///   a failure to open the file and no hashing work is started.
/// - Reads the file block by block, never more than the size of the given buffer at once.
/// - Drops the instance of `Reader`, which closes the file.
pub trait Reader: Read + Send + Sized {
    /// Binds a new reader to the specified file path. The file should be opened here, so that
    /// a missing, inaccessible or non-regular file is detected before reading.
    ///
    /// # Parameters
    ///
    /// - `path`: A reference to a path that the reader will be bound to.
    ///
    /// # Returns
    ///
    /// - `Result<Self, E>`: On success, returns an instance of the reader.
    fn bind<P: AsRef<Path>>(path: P) -> Result<Self, E>;
}

/// Opens the file and makes sure it's a regular file (not a folder, a socket etc.).
pub(crate) fn open<P: AsRef<Path>>(path: P) -> Result<File, E> {
    let file = File::open(path.as_ref())?;
    if !file.metadata()?.is_file() {
        return Err(E::NotAFile(path.as_ref().to_path_buf()));
    }
    Ok(file)
}
