use super::{open, Reader, E};
use std::{fs::File, io::Read, path::Path};

/// Plain reader on top of `std::fs::File`. Reads as much as the given buffer can take.
pub struct Buffering {
    file: File,
}

impl Reader for Buffering {
    fn bind<P: AsRef<Path>>(path: P) -> Result<Self, E> {
        Ok(Self { file: open(path)? })
    }
}

impl Read for Buffering {
    fn read(&mut self, buffer: &mut [u8]) -> std::io::Result<usize> {
        self.file.read(buffer)
    }
}
