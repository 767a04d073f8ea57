use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum E {
    #[error("{0}")]
    IO(#[from] io::Error),
    #[error("Path {0} isn't a regular file")]
    NotAFile(PathBuf),
}
