// components/fake_library/src/error.rs
use library_naming::ShapeError;
use lofty::LoftyError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("malformed ID3v2 header in golden file: {0}")]
    MalformedHeader(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("index {index} out of range [0, {tracks})")]
    OutOfRange { index: usize, tracks: usize },

    #[error("failed to encode ID3v2 tag: {0}")]
    TagEncoding(#[from] LoftyError),

    #[error("invalid library shape: {0}")]
    Shape(#[from] ShapeError),
}

pub type Result<T> = std::result::Result<T, LibraryError>;
