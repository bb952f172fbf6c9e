// components/library_tree/src/error.rs
use fake_library::LibraryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("library error: {0}")]
    Library(#[from] LibraryError),

    #[error("track {index} has an empty path")]
    EmptyPath { index: usize },

    #[error("path {path:?} contains a '.' or '..' component")]
    InvalidComponent { path: String },

    #[error("path {path:?} is generated more than once")]
    DuplicatePath { path: String },

    #[error("path {path:?} goes through a song as if it were a directory")]
    NotADirectory { path: String },
}
