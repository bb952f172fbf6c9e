// components/fake_library/src/lib.rs
//! A music library that exists only in memory
//!
//! One "golden" MP3 supplies the audio for every track. Each track gets its
//! own generated ID3v2 tag and path, so tools can be tested against huge
//! libraries without storing them.
//!
//! # Examples
//!
//! ```
//! use fake_library::Library;
//! use std::io::Cursor;
//!
//! let library = Library::from_reader(Cursor::new(b"audio".to_vec()))?.with_tracks(100);
//! assert_eq!(library.path_at(0)?, "A/A/A.mp3");
//!
//! let song = library.song_at(0)?;
//! let mut buf = vec![0; song.size() as usize];
//! assert_eq!(song.read_at(&mut buf, 0), buf.len());
//! # Ok::<(), fake_library::LibraryError>(())
//! ```

mod error;
mod golden;
mod library;
mod song;
mod tagging;

pub use error::{LibraryError, Result};
pub use golden::Id3v2Header;
pub use library::{Library, DEFAULT_TRACKS};
pub use library_naming::{Shape, ShapeError};
pub use song::Song;
pub use tagging::{ArtistAlbumTitle, Pather, RepeatedLetters, Tagger, TrackTag, FILE_EXTENSION};
