// components/library_naming/src/attributes.rs
use crate::letters::{letter_name, pad};
use serde::Serialize;
use thiserror::Error;

/// Number of components in a generated path: artist, album and title.
pub const PATH_COMPONENTS: usize = 3;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("tracks per album must be at least 1")]
    ZeroTracksPerAlbum,

    #[error("albums per artist must be at least 1")]
    ZeroAlbumsPerArtist,

    #[error("minimum path length must be at least {minimum}, got {actual}")]
    PathTooShort { minimum: usize, actual: usize },
}

/// How track indices decompose into artists, albums and titles.
///
/// `min_path_length` counts the non-separator characters of a whole
/// `artist/album/title` path. Each component is padded to a third of it,
/// rounded up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Shape {
    tracks_per_album: u32,
    albums_per_artist: u32,
    min_path_length: usize,
}

impl Shape {
    pub fn new(
        tracks_per_album: u32,
        albums_per_artist: u32,
        min_path_length: usize,
    ) -> Result<Self, ShapeError> {
        if tracks_per_album == 0 {
            return Err(ShapeError::ZeroTracksPerAlbum);
        }
        if albums_per_artist == 0 {
            return Err(ShapeError::ZeroAlbumsPerArtist);
        }
        if min_path_length < PATH_COMPONENTS {
            return Err(ShapeError::PathTooShort {
                minimum: PATH_COMPONENTS,
                actual: min_path_length,
            });
        }

        Ok(Self {
            tracks_per_album,
            albums_per_artist,
            min_path_length,
        })
    }

    pub fn tracks_per_album(&self) -> u32 {
        self.tracks_per_album
    }

    pub fn albums_per_artist(&self) -> u32 {
        self.albums_per_artist
    }

    pub fn min_path_length(&self) -> usize {
        self.min_path_length
    }

    /// Tracks covered by a single artist
    pub fn tracks_per_artist(&self) -> usize {
        (self.tracks_per_album as usize).saturating_mul(self.albums_per_artist as usize)
    }

    /// Derive the attributes of the `index`-th track.
    ///
    /// The index is read as a fixed-radix number, most significant first:
    /// artist, then album within the artist, then track within the album.
    pub fn resolve(&self, index: usize) -> ResolvedAttributes {
        // Both radices are non-zero, checked by `new`
        let tracks_per_album = self.tracks_per_album as usize;
        let albums_per_artist = self.albums_per_artist as usize;

        let artist_ordinal = index / self.tracks_per_artist();
        let album_ordinal = (index / tracks_per_album) % albums_per_artist;
        let track_ordinal = index % tracks_per_album;

        let name =
            |ordinal: usize| pad(&letter_name(ordinal), self.min_path_length, PATH_COMPONENTS);

        ResolvedAttributes {
            artist: name(artist_ordinal),
            album: name(album_ordinal),
            title: name(track_ordinal),
            // track_ordinal < tracks_per_album, which came from a u32
            track_number: track_ordinal as u32 + 1,
        }
    }
}

impl Default for Shape {
    fn default() -> Self {
        Self {
            tracks_per_album: 10,
            albums_per_artist: 3,
            min_path_length: PATH_COMPONENTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAttributes {
    pub artist: String,
    pub album: String,
    pub title: String,
    /// 1-based position on the album
    pub track_number: u32,
}
