// components/fake_library/src/tagging.rs
use crate::error::Result;
use library_naming::{ResolvedAttributes, Shape};
use lofty::id3::v2::Id3v2Tag;
use lofty::{Accessor, TagExt};

/// Extension given to every generated file
pub const FILE_EXTENSION: &str = "mp3";

/// Metadata written into the tag of a generated track
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackTag {
    pub artist: String,
    pub album: String,
    pub title: String,
    pub track_number: u32,
}

impl TrackTag {
    /// Encode as a standalone ID3v2 tag.
    ///
    /// The tag's own header records its length, so a reader can find where
    /// the audio starts.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut tag = Id3v2Tag::default();
        tag.set_artist(self.artist.clone());
        tag.set_album(self.album.clone());
        tag.set_title(self.title.clone());
        tag.set_track(self.track_number);

        let mut bytes = Vec::new();
        tag.dump_to(&mut bytes)?;
        Ok(bytes)
    }
}

impl From<ResolvedAttributes> for TrackTag {
    fn from(attributes: ResolvedAttributes) -> Self {
        Self {
            artist: attributes.artist,
            album: attributes.album,
            title: attributes.title,
            track_number: attributes.track_number,
        }
    }
}

/// Produces the tag for the track at each index.
///
/// Implementations must be deterministic; the library calls them again on
/// every lookup and from many threads.
pub trait Tagger: Send + Sync {
    fn tag(&self, index: usize) -> TrackTag;
}

/// Produces the path of the track at `index`, given the tag the library's
/// [`Tagger`] generated for that same index.
pub trait Pather: Send + Sync {
    fn path(&self, index: usize, tag: &TrackTag) -> String;
}

impl<F> Tagger for F
where
    F: Fn(usize) -> TrackTag + Send + Sync,
{
    fn tag(&self, index: usize) -> TrackTag {
        self(index)
    }
}

impl<F> Pather for F
where
    F: Fn(usize, &TrackTag) -> String + Send + Sync,
{
    fn path(&self, index: usize, tag: &TrackTag) -> String {
        self(index, tag)
    }
}

/// Names artists, albums and titles with spreadsheet letters.
///
/// Track 0 is artist A, album A, title A. Track 1 is title B on the same
/// album, and so on until the album is full.
#[derive(Debug, Clone, Copy, Default)]
pub struct RepeatedLetters {
    shape: Shape,
}

impl RepeatedLetters {
    pub fn new(shape: Shape) -> Self {
        Self { shape }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }
}

impl Tagger for RepeatedLetters {
    fn tag(&self, index: usize) -> TrackTag {
        self.shape.resolve(index).into()
    }
}

/// Lays tracks out as `<artist>/<album>/<title>.mp3`
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtistAlbumTitle;

impl Pather for ArtistAlbumTitle {
    fn path(&self, _index: usize, tag: &TrackTag) -> String {
        format!(
            "{}/{}/{}.{}",
            tag.artist, tag.album, tag.title, FILE_EXTENSION
        )
    }
}
