// components/fake_library/src/library.rs
use crate::error::{LibraryError, Result};
use crate::golden::GoldenAudio;
use crate::song::Song;
use crate::tagging::{ArtistAlbumTitle, Pather, RepeatedLetters, Tagger, TrackTag};
use library_naming::Shape;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use std::sync::Arc;

/// Number of tracks a freshly loaded library exposes
pub const DEFAULT_TRACKS: usize = 1000;

/// A fake library built around one golden track.
///
/// Every track shares the golden audio; only the generated tag and path
/// differ. Configure it with the `with_*` methods before handing it out,
/// after that it is read-only and can be shared between threads.
pub struct Library {
    tracks: usize,
    tagger: Box<dyn Tagger>,
    pather: Box<dyn Pather>,
    audio: Arc<[u8]>,
    golden_header_len: u64,
}

impl Library {
    /// Load the golden track from `golden`, dropping its ID3v2 tag.
    pub fn from_reader<R: Read + Seek>(golden: R) -> Result<Self> {
        let golden = GoldenAudio::read_from(golden)?;

        Ok(Self {
            tracks: DEFAULT_TRACKS,
            tagger: Box::new(RepeatedLetters::new(Shape::default())),
            pather: Box::new(ArtistAlbumTitle),
            audio: golden.payload,
            golden_header_len: golden.header_len,
        })
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Opening golden file: {:?}", path);
        // The handle is only needed while loading
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn with_tracks(mut self, tracks: usize) -> Self {
        self.tracks = tracks;
        self
    }

    /// Name tracks with [`RepeatedLetters`] laid out by `shape`
    pub fn with_shape(self, shape: Shape) -> Self {
        self.with_tagger(RepeatedLetters::new(shape))
    }

    pub fn with_tagger(mut self, tagger: impl Tagger + 'static) -> Self {
        self.tagger = Box::new(tagger);
        self
    }

    pub fn with_pather(mut self, pather: impl Pather + 'static) -> Self {
        self.pather = Box::new(pather);
        self
    }

    pub fn tracks(&self) -> usize {
        self.tracks
    }

    /// Length of the shared audio, without any tag
    pub fn audio_len(&self) -> usize {
        self.audio.len()
    }

    /// Bytes of tag stripped from the front of the golden file
    pub fn golden_header_len(&self) -> u64 {
        self.golden_header_len
    }

    pub fn tag_at(&self, index: usize) -> Result<TrackTag> {
        self.check_index(index)?;
        Ok(self.tagger.tag(index))
    }

    pub fn path_at(&self, index: usize) -> Result<String> {
        let tag = self.tag_at(index)?;
        Ok(self.pather.path(index, &tag))
    }

    /// Build the song at `index`. The tag is encoded fresh on every call.
    pub fn song_at(&self, index: usize) -> Result<Song> {
        let tag = self.tag_at(index)?;
        Ok(Song::new(tag.encode()?, Arc::clone(&self.audio)))
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.tracks {
            return Err(LibraryError::OutOfRange {
                index,
                tracks: self.tracks,
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Library")
            .field("tracks", &self.tracks)
            .field("audio_len", &self.audio.len())
            .field("golden_header_len", &self.golden_header_len)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rstest::rstest;
    use std::io::Cursor;

    fn library() -> Library {
        Library::from_reader(Cursor::new(b"golden audio".to_vec())).unwrap()
    }

    #[rstest]
    #[case(0, "A/A/A.mp3")]
    #[case(1, "A/A/B.mp3")]
    #[case(2, "A/A/C.mp3")]
    #[case(10, "A/B/A.mp3")]
    #[case(11, "A/B/B.mp3")]
    #[case(30, "B/A/A.mp3")]
    #[case(31, "B/A/B.mp3")]
    #[case(40, "B/B/A.mp3")]
    #[case(26 * 3 * 10, "AA/A/A.mp3")]
    #[case(26 * 3 * 10 + 1, "AA/A/B.mp3")]
    fn default_paths(#[case] index: usize, #[case] expected: &str) {
        assert_eq!(library().path_at(index).unwrap(), expected);
    }

    #[test]
    fn bounds_are_checked() {
        let library = library().with_tracks(5);
        assert!(library.path_at(4).is_ok());
        assert_matches!(
            library.path_at(5),
            Err(LibraryError::OutOfRange { index: 5, tracks: 5 })
        );
        assert_matches!(
            library.song_at(usize::MAX),
            Err(LibraryError::OutOfRange { .. })
        );
    }

    #[test]
    fn empty_library_has_no_valid_index() {
        let library = library().with_tracks(0);
        assert_matches!(library.path_at(0), Err(LibraryError::OutOfRange { .. }));
    }

    #[test]
    fn songs_share_golden_audio() {
        let library = library();
        let first = library.song_at(0).unwrap();
        let second = library.song_at(1).unwrap();

        assert!(Arc::ptr_eq(first.audio(), second.audio()));
        assert_eq!(&first.audio()[..], b"golden audio");
        assert_eq!(first.size(), (first.header_len() + library.audio_len()) as u64);
        assert_ne!(first.tag(), second.tag());
    }

    #[test]
    fn pather_receives_substituted_tag() {
        let library = library()
            .with_tagger(|index: usize| TrackTag {
                artist: "custom".to_string(),
                album: format!("album-{}", index),
                title: "t".to_string(),
                track_number: 1,
            })
            .with_pather(|index: usize, tag: &TrackTag| {
                format!("{}/{}/{}", tag.artist, tag.album, index)
            });

        assert_eq!(library.path_at(7).unwrap(), "custom/album-7/7");
    }

    #[test]
    fn shape_changes_layout() {
        let library = library().with_shape(Shape::new(2, 1, 6).unwrap());
        assert_eq!(library.path_at(0).unwrap(), "AA/AA/AA.mp3");
        assert_eq!(library.path_at(3).unwrap(), "BB/AA/BB.mp3");
    }

    #[test]
    fn library_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Library>();
    }
}
