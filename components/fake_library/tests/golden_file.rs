use assert_matches::assert_matches;
use fake_library::{Id3v2Header, Library, LibraryError, TrackTag};
use std::io::Write;
use tempfile::NamedTempFile;

const AUDIO: &[u8] = b"\xff\xfb\x90\x00pretend these are mpeg frames";

fn golden_file() -> NamedTempFile {
    let tag = TrackTag {
        artist: "Golden Artist".to_string(),
        album: "Golden Album".to_string(),
        title: "Golden Title".to_string(),
        track_number: 9,
    }
    .encode()
    .unwrap();

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&tag).unwrap();
    file.write_all(AUDIO).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn open_strips_golden_tag() {
    let golden = golden_file();
    let library = Library::open(golden.path()).unwrap();

    assert!(library.golden_header_len() > 0);
    assert_eq!(library.audio_len(), AUDIO.len());
}

#[test]
fn songs_read_back_as_tag_then_golden_audio() {
    let golden = golden_file();
    let library = Library::open(golden.path()).unwrap();

    let song = library.song_at(42).unwrap();
    let mut contents = vec![0u8; song.size() as usize];
    assert_eq!(song.read_at(&mut contents, 0), contents.len());

    let header = Id3v2Header::parse(&contents).unwrap().unwrap();
    let header_len = header.tag_len() as usize;
    assert_eq!(header_len, song.header_len());
    assert_eq!(&contents[header_len..], AUDIO);
}

#[test]
fn generated_song_can_be_reused_as_golden() {
    let golden = golden_file();
    let library = Library::open(golden.path()).unwrap();
    let song = library.song_at(0).unwrap();

    let mut contents = vec![0u8; song.size() as usize];
    song.read_at(&mut contents, 0);
    let reloaded = Library::from_reader(std::io::Cursor::new(contents)).unwrap();

    assert_eq!(reloaded.audio_len(), AUDIO.len());
    assert_eq!(reloaded.golden_header_len(), song.header_len() as u64);
}

#[test]
fn missing_golden_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert_matches!(
        Library::open(dir.path().join("missing.mp3")),
        Err(LibraryError::Io(_))
    );
}

#[test]
fn tag_longer_than_file_is_malformed() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"ID3\x04\x00\x00\x00\x00\x7f\x7f").unwrap();
    file.flush().unwrap();

    assert_matches!(
        Library::open(file.path()),
        Err(LibraryError::MalformedHeader(_))
    );
}

#[test]
fn lookups_are_safe_across_threads() {
    let golden = golden_file();
    let library = Library::open(golden.path()).unwrap().with_tracks(4_000);

    std::thread::scope(|scope| {
        for worker in 0..4 {
            let library = &library;
            scope.spawn(move || {
                for index in (worker..library.tracks()).step_by(4) {
                    let path = library.path_at(index).unwrap();
                    let song = library.song_at(index).unwrap();
                    assert!(path.ends_with(".mp3"));
                    assert_eq!(song.size(), (song.header_len() + AUDIO.len()) as u64);
                }
            });
        }
    });
}
