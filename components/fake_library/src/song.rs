// components/fake_library/src/song.rs
use std::sync::Arc;

/// A generated track: its own tag followed by the shared golden audio.
///
/// The audio is never copied, every song of a library points at the same
/// buffer. Reading only touches memory, so it cannot fail.
#[derive(Debug, Clone)]
pub struct Song {
    tag: Vec<u8>,
    audio: Arc<[u8]>,
}

impl Song {
    pub fn new(tag: Vec<u8>, audio: Arc<[u8]>) -> Self {
        Self { tag, audio }
    }

    /// Total length in bytes, tag included
    pub fn size(&self) -> u64 {
        (self.tag.len() + self.audio.len()) as u64
    }

    pub fn header_len(&self) -> usize {
        self.tag.len()
    }

    pub fn tag(&self) -> &[u8] {
        &self.tag
    }

    pub fn audio(&self) -> &Arc<[u8]> {
        &self.audio
    }

    /// Copy bytes starting at `offset` into `buf`, returning how many were
    /// copied. Reading at or past the end copies nothing.
    pub fn read_at(&self, buf: &mut [u8], offset: u64) -> usize {
        if offset >= self.size() {
            return 0;
        }
        // offset < size, which fits in usize
        let offset = offset as usize;

        let header_len = self.tag.len();
        let (copied, audio_offset) = if offset < header_len {
            let from_tag = &self.tag[offset..];
            let copied = from_tag.len().min(buf.len());
            buf[..copied].copy_from_slice(&from_tag[..copied]);
            (copied, 0)
        } else {
            (0, offset - header_len)
        };

        let rest = &mut buf[copied..];
        let from_audio = &self.audio[audio_offset..];
        let taken = from_audio.len().min(rest.len());
        rest[..taken].copy_from_slice(&from_audio[..taken]);

        copied + taken
    }
}
