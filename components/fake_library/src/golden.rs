// components/fake_library/src/golden.rs
use crate::error::{LibraryError, Result};
use lofty::id3::v2::util::synchsafe::SynchsafeInteger;
use std::io::{Read, Seek, SeekFrom};
use std::sync::Arc;

const MAGIC: &[u8; 3] = b"ID3";
const HEADER_LEN: u64 = 10;
const FOOTER_LEN: u64 = 10;
const FOOTER_FLAG: u8 = 0x10;

/// The fixed 10-byte header that opens every ID3v2 tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Id3v2Header {
    pub major_version: u8,
    pub revision: u8,
    pub flags: u8,
    /// Size of the tag body, excluding header and footer
    pub body_len: u32,
}

impl Id3v2Header {
    /// Parse a header, or `None` if the bytes do not start an ID3v2 tag.
    pub fn parse(bytes: &[u8]) -> Result<Option<Self>> {
        if !bytes.starts_with(MAGIC) {
            return Ok(None);
        }
        if (bytes.len() as u64) < HEADER_LEN {
            return Err(LibraryError::MalformedHeader(format!(
                "header truncated after {} bytes",
                bytes.len()
            )));
        }

        let major_version = bytes[3];
        let revision = bytes[4];
        let flags = bytes[5];

        if !(2..=4).contains(&major_version) {
            return Err(LibraryError::MalformedHeader(format!(
                "unsupported major version {}",
                major_version
            )));
        }
        if revision == 0xFF {
            return Err(LibraryError::MalformedHeader(
                "invalid revision 0xFF".to_string(),
            ));
        }

        let body_len = synchsafe([bytes[6], bytes[7], bytes[8], bytes[9]])?;

        Ok(Some(Self {
            major_version,
            revision,
            flags,
            body_len,
        }))
    }

    /// Bytes occupied by the whole tag, header and footer included
    pub fn tag_len(&self) -> u64 {
        let footer = if self.major_version == 4 && self.flags & FOOTER_FLAG != 0 {
            FOOTER_LEN
        } else {
            0
        };
        HEADER_LEN + u64::from(self.body_len) + footer
    }
}

fn synchsafe(bytes: [u8; 4]) -> Result<u32> {
    if let Some(byte) = bytes.iter().find(|&&byte| byte & 0x80 != 0) {
        return Err(LibraryError::MalformedHeader(format!(
            "size byte {:#04x} is not synchsafe",
            byte
        )));
    }
    Ok(u32::from_be_bytes(bytes).unsynch())
}

/// Audio data of the golden file with its leading tag removed.
#[derive(Debug, Clone)]
pub(crate) struct GoldenAudio {
    pub header_len: u64,
    pub payload: Arc<[u8]>,
}

impl GoldenAudio {
    pub fn read_from<R: Read + Seek>(mut golden: R) -> Result<Self> {
        let mut prefix = Vec::with_capacity(HEADER_LEN as usize);
        (&mut golden).take(HEADER_LEN).read_to_end(&mut prefix)?;

        let header_len = match Id3v2Header::parse(&prefix)? {
            Some(header) => header.tag_len(),
            None => 0,
        };

        let stream_len = golden.seek(SeekFrom::End(0))?;
        if header_len > stream_len {
            return Err(LibraryError::MalformedHeader(format!(
                "tag claims {} bytes but the file has only {}",
                header_len, stream_len
            )));
        }

        // The header may have been followed by more bytes than we needed
        golden.seek(SeekFrom::Start(header_len))?;

        let mut payload = Vec::new();
        golden.read_to_end(&mut payload)?;

        tracing::debug!(
            "Loaded golden audio: stripped {} tag bytes, kept {} payload bytes",
            header_len,
            payload.len()
        );

        Ok(Self {
            header_len,
            payload: payload.into(),
        })
    }
}
