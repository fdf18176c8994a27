//! Archive header decoding.

use resbin_common::BinaryReader;
use tracing::{instrument, trace};
use zerocopy::IntoBytes;

use crate::format::{HeaderRecord, U32Le};
use crate::keystream;
use crate::{Error, Result};

/// Decoded archive header.
///
/// The signature is kept as opaque bytes; only [`DecodeOptions`] with
/// `require_signature` ever compares it.
///
/// [`DecodeOptions`]: crate::DecodeOptions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Header {
    /// Format tag.
    pub signature: [u8; 4],
    /// Total archive size.
    pub size: u32,
    /// Absolute offset of the compressed directory region.
    pub offset: u32,
    /// Declared size of the compressed directory region.
    pub compressed_size: u32,
}

impl Header {
    /// Encoded size in bytes.
    pub const SIZE: usize = HeaderRecord::SIZE;

    /// Signature of known archives.
    pub const MAGIC: [u8; 4] = *b"ARC1";

    /// Read an already unmasked header.
    pub fn read(reader: &mut BinaryReader<'_>) -> Result<Self> {
        let available = reader.remaining();
        let record: HeaderRecord = reader
            .read_struct()
            .map_err(|_| Error::TruncatedHeader { available })?;
        Ok(Self::from(record))
    }

    /// Encode the header into its unmasked on-disk form.
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let record = HeaderRecord::from(*self);
        let mut out = [0u8; Self::SIZE];
        out.copy_from_slice(record.as_bytes());
        out
    }

    /// Whether the signature is the known `ARC1` tag.
    #[inline]
    pub fn has_known_signature(&self) -> bool {
        self.signature == Self::MAGIC
    }

    /// Signature rendered as text, with non-printable bytes escaped.
    pub fn signature_display(&self) -> String {
        self.signature
            .iter()
            .flat_map(|b| std::ascii::escape_default(*b))
            .map(char::from)
            .collect()
    }
}

impl From<HeaderRecord> for Header {
    fn from(record: HeaderRecord) -> Self {
        Self {
            signature: record.signature,
            size: record.size.get(),
            offset: record.offset.get(),
            compressed_size: record.compressed_size.get(),
        }
    }
}

impl From<Header> for HeaderRecord {
    fn from(header: Header) -> Self {
        Self {
            signature: header.signature,
            size: U32Le::new(header.size),
            offset: U32Le::new(header.offset),
            compressed_size: U32Le::new(header.compressed_size),
        }
    }
}

/// Unmask and decode the header from the start of an archive.
///
/// Only the first 16 bytes of `archive` are looked at.
#[instrument(level = "debug", skip(archive), fields(archive_len = archive.len()))]
pub fn decode_header(archive: &[u8]) -> Result<Header> {
    if archive.len() < Header::SIZE {
        return Err(Error::TruncatedHeader {
            available: archive.len(),
        });
    }

    let mut block = [0u8; Header::SIZE];
    block.copy_from_slice(&archive[..Header::SIZE]);
    keystream::unmask_in_place(&mut block, 0);

    let header = Header::read(&mut BinaryReader::new(&block))?;
    trace!(?header, "decoded header");
    Ok(header)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Header {
        Header {
            signature: Header::MAGIC,
            size: 0x0012_3456,
            offset: 0x0010_0000,
            compressed_size: 0x2345,
        }
    }

    #[test]
    fn test_layout_is_little_endian() {
        let bytes = sample().to_bytes();
        assert_eq!(&bytes[0..4], b"ARC1");
        assert_eq!(&bytes[4..8], &[0x56, 0x34, 0x12, 0x00]);
        assert_eq!(&bytes[8..12], &[0x00, 0x00, 0x10, 0x00]);
        assert_eq!(&bytes[12..16], &[0x45, 0x23, 0x00, 0x00]);
    }

    #[test]
    fn test_decode_masked_header() {
        let header = sample();
        let masked = keystream::unmask(&header.to_bytes(), 0);
        assert_ne!(&masked[..4], b"ARC1");

        let decoded = decode_header(&masked).unwrap();
        assert_eq!(decoded, header);
        assert!(decoded.has_known_signature());
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        let header = sample();
        let mut archive = keystream::unmask(&header.to_bytes(), 0);
        archive.extend_from_slice(&[0xAA; 64]);

        assert_eq!(decode_header(&archive).unwrap(), header);
    }

    #[test]
    fn test_decode_truncated() {
        for len in [0usize, 1, 15] {
            let err = decode_header(&vec![0u8; len]).unwrap_err();
            assert!(matches!(err, Error::TruncatedHeader { available } if available == len));
            assert_eq!(err.kind(), crate::ErrorKind::Format);
        }
    }

    #[test]
    fn test_unknown_signature_is_kept() {
        let header = Header {
            signature: [0x00, b'X', 0xFF, b'Z'],
            ..sample()
        };
        let decoded = decode_header(&keystream::unmask(&header.to_bytes(), 0)).unwrap();

        assert_eq!(decoded.signature, [0x00, b'X', 0xFF, b'Z']);
        assert!(!decoded.has_known_signature());
        assert_eq!(decoded.signature_display(), "\\x00X\\xffZ");
    }
}
