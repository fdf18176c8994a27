//! Decompression of the archive directory stream.

use std::io::Read;

use flate2::read::{DeflateDecoder, GzDecoder};

use crate::{Error, Result};

/// Magic bytes opening a gzip member.
pub const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// Inflate a directory stream into `output`.
///
/// Gzip-wrapped streams are recognised by their magic bytes; anything else
/// is treated as raw DEFLATE. Bytes after the end of the stream are ignored.
/// With a `limit`, output beyond that many bytes is an error.
pub fn inflate(data: &[u8], limit: Option<usize>, output: &mut Vec<u8>) -> Result<()> {
    output.clear();

    if data.starts_with(&GZIP_MAGIC) {
        read_limited(GzDecoder::new(data), limit, output)
    } else {
        read_limited(DeflateDecoder::new(data), limit, output)
    }
}

/// Inflate a directory stream into a new buffer.
pub fn inflate_to_vec(data: &[u8], limit: Option<usize>) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    inflate(data, limit, &mut output)?;
    Ok(output)
}

fn read_limited<R: Read>(mut decoder: R, limit: Option<usize>, output: &mut Vec<u8>) -> Result<()> {
    match limit {
        Some(limit) => {
            decoder
                .take(limit as u64 + 1)
                .read_to_end(output)
                .map_err(|e| Error::Decompression(e.to_string()))?;

            if output.len() > limit {
                return Err(Error::DirectoryTooLarge { limit });
            }
        }
        None => {
            decoder
                .read_to_end(output)
                .map_err(|e| Error::Decompression(e.to_string()))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use flate2::write::{DeflateEncoder, GzEncoder};
    use flate2::Compression;

    const ORIGINAL: &[u8] = b"Hello, World! This is a test of directory compression.";

    fn deflate(data: &[u8]) -> Vec<u8> {
        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_inflate_raw_deflate() {
        let compressed = deflate(ORIGINAL);
        assert_eq!(inflate_to_vec(&compressed, None).unwrap(), ORIGINAL);
    }

    #[test]
    fn test_inflate_gzip() {
        let compressed = gzip(ORIGINAL);
        assert_eq!(&compressed[..2], &GZIP_MAGIC);
        assert_eq!(inflate_to_vec(&compressed, None).unwrap(), ORIGINAL);
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let mut compressed = gzip(ORIGINAL);
        compressed.extend_from_slice(&[0u8; 32]);
        assert_eq!(inflate_to_vec(&compressed, None).unwrap(), ORIGINAL);

        let mut compressed = deflate(ORIGINAL);
        compressed.extend_from_slice(&[0xEEu8; 32]);
        assert_eq!(inflate_to_vec(&compressed, None).unwrap(), ORIGINAL);
    }

    #[test]
    fn test_corrupt_stream() {
        // BFINAL=1 with the reserved block type 0b11
        let err = inflate_to_vec(&[0xFF; 16], None).unwrap_err();
        assert!(matches!(err, Error::Decompression(_)));
        assert_eq!(err.kind(), crate::ErrorKind::Decompression);
    }

    #[test]
    fn test_limit() {
        let compressed = deflate(ORIGINAL);

        let exact = inflate_to_vec(&compressed, Some(ORIGINAL.len())).unwrap();
        assert_eq!(exact, ORIGINAL);

        let err = inflate_to_vec(&compressed, Some(ORIGINAL.len() - 1)).unwrap_err();
        assert!(matches!(err, Error::DirectoryTooLarge { .. }));
    }

    #[test]
    fn test_output_is_cleared() {
        let mut output = b"stale".to_vec();
        inflate(&deflate(ORIGINAL), None, &mut output).unwrap();
        assert_eq!(output, ORIGINAL);
    }
}
