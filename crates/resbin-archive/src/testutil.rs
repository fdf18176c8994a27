//! Synthetic archive builders for tests.

use std::io::Write;

use flate2::write::{DeflateEncoder, GzEncoder};

use crate::entry::Entry;
use crate::keystream;
use crate::Header;

/// Filler placed between the header and the directory, standing in for
/// payload data.
pub(crate) const PAYLOAD_LEN: usize = 48;

#[derive(Debug, Clone, Copy)]
pub(crate) enum Compression {
    Gzip,
    Raw,
}

/// Build an inflated directory holding `paths`, with each entry pointing at
/// a made-up payload.
pub(crate) fn build_directory(paths: &[&str]) -> Vec<u8> {
    let table_len = paths.len() * Entry::SIZE;
    let mut table = Vec::with_capacity(table_len);
    let mut strings = Vec::new();

    for (i, path) in paths.iter().enumerate() {
        let entry = Entry {
            path_offset: (table_len + strings.len()) as u32,
            offset: (Header::SIZE + i * 4) as u32,
            size: path.len() as u32,
        };
        table.extend_from_slice(&entry.to_bytes());
        strings.extend_from_slice(path.as_bytes());
        strings.push(0);
    }

    let mut dcmp = Vec::new();
    dcmp.extend_from_slice(&(paths.len() as u32).to_le_bytes());
    dcmp.extend_from_slice(&table);
    dcmp.extend_from_slice(&strings);
    dcmp
}

/// Build a complete masked archive whose directory inflates to `dcmp`.
pub(crate) fn build_archive(dcmp: &[u8], compression: Compression) -> Vec<u8> {
    let compressed = match compression {
        Compression::Gzip => {
            let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
            encoder.write_all(dcmp).unwrap();
            encoder.finish().unwrap()
        }
        Compression::Raw => {
            let mut encoder = DeflateEncoder::new(Vec::new(), flate2::Compression::default());
            encoder.write_all(dcmp).unwrap();
            encoder.finish().unwrap()
        }
    };

    let mut region = Vec::with_capacity(compressed.len() + 4);
    region.extend_from_slice(&(dcmp.len() as u32).to_le_bytes());
    region.extend_from_slice(&compressed);

    let offset = (Header::SIZE + PAYLOAD_LEN) as u32;
    let header = Header {
        signature: Header::MAGIC,
        size: offset + region.len() as u32,
        offset,
        compressed_size: region.len() as u32,
    };

    let payload: Vec<u8> = (0..PAYLOAD_LEN as u32).map(|i| (i * 31) as u8).collect();

    let mut archive = keystream::unmask(&header.to_bytes(), 0);
    archive.extend_from_slice(&keystream::unmask(&payload, Header::SIZE as u32));
    archive.extend_from_slice(&keystream::unmask(&region, offset));
    archive
}
