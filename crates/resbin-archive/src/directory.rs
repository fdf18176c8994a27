//! Directory location, decompression and parsing.
//!
//! The directory region starts at `header.offset` and is masked with a
//! keystream seeded at that same offset. After unmasking, a 4-byte prefix is
//! skipped and the rest inflates to:
//!
//! ```text
//! entry_count: u32
//! entries:     [path_offset: u32, offset: u32, size: u32; entry_count]
//! strings:     null-terminated paths, addressed relative to `entries`
//! ```

use resbin_common::BinaryReader;
use tracing::{debug, instrument, trace};

use crate::decompress;
use crate::entry::{DirectoryEntry, Entry};
use crate::format::EntryRecord;
use crate::keystream;
use crate::{DecodeOptions, Error, Header, Result};

/// Length of the unused prefix in front of the compressed stream.
pub const DIRECTORY_PREFIX_LEN: usize = 4;

/// Unmask and inflate the directory described by `header`.
pub fn decompress_directory(archive: &[u8], header: &Header) -> Result<Vec<u8>> {
    decompress_directory_with(archive, header, &DecodeOptions::default())
}

/// Unmask and inflate the directory described by `header`, honouring
/// `options`.
#[instrument(level = "debug", skip(archive, header, options), fields(archive_len = archive.len(), offset = header.offset))]
pub fn decompress_directory_with(
    archive: &[u8],
    header: &Header,
    options: &DecodeOptions,
) -> Result<Vec<u8>> {
    let start = header.offset as usize;
    if start >= archive.len() {
        return Err(Error::DirectoryOutOfBounds {
            offset: header.offset,
            archive_len: archive.len(),
        });
    }

    let end = if options.is_strict() {
        start
            .checked_add(header.compressed_size as usize)
            .filter(|&end| end <= archive.len())
            .ok_or(Error::DirectoryRegionOutOfBounds {
                offset: header.offset,
                compressed_size: header.compressed_size,
                archive_len: archive.len(),
            })?
    } else {
        archive.len()
    };

    let region = keystream::unmask_region(&archive[start..end], header.offset);
    if region.len() < DIRECTORY_PREFIX_LEN {
        return Err(Error::TruncatedDirectoryRegion { len: region.len() });
    }

    let prefix = BinaryReader::new(&region).peek_u32()?;
    trace!(prefix, region_len = region.len(), "directory region unmasked");

    let output =
        decompress::inflate_to_vec(&region[DIRECTORY_PREFIX_LEN..], options.directory_limit())?;

    debug!(inflated = output.len(), "directory inflated");
    Ok(output)
}

/// Read the entry table of an inflated directory.
///
/// Returns the entries in stored order together with the directory body
/// (everything after the entry count) that their path offsets address.
pub fn read_entries(dcmp: &[u8]) -> Result<(Vec<Entry>, &[u8])> {
    let mut reader = BinaryReader::new(dcmp);
    let count = reader.read_u32().map_err(|_| Error::TruncatedDirectory {
        available: dcmp.len(),
    })?;

    let body = reader.remaining_bytes();
    let records: Vec<EntryRecord> = BinaryReader::new(body)
        .read_structs(count as usize)
        .map_err(|_| Error::EntryTableOverflow {
            count,
            available: body.len(),
        })?;

    trace!(count, body_len = body.len(), "read entry table");
    Ok((records.into_iter().map(Entry::from).collect(), body))
}

/// Resolve the null-terminated path of entry `index` within `body`.
///
/// `strings_start` is where the string table begins, i.e. the length of the
/// entry table. Path offsets stay relative to `body` but must land in
/// `strings_start..body.len()`.
pub fn resolve_path<'a>(
    body: &'a [u8],
    strings_start: usize,
    index: usize,
    entry: &Entry,
) -> Result<&'a str> {
    let out_of_range = || Error::PathOutOfRange {
        index,
        path_offset: entry.path_offset,
        strings_start,
        len: body.len(),
    };

    let path_offset = entry.path_offset as usize;
    if path_offset < strings_start {
        return Err(out_of_range());
    }
    let mut reader = BinaryReader::new_at(body, path_offset).map_err(|_| out_of_range())?;

    reader.read_cstring().map_err(|e| match e {
        resbin_common::Error::Utf8(source) => Error::InvalidPath { index, source },
        _ => Error::UnterminatedPath {
            index,
            path_offset: entry.path_offset,
        },
    })
}

/// Parse an inflated directory into entries with resolved paths.
#[instrument(level = "debug", skip(dcmp), fields(len = dcmp.len()))]
pub fn parse_entries(dcmp: &[u8]) -> Result<Vec<DirectoryEntry>> {
    let (entries, body) = read_entries(dcmp)?;
    let strings_start = entries.len() * Entry::SIZE;

    let resolved = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            resolve_path(body, strings_start, index, entry)
                .map(|path| DirectoryEntry::new(path.to_owned(), entry))
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(entries = resolved.len(), "parsed directory");
    Ok(resolved)
}

/// Parse an inflated directory into its paths, in entry order.
pub fn parse_directory(dcmp: &[u8]) -> Result<Vec<String>> {
    Ok(parse_entries(dcmp)?
        .into_iter()
        .map(DirectoryEntry::into_path)
        .collect())
}
