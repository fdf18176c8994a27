//! Error types for the archive crate.

use thiserror::Error;

/// Errors that can occur when decoding an ARC1 archive.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error.
    #[error("{0}")]
    Common(#[from] resbin_common::Error),

    /// The directory offset in the header lies at or past the end of the archive.
    #[error("directory offset {offset:#x} is outside the archive ({archive_len} bytes)")]
    DirectoryOutOfBounds { offset: u32, archive_len: usize },

    /// The declared directory region runs past the end of the archive.
    #[error(
        "directory region {offset:#x}+{compressed_size} runs past the end of the archive ({archive_len} bytes)"
    )]
    DirectoryRegionOutOfBounds {
        offset: u32,
        compressed_size: u32,
        archive_len: usize,
    },

    /// The directory region is too short to hold its 4-byte prefix.
    #[error("directory region of {len} bytes is too short to hold a compressed stream")]
    TruncatedDirectoryRegion { len: usize },

    /// Decompression error.
    #[error("decompression error: {0}")]
    Decompression(String),

    /// The inflated directory exceeded the configured limit.
    #[error("directory exceeds the {limit} byte limit")]
    DirectoryTooLarge { limit: usize },

    /// Fewer than 16 bytes were available for the header.
    #[error("archive header truncated: need 16 bytes, got {available}")]
    TruncatedHeader { available: usize },

    /// The header signature is not `ARC1`.
    #[error("invalid archive signature: expected {expected:02x?}, got {actual:02x?}")]
    SignatureMismatch { expected: [u8; 4], actual: [u8; 4] },

    /// The directory is too short to hold its entry count.
    #[error("directory truncated: need 4 bytes for the entry count, got {available}")]
    TruncatedDirectory { available: usize },

    /// The entry count implies a table larger than the directory.
    #[error("entry table of {count} entries does not fit in {available} directory bytes")]
    EntryTableOverflow { count: u32, available: usize },

    /// An entry's path offset points outside the string table.
    #[error("entry {index}: path offset {path_offset:#x} is outside the string table ({strings_start:#x}..{len:#x})")]
    PathOutOfRange {
        index: usize,
        path_offset: u32,
        strings_start: usize,
        len: usize,
    },

    /// An entry's path has no null terminator before the end of the directory.
    #[error("entry {index}: path at {path_offset:#x} is not null-terminated")]
    UnterminatedPath { index: usize, path_offset: u32 },

    /// An entry's path is not valid UTF-8.
    #[error("entry {index}: path is not valid UTF-8: {source}")]
    InvalidPath {
        index: usize,
        #[source]
        source: std::str::Utf8Error,
    },
}

/// Broad classes of decoding failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An offset or length points past the end of a buffer.
    Bounds,
    /// The compressed directory stream could not be inflated.
    Decompression,
    /// The input is structurally invalid.
    Format,
    /// Reading the archive from disk failed.
    Io,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io(_) => ErrorKind::Io,
            Error::DirectoryOutOfBounds { .. } | Error::DirectoryRegionOutOfBounds { .. } => {
                ErrorKind::Bounds
            }
            Error::TruncatedDirectoryRegion { .. }
            | Error::Decompression(_)
            | Error::DirectoryTooLarge { .. } => ErrorKind::Decompression,
            Error::Common(_)
            | Error::TruncatedHeader { .. }
            | Error::SignatureMismatch { .. }
            | Error::TruncatedDirectory { .. }
            | Error::EntryTableOverflow { .. }
            | Error::PathOutOfRange { .. }
            | Error::UnterminatedPath { .. }
            | Error::InvalidPath { .. } => ErrorKind::Format,
        }
    }
}

/// Result type for archive operations.
pub type Result<T> = std::result::Result<T, Error>;
