//! Directory entries.

use std::ops::Range;
use std::path::Path;

use zerocopy::IntoBytes;

use crate::format::{EntryRecord, U32Le};

/// A raw directory entry, before its path has been resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    /// Offset of the path string, relative to the end of the entry count.
    pub path_offset: u32,
    /// Offset of the payload in the archive.
    pub offset: u32,
    /// Payload length in bytes.
    pub size: u32,
}

impl Entry {
    /// Encoded size in bytes.
    pub const SIZE: usize = EntryRecord::SIZE;

    /// Encode the entry into its on-disk form.
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let record = EntryRecord::from(*self);
        let mut out = [0u8; Self::SIZE];
        out.copy_from_slice(record.as_bytes());
        out
    }
}

impl From<EntryRecord> for Entry {
    fn from(record: EntryRecord) -> Self {
        Self {
            path_offset: record.path_offset.get(),
            offset: record.offset.get(),
            size: record.size.get(),
        }
    }
}

impl From<Entry> for EntryRecord {
    fn from(entry: Entry) -> Self {
        Self {
            path_offset: U32Le::new(entry.path_offset),
            offset: U32Le::new(entry.offset),
            size: U32Le::new(entry.size),
        }
    }
}

/// A directory entry with its path resolved.
///
/// This describes where a file lives in the archive; the payload itself is
/// never read.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DirectoryEntry {
    path: String,
    offset: u32,
    size: u32,
}

impl DirectoryEntry {
    pub(crate) fn new(path: String, entry: &Entry) -> Self {
        Self {
            path,
            offset: entry.offset,
            size: entry.size,
        }
    }

    /// Path of the file within the archive.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Offset of the payload in the archive.
    #[inline]
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Payload length in bytes.
    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Byte range of the payload in the archive.
    pub fn payload_range(&self) -> Range<u64> {
        let start = self.offset as u64;
        start..start + self.size as u64
    }

    /// Get the file extension, if any.
    pub fn extension(&self) -> Option<&str> {
        Path::new(&self.path)
            .extension()
            .and_then(|ext| ext.to_str())
    }

    /// Consume the entry, keeping only its path.
    pub fn into_path(self) -> String {
        self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_layout() {
        let entry = Entry {
            path_offset: 0x18,
            offset: 0x0102_0304,
            size: 7,
        };
        assert_eq!(
            entry.to_bytes(),
            [0x18, 0, 0, 0, 0x04, 0x03, 0x02, 0x01, 7, 0, 0, 0]
        );
    }

    #[test]
    fn test_payload_range_does_not_overflow() {
        let entry = DirectoryEntry::new(
            "big.bin".to_string(),
            &Entry {
                path_offset: 0,
                offset: u32::MAX,
                size: u32::MAX,
            },
        );
        let range = entry.payload_range();
        assert_eq!(range.start, u32::MAX as u64);
        assert_eq!(range.end, 2 * u32::MAX as u64);
    }

    #[test]
    fn test_extension() {
        let entry = DirectoryEntry::new(
            "Game/Field/Map001.dat".to_string(),
            &Entry {
                path_offset: 0,
                offset: 0,
                size: 0,
            },
        );
        assert_eq!(entry.extension(), Some("dat"));
        assert_eq!(entry.path(), "Game/Field/Map001.dat");
    }
}
