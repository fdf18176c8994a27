//! Directory entry record.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use super::U32Le;

/// Directory entry as stored in the inflated directory (12 bytes).
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct EntryRecord {
    /// Offset of the path string, relative to the end of the entry count
    pub path_offset: U32Le,
    /// Offset of the payload in the archive
    pub offset: U32Le,
    /// Payload length
    pub size: U32Le,
}

impl EntryRecord {
    /// Size of the record in bytes.
    pub const SIZE: usize = 12;
}

const _: () = assert!(std::mem::size_of::<EntryRecord>() == EntryRecord::SIZE);
