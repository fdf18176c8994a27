//! Archive header record.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use super::U32Le;

/// Archive header as stored after unmasking (16 bytes).
///
/// The header occupies the first 16 bytes of the file and is masked with a
/// keystream seeded at offset 0.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct HeaderRecord {
    /// Format tag, `ARC1` in known archives
    pub signature: [u8; 4],
    /// Total archive size
    pub size: U32Le,
    /// Absolute offset of the compressed directory region
    pub offset: U32Le,
    /// Size of the compressed directory region, including its 4-byte prefix
    pub compressed_size: U32Le,
}

impl HeaderRecord {
    /// Size of the record in bytes.
    pub const SIZE: usize = 16;
}

const _: () = assert!(std::mem::size_of::<HeaderRecord>() == HeaderRecord::SIZE);
