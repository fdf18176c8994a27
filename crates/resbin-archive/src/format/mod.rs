//! On-disk record layouts.
//!
//! These are the raw fixed-size records of an ARC1 archive, read and written
//! with zerocopy. All integers are little-endian regardless of the host.

mod entry;
mod header;

pub use entry::EntryRecord;
pub use header::HeaderRecord;

/// Little-endian `u32` as stored on disk.
pub type U32Le = zerocopy::byteorder::U32<zerocopy::byteorder::LittleEndian>;
