//! Reader for ARC1 resource archives (`resources.bin`).
//!
//! An ARC1 archive starts with a 16-byte header and carries a compressed
//! directory somewhere after its payload data. Both regions are masked with
//! a keystream seeded from their absolute file offset:
//!
//! - a 32-bit LCG (`x * 0x41C64E6D + 12345`) seeded at `0x19000000 + offset`
//! - the high byte of each state is XORed onto one data byte
//!
//! Decoding runs header, directory region, inflation (gzip or raw DEFLATE),
//! entry table and string table, and yields the archive's file paths in
//! stored order. Payloads are never extracted.
//!
//! # Example
//!
//! ```no_run
//! use resbin_archive::ResourceArchive;
//!
//! let archive = ResourceArchive::open("resources.bin")?;
//!
//! for entry in archive.iter() {
//!     println!("{:>10} {}", entry.size(), entry.path());
//! }
//! # Ok::<(), resbin_archive::Error>(())
//! ```
//!
//! For a buffer already in memory, [`list_paths`] does the whole pipeline:
//!
//! ```no_run
//! let data = std::fs::read("resources.bin")?;
//! let paths = resbin_archive::list_paths(&data)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod archive;
mod decompress;
mod directory;
mod entry;
mod error;
mod header;
mod keystream;
mod options;
pub mod format;

#[cfg(test)]
mod testutil;

pub use archive::{list_paths, ResourceArchive};
pub use decompress::{inflate, inflate_to_vec, GZIP_MAGIC};
pub use directory::{
    decompress_directory, decompress_directory_with, parse_directory, parse_entries,
    read_entries, resolve_path, DIRECTORY_PREFIX_LEN,
};
pub use entry::{DirectoryEntry, Entry};
pub use error::{Error, ErrorKind, Result};
pub use header::{decode_header, Header};
pub use keystream::{unmask, unmask_in_place, Keystream};
pub use options::DecodeOptions;

#[cfg(feature = "parallel")]
pub use keystream::unmask_parallel;
