//! Resbin - ARC1 resource archive inspection library.
//!
//! This crate provides a unified interface to the resbin crates.
//!
//! # Crates
//!
//! - [`resbin_common`] - Common utilities (binary reading)
//! - [`resbin_archive`] - ARC1 archive decoding (keystream + DEFLATE directory)
//!
//! # Example
//!
//! ```no_run
//! use resbin::prelude::*;
//!
//! let options = DecodeOptions::new().require_signature(true);
//! let archive = ResourceArchive::open_with("resources.bin", &options)?;
//!
//! if let Some(entry) = archive.find("system/boot.bin") {
//!     println!("{} bytes at {:#x}", entry.size(), entry.offset());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use resbin_archive as archive;
pub use resbin_common as common;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use resbin_archive::{
        list_paths, DecodeOptions, DirectoryEntry, Error, ErrorKind, Header, ResourceArchive,
    };
    pub use resbin_common::BinaryReader;
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
