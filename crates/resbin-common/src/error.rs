//! Error types for resbin-common.

use thiserror::Error;

/// Common error type for low-level buffer reads.
#[derive(Debug, Error)]
pub enum Error {
    /// End of buffer reached while reading.
    #[error("unexpected end of buffer: needed {needed} bytes but only {available} available")]
    UnexpectedEof { needed: usize, available: usize },

    /// A read was requested at a position past the end of the buffer.
    #[error("offset {offset} is outside a buffer of {len} bytes")]
    OffsetOutOfRange { offset: usize, len: usize },

    /// A length computation overflowed `usize`.
    #[error("length overflow: {count} items of {item_size} bytes")]
    LengthOverflow { count: usize, item_size: usize },

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Missing null terminator in string.
    #[error("string missing null terminator")]
    MissingNullTerminator,
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
