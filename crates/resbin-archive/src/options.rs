//! Decoding options.

use crate::{Error, Header, Result};

/// Knobs controlling how strictly an archive is decoded.
///
/// The defaults only check what decoding itself requires. Every check here
/// is opt-in.
///
/// # Example
///
/// ```
/// use resbin_archive::DecodeOptions;
///
/// let options = DecodeOptions::new()
///     .require_signature(true)
///     .max_directory_size(Some(64 << 20));
/// assert!(options.requires_signature());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    require_signature: bool,
    strict_sizes: bool,
    max_directory_size: Option<usize>,
}

impl DecodeOptions {
    /// Options with every optional check disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject headers whose signature is not `ARC1`.
    pub fn require_signature(mut self, enabled: bool) -> Self {
        self.require_signature = enabled;
        self
    }

    /// Read only `compressed_size` bytes of the directory region, and fail if
    /// that region runs past the end of the archive.
    pub fn strict_sizes(mut self, enabled: bool) -> Self {
        self.strict_sizes = enabled;
        self
    }

    /// Cap the inflated directory size.
    pub fn max_directory_size(mut self, limit: Option<usize>) -> Self {
        self.max_directory_size = limit;
        self
    }

    /// Whether the `ARC1` signature is enforced.
    #[inline]
    pub fn requires_signature(&self) -> bool {
        self.require_signature
    }

    /// Whether the directory region is limited to `compressed_size`.
    #[inline]
    pub fn is_strict(&self) -> bool {
        self.strict_sizes
    }

    /// Maximum inflated directory size, if capped.
    #[inline]
    pub fn directory_limit(&self) -> Option<usize> {
        self.max_directory_size
    }

    /// Apply the header-level checks.
    pub fn check_header(&self, header: &Header) -> Result<()> {
        if self.require_signature && !header.has_known_signature() {
            return Err(Error::SignatureMismatch {
                expected: Header::MAGIC,
                actual: header.signature,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(signature: [u8; 4]) -> Header {
        Header {
            signature,
            size: 0,
            offset: 0,
            compressed_size: 0,
        }
    }

    #[test]
    fn test_defaults_accept_any_signature() {
        assert!(DecodeOptions::default()
            .check_header(&header(*b"XXXX"))
            .is_ok());
    }

    #[test]
    fn test_required_signature() {
        let options = DecodeOptions::new().require_signature(true);
        assert!(options.check_header(&header(*b"ARC1")).is_ok());

        let err = options.check_header(&header(*b"ARC2")).unwrap_err();
        assert!(matches!(
            err,
            Error::SignatureMismatch { actual, .. } if actual == *b"ARC2"
        ));
    }
}
