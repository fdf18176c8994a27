//! ARC1 archive reader.

use std::fs::File;
use std::path::Path;

use memmap2::Mmap;
use tracing::{debug, instrument, warn};

use crate::directory;
use crate::entry::DirectoryEntry;
use crate::header::{decode_header, Header};
use crate::{DecodeOptions, Result};

/// Decode the directory of an in-memory archive and return its paths.
///
/// This is the whole pipeline in one call: header, directory region,
/// inflation, entry table and string table.
pub fn list_paths(archive: &[u8]) -> Result<Vec<String>> {
    let header = decode_header(archive)?;
    let dcmp = directory::decompress_directory(archive, &header)?;
    directory::parse_directory(&dcmp)
}

/// A decoded ARC1 archive directory.
///
/// Holds the header and the resolved entry list. The archive bytes are only
/// needed while decoding and are not retained.
pub struct ResourceArchive {
    /// Archive file name
    name: String,
    /// Decoded header
    header: Header,
    /// Entries in stored order
    entries: Vec<DirectoryEntry>,
}

impl ResourceArchive {
    /// Open and decode an archive file with default options.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(path, &DecodeOptions::default())
    }

    /// Open and decode an archive file.
    pub fn open_with<P: AsRef<Path>>(path: P, options: &DecodeOptions) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        let mut archive = Self::parse_with(&mmap, options)?;
        archive.name = name;
        Ok(archive)
    }

    /// Decode an in-memory archive with default options.
    pub fn parse(data: &[u8]) -> Result<Self> {
        Self::parse_with(data, &DecodeOptions::default())
    }

    /// Decode an in-memory archive.
    #[instrument(level = "debug", skip(data, options), fields(len = data.len()))]
    pub fn parse_with(data: &[u8], options: &DecodeOptions) -> Result<Self> {
        let header = decode_header(data)?;
        options.check_header(&header)?;

        if header.size as usize != data.len() {
            warn!(
                declared = header.size,
                actual = data.len(),
                "archive size does not match header"
            );
        }

        let dcmp = directory::decompress_directory_with(data, &header, options)?;
        let entries = directory::parse_entries(&dcmp)?;
        debug!(entries = entries.len(), "archive decoded");

        Ok(Self {
            name: String::from("<memory>"),
            header,
            entries,
        })
    }

    /// Unmask and inflate the raw directory of an archive file.
    pub fn read_directory<P: AsRef<Path>>(path: P, options: &DecodeOptions) -> Result<Vec<u8>> {
        let file = File::open(path.as_ref())?;
        let mmap = unsafe { Mmap::map(&file)? };

        let header = decode_header(&mmap)?;
        options.check_header(&header)?;
        directory::decompress_directory_with(&mmap, &header, options)
    }

    /// Get the archive name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the decoded header.
    #[inline]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Get the number of entries.
    #[inline]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// All entries in stored order.
    #[inline]
    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    /// Iterate over entries in stored order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &DirectoryEntry> + '_ {
        self.entries.iter()
    }

    /// Get entry by index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&DirectoryEntry> {
        self.entries.get(index)
    }

    /// Find the first entry with a matching path.
    ///
    /// Matching ignores ASCII case and treats `/` and `\` as the same
    /// separator.
    pub fn find(&self, path: &str) -> Option<&DirectoryEntry> {
        let wanted = normalize(path);
        self.entries
            .iter()
            .find(|e| normalize(e.path()).eq_ignore_ascii_case(&wanted))
    }

    /// Paths of all entries in stored order.
    pub fn paths(&self) -> Vec<&str> {
        self.entries.iter().map(DirectoryEntry::path).collect()
    }
}

fn normalize(path: &str) -> String {
    path.replace('\\', "/")
}

impl std::fmt::Debug for ResourceArchive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceArchive")
            .field("name", &self.name)
            .field("header", &self.header)
            .field("entries", &self.entries.len())
            .finish()
    }
}
