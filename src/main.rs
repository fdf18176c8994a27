//! Resbin CLI - Command-line tool for inspecting ARC1 resource archives.
//!
//! This is the main entry point for the resbin command-line application.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing::{debug, warn};

use resbin::prelude::*;

mod logs;

/// Resbin - ARC1 resource archive inspection tool
#[derive(Parser, Debug)]
#[command(name = "resbin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v warn, -vv info, -vvv debug, -vvvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Reject archives whose signature is not ARC1
    #[arg(long, global = true)]
    require_signature: bool,

    /// Only read the declared compressed directory size
    #[arg(long, global = true)]
    strict_sizes: bool,

    /// Maximum inflated directory size in bytes
    #[arg(long, global = true, value_name = "BYTES")]
    max_directory_size: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the paths stored in an archive
    List {
        /// Path to the archive
        #[arg(short, long, env = "RESBIN_INPUT")]
        input: PathBuf,

        /// Filter pattern (glob-style)
        #[arg(short, long)]
        filter: Option<String>,

        /// Only list paths with this extension
        #[arg(short, long)]
        extension: Option<String>,

        /// Show payload offsets and sizes
        #[arg(short, long)]
        detailed: bool,

        /// Print entries as JSON
        #[arg(long, conflicts_with = "detailed")]
        json: bool,
    },

    /// Show the decoded archive header
    Header {
        /// Path to the archive
        #[arg(short, long, env = "RESBIN_INPUT")]
        input: PathBuf,
    },

    /// Write the unmasked, inflated directory to a file
    DumpDirectory {
        /// Path to the archive
        #[arg(short, long, env = "RESBIN_INPUT")]
        input: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let logs_on = logs::from_env()?;

    let cli = Cli::parse();

    if logs_on {
        if cli.verbose > 0 {
            warn!("RUST_LOG is set, ignoring -v");
        }
    } else {
        logs::from_verbosity(cli.verbose);
    }

    debug!(?cli, "got arguments");

    let options = DecodeOptions::new()
        .require_signature(cli.require_signature)
        .strict_sizes(cli.strict_sizes)
        .max_directory_size(cli.max_directory_size);

    match cli.command {
        Commands::List {
            input,
            filter,
            extension,
            detailed,
            json,
        } => {
            let filter = ListFilter {
                pattern: filter.as_deref(),
                extension: extension.as_deref(),
            };
            cmd_list(&input, &options, &filter, detailed, json)?;
        }
        Commands::Header { input } => {
            cmd_header(&input, &options)?;
        }
        Commands::DumpDirectory { input, output } => {
            cmd_dump_directory(&input, &output, &options)?;
        }
    }

    Ok(())
}

/// Path filters for `list`.
#[derive(Debug, Default)]
struct ListFilter<'a> {
    pattern: Option<&'a str>,
    extension: Option<&'a str>,
}

impl ListFilter<'_> {
    fn matches(&self, entry: &DirectoryEntry) -> bool {
        let pattern_ok = self
            .pattern
            .map_or(true, |pattern| glob_match(pattern, entry.path()));
        let extension_ok = self.extension.map_or(true, |wanted| {
            entry
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted.trim_start_matches('.')))
        });
        pattern_ok && extension_ok
    }
}

fn cmd_list(
    input: &Path,
    options: &DecodeOptions,
    filter: &ListFilter<'_>,
    detailed: bool,
    json: bool,
) -> Result<()> {
    let start = Instant::now();
    let archive = ResourceArchive::open_with(input, options)
        .with_context(|| format!("Failed to open archive {}", input.display()))?;
    debug!(entries = archive.entry_count(), elapsed = ?start.elapsed(), "archive loaded");

    let entries: Vec<&DirectoryEntry> = archive
        .iter()
        .filter(|e| filter.matches(e))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for entry in &entries {
        if detailed {
            let range = entry.payload_range();
            println!(
                "{:>#12x} {:>#12x} {:>10} {}",
                range.start,
                range.end,
                entry.size(),
                entry.path()
            );
        } else {
            println!("{}", entry.path());
        }
    }

    if detailed {
        println!("\nTotal: {} entries", entries.len());
    }

    Ok(())
}

fn cmd_header(input: &Path, options: &DecodeOptions) -> Result<()> {
    let data = fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let header = resbin::archive::decode_header(&data).context("Failed to decode header")?;
    options.check_header(&header).context("Header rejected")?;

    println!(
        "signature:       {}{}",
        header.signature_display(),
        if header.has_known_signature() {
            ""
        } else {
            " (unknown)"
        }
    );
    println!("size:            {} (file is {} bytes)", header.size, data.len());
    println!("offset:          {:#x}", header.offset);
    println!("compressed size: {}", header.compressed_size);

    Ok(())
}

fn cmd_dump_directory(input: &Path, output: &Path, options: &DecodeOptions) -> Result<()> {
    let directory = ResourceArchive::read_directory(input, options)
        .with_context(|| format!("Failed to read directory of {}", input.display()))?;

    fs::write(output, &directory)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "Wrote {} directory bytes to {}",
        directory.len(),
        output.display()
    );

    Ok(())
}

/// Match an archive path against a `*`-wildcard pattern.
///
/// Matching ignores ASCII case and treats `\` as `/`. A pattern without `*`
/// matches any path containing it.
fn glob_match(pattern: &str, path: &str) -> bool {
    let pattern = pattern.to_ascii_lowercase().replace('\\', "/");
    let path = path.to_ascii_lowercase().replace('\\', "/");

    if !pattern.contains('*') {
        return path.contains(&pattern);
    }

    let parts: Vec<&str> = pattern.split('*').collect();
    let last = parts.len() - 1;
    let mut pos = 0;

    for (i, part) in parts.iter().enumerate() {
        if part.is_empty() {
            continue;
        }

        if i == 0 {
            if !path.starts_with(part) {
                return false;
            }
            pos = part.len();
        } else if i == last {
            return path.len() >= pos + part.len() && path[pos..].ends_with(part);
        } else if let Some(found) = path[pos..].find(part) {
            pos += found + part.len();
        } else {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_substring() {
        assert!(glob_match("map001", "Field/MAP001.dat"));
        assert!(!glob_match("map002", "Field/MAP001.dat"));
    }

    #[test]
    fn test_glob_wildcards() {
        assert!(glob_match("field/*.dat", "Field/Map001.dat"));
        assert!(glob_match("field\\*.dat", "Field/Map001.dat"));
        assert!(!glob_match("field/*.dat", "Field/Map001.dat.bak"));
        assert!(glob_match("*.ogg", "bgm/01.ogg"));
        assert!(glob_match("bgm/*", "bgm/01.ogg"));
        assert!(!glob_match("bgm/*", "sfx/01.ogg"));
        assert!(glob_match("*/*1*", "bgm/01.ogg"));
    }

    #[test]
    fn test_glob_suffix_not_reused() {
        // the suffix must come after the prefix, not overlap it
        assert!(!glob_match("ab*ba", "aba"));
        assert!(glob_match("ab*ba", "abba"));
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "resbin",
            "-vv",
            "--strict-sizes",
            "list",
            "--input",
            "resources.bin",
            "--filter",
            "*.dat",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert!(cli.strict_sizes);
        assert!(matches!(
            cli.command,
            Commands::List { ref filter, detailed: false, json: false, .. } if filter.as_deref() == Some("*.dat")
        ));
    }

    #[test]
    fn test_cli_extension_filter() {
        let cli =
            Cli::try_parse_from(["resbin", "list", "-i", "resources.bin", "-e", ".ogg"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::List { ref extension, .. } if extension.as_deref() == Some(".ogg")
        ));
    }

    #[test]
    fn test_header_honours_require_signature() {
        let header = Header {
            signature: *b"XXXX",
            size: 16,
            offset: 16,
            compressed_size: 0,
        };
        let masked = resbin::archive::unmask(&header.to_bytes(), 0);
        let path = std::env::temp_dir().join(format!("resbin-cli-header-{}.bin", std::process::id()));
        fs::write(&path, &masked).unwrap();

        let lenient = cmd_header(&path, &DecodeOptions::new());
        let strict = cmd_header(&path, &DecodeOptions::new().require_signature(true));
        fs::remove_file(&path).unwrap();

        assert!(lenient.is_ok());
        assert!(strict.is_err());
    }

    #[test]
    fn test_cli_json_conflicts_with_detailed() {
        let result = Cli::try_parse_from([
            "resbin", "list", "-i", "resources.bin", "--json", "--detailed",
        ]);
        assert!(result.is_err());
    }
}
