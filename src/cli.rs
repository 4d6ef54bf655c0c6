//! Command-line interface definitions.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Locations of the scraped sites and the working directory can also be
//! provided through environment variables.

use clap::{Parser, ValueEnum};
use std::fmt;

use crate::constants::{MAIN_DOC_URL, PEP_URL};

/// Report to produce.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Links, headings and authors of every "What's New" page
    WhatsNew,
    /// Documentation links for every Python version with its status
    LatestVersions,
    /// Download the A4 PDF documentation archive
    Download,
    /// Count PEPs per status
    Pep,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::WhatsNew => "whats-new",
            Mode::LatestVersions => "latest-versions",
            Mode::Download => "download",
            Mode::Pep => "pep",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the rows of a report are emitted.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputKind {
    /// Render a table on the console
    Pretty,
    /// Save a CSV file under the results directory
    File,
}

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// pydocs_parser whats-new
/// pydocs_parser pep -o pretty
/// pydocs_parser latest-versions -c -o file
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Parser mode
    #[arg(value_enum)]
    pub mode: Mode,

    /// Clear the HTTP cache before running
    #[arg(short, long)]
    pub clear_cache: bool,

    /// Additional output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputKind>,

    /// Directory holding the cache, downloads, results and logs
    #[arg(long, env = "PYDOCS_BASE_DIR", default_value = ".")]
    pub base_dir: String,

    /// Root of the Python documentation
    #[arg(long, env = "PYDOCS_DOCS_URL", default_value = MAIN_DOC_URL)]
    pub docs_url: String,

    /// Root of the PEP index
    #[arg(long, env = "PYDOCS_PEP_URL", default_value = PEP_URL)]
    pub pep_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["pydocs_parser", "latest-versions", "--clear-cache", "--output", "file"]);

        assert_eq!(cli.mode, Mode::LatestVersions);
        assert!(cli.clear_cache);
        assert_eq!(cli.output, Some(OutputKind::File));
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["pydocs_parser", "pep", "-c", "-o", "pretty"]);

        assert_eq!(cli.mode, Mode::Pep);
        assert!(cli.clear_cache);
        assert_eq!(cli.output, Some(OutputKind::Pretty));
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["pydocs_parser", "whats-new"]);

        assert!(!cli.clear_cache);
        assert_eq!(cli.output, None);
        assert_eq!(cli.docs_url, MAIN_DOC_URL);
        assert_eq!(cli.pep_url, PEP_URL);
    }

    #[test]
    fn test_cli_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["pydocs_parser", "changelog"]).is_err());
        assert!(Cli::try_parse_from(["pydocs_parser", "pep", "-o", "json"]).is_err());
    }

    #[test]
    fn test_mode_names_match_cli_values() {
        for mode in Mode::value_variants() {
            let parsed = Cli::parse_from(["pydocs_parser", mode.as_str()]);
            assert_eq!(parsed.mode, *mode);
        }
    }
}
