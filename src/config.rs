//! Settings resolved from the command line.

use std::path::PathBuf;
use url::Url;

use crate::cli::Cli;
use crate::constants::{CACHE_DIR, DOWNLOADS_DIR, LOG_FILE, LOGS_DIR, RESULTS_DIR};
use crate::error::ParserError;

/// Site roots and the working directory every extractor shares.
#[derive(Debug, Clone)]
pub struct Settings {
    pub docs_url: Url,
    pub pep_url: Url,
    pub base_dir: PathBuf,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Result<Self, ParserError> {
        Ok(Self {
            docs_url: Url::parse(&cli.docs_url)?,
            pep_url: Url::parse(&cli.pep_url)?,
            base_dir: PathBuf::from(&cli.base_dir),
        })
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.base_dir.join(CACHE_DIR)
    }

    pub fn downloads_dir(&self) -> PathBuf {
        self.base_dir.join(DOWNLOADS_DIR)
    }

    pub fn results_dir(&self) -> PathBuf {
        self.base_dir.join(RESULTS_DIR)
    }

    pub fn log_file(&self) -> PathBuf {
        self.base_dir.join(LOGS_DIR).join(LOG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_settings_paths() {
        let cli = Cli::parse_from(["pydocs_parser", "pep", "--base-dir", "/tmp/work"]);
        let settings = Settings::from_cli(&cli).unwrap();

        assert_eq!(settings.cache_dir(), PathBuf::from("/tmp/work/http_cache"));
        assert_eq!(settings.downloads_dir(), PathBuf::from("/tmp/work/downloads"));
        assert_eq!(settings.results_dir(), PathBuf::from("/tmp/work/results"));
        assert_eq!(settings.log_file(), PathBuf::from("/tmp/work/logs/parser.log"));
    }

    #[test]
    fn test_settings_rejects_bad_url() {
        let cli = Cli::parse_from(["pydocs_parser", "pep", "--pep-url", "not a url"]);
        assert!(matches!(Settings::from_cli(&cli), Err(ParserError::Url(_))));
    }
}
