//! Rendering of extractor rows.
//!
//! - [`pretty`]: left-aligned console table
//! - [`csv`]: CSV report under the results directory
//!
//! Without an output flag rows are printed on stdout, cells separated by a
//! single space.

use std::io::{self, Write};
use std::path::PathBuf;

use crate::cli::{Mode, OutputKind};
use crate::config::Settings;
use crate::error::ParserError;
use crate::models::Row;

pub mod csv;
pub mod pretty;

/// Emit `rows` (header first) to the target chosen on the command line.
///
/// Returns the CSV path when a file was written.
pub fn control_output(
    rows: &[Row],
    output: Option<OutputKind>,
    mode: Mode,
    settings: &Settings,
) -> Result<Option<PathBuf>, ParserError> {
    let stdout = io::stdout();
    match output {
        Some(OutputKind::Pretty) => {
            pretty::write_table(stdout.lock(), rows)?;
            Ok(None)
        }
        Some(OutputKind::File) => csv::save(rows, mode, &settings.results_dir()).map(Some),
        None => {
            default_output(stdout.lock(), rows)?;
            Ok(None)
        }
    }
}

fn default_output<W: Write>(mut w: W, rows: &[Row]) -> io::Result<()> {
    for row in rows {
        writeln!(w, "{}", row.join(" "))?;
    }
    Ok(())
}
