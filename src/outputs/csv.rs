//! CSV reports under the results directory.

use chrono::Local;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::cli::Mode;
use crate::constants::DT_FORMAT;
use crate::error::ParserError;
use crate::models::Row;

const SEP: char = ',';

fn needs_quotes(field: &str) -> bool {
    field.contains(SEP) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV row to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[String]) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first {
            write!(w, "{SEP}")?;
        } else {
            first = false;
        }
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{cell}")?;
        }
    }
    writeln!(w)
}

/// `<mode>_<timestamp>.csv`
pub fn file_name(mode: Mode) -> String {
    format!("{}_{}.csv", mode, Local::now().format(DT_FORMAT))
}

/// Write `rows` to a fresh file in `results_dir` and return its path.
pub fn save(rows: &[Row], mode: Mode, results_dir: &Path) -> Result<PathBuf, ParserError> {
    fs::create_dir_all(results_dir)?;
    let path = results_dir.join(file_name(mode));
    let mut w = BufWriter::new(File::create(&path)?);
    for row in rows {
        write_row(&mut w, row)?;
    }
    w.flush()?;
    info!(path = %path.display(), "Results file saved");
    Ok(path)
}
