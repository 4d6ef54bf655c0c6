//! Console table with the header row as field names.

use itertools::Itertools;
use std::io::{self, Write};

use crate::models::Row;

/// Column widths in characters across every row.
fn widths(rows: &[Row]) -> Vec<usize> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    (0..columns)
        .map(|i| {
            rows.iter()
                .filter_map(|r| r.get(i))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect()
}

fn separator(widths: &[usize]) -> String {
    format!("+{}+", widths.iter().map(|w| "-".repeat(w + 2)).join("+"))
}

fn line(row: &Row, widths: &[usize]) -> String {
    let mut cells = widths.iter().enumerate().map(|(i, w)| {
        let cell = row.get(i).map(String::as_str).unwrap_or("");
        let pad = w - cell.chars().count();
        format!(" {}{} ", cell, " ".repeat(pad))
    });
    format!("|{}|", cells.join("|"))
}

/// Write a left-aligned table; the first row becomes the heading.
pub fn write_table<W: Write>(mut w: W, rows: &[Row]) -> io::Result<()> {
    let Some((header, body)) = rows.split_first() else {
        return Ok(());
    };
    let widths = widths(rows);
    let rule = separator(&widths);

    writeln!(w, "{rule}")?;
    writeln!(w, "{}", line(header, &widths))?;
    writeln!(w, "{rule}")?;
    for row in body {
        writeln!(w, "{}", line(row, &widths))?;
    }
    writeln!(w, "{rule}")
}
