//! Data shared between the extractors and the output renderer.
//!
//! - [`Row`]: one line of a report; the first row of every report is its header
//! - [`StatusExpectations`]: PEP index codes mapped to acceptable card statuses
//! - [`MismatchRecord`]: a PEP card status compared against its index code
//! - [`StatusTally`]: per-status counters kept in first-encounter order

use std::collections::HashMap;
use std::fmt;

use crate::constants::EXPECTED_STATUS;

/// Ordered display cells of one report line.
pub type Row = Vec<String>;

/// Build a [`Row`] from anything string-like.
pub fn row<I, S>(cells: I) -> Row
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    cells.into_iter().map(Into::into).collect()
}

/// Immutable lookup from a PEP index status code to the statuses its card
/// may show. Codes missing from the table fall back to the draft entry.
#[derive(Debug, Clone)]
pub struct StatusExpectations {
    table: HashMap<String, Vec<String>>,
    fallback: Vec<String>,
}

impl StatusExpectations {
    /// Table published by the PEP index legend.
    pub fn standard() -> Self {
        let table: HashMap<String, Vec<String>> = EXPECTED_STATUS
            .iter()
            .map(|(code, statuses)| {
                (
                    code.to_string(),
                    statuses.iter().map(|s| s.to_string()).collect(),
                )
            })
            .collect();
        let fallback = table.get("").cloned().unwrap_or_default();
        Self { table, fallback }
    }

    /// Expected statuses for `code`; empty or unknown codes yield the
    /// Draft/Active set.
    pub fn expected(&self, code: &str) -> &[String] {
        self.table.get(code).unwrap_or(&self.fallback)
    }
}

/// A status read from a PEP card, with what the index promised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MismatchRecord {
    pub url_detail: String,
    pub status_detail: String,
    pub status_table: Vec<String>,
}

impl fmt::Display for MismatchRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mismatched statuses:")?;
        writeln!(f, "{}", self.url_detail)?;
        writeln!(f, "Status on card: {}", self.status_detail)?;
        write!(f, "Expected statuses: {:?}", self.status_table)
    }
}

/// Counters keyed by status, iterated in the order statuses were first seen.
#[derive(Debug, Default)]
pub struct StatusTally {
    counts: Vec<(String, usize)>,
}

impl StatusTally {
    pub fn increment(&mut self, status: &str) {
        match self.counts.iter().position(|(s, _)| s == status) {
            Some(i) => self.counts[i].1 += 1,
            None => self.counts.push((status.to_string(), 1)),
        }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(s, c)| (s.as_str(), *c))
    }
}
