//! Fixed URLs, formats and the PEP status expectation table.

/// Landing page of the Python 3 documentation.
pub const MAIN_DOC_URL: &str = "https://docs.python.org/3/";

/// Index of Python Enhancement Proposals.
pub const PEP_URL: &str = "https://peps.python.org/";

/// `strftime` pattern used for log timestamps and result file names.
pub const DT_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

pub const CACHE_DIR: &str = "http_cache";
pub const DOWNLOADS_DIR: &str = "downloads";
pub const RESULTS_DIR: &str = "results";
pub const LOGS_DIR: &str = "logs";
pub const LOG_FILE: &str = "parser.log";

/// One-letter status code from the PEP index mapped to the statuses a PEP
/// card may legitimately show. The empty code covers drafts.
pub const EXPECTED_STATUS: &[(&str, &[&str])] = &[
    ("A", &["Active", "Accepted"]),
    ("D", &["Deferred"]),
    ("F", &["Final"]),
    ("P", &["Provisional"]),
    ("R", &["Rejected"]),
    ("S", &["Superseded"]),
    ("W", &["Withdrawn"]),
    ("", &["Draft", "Active"]),
];
