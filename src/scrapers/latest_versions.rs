//! Documentation links for every Python version listed in the sidebar.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use tracing::{info, instrument};
use url::Url;

use super::ScrapeContext;
use crate::cli::Mode;
use crate::error::ParserError;
use crate::html::{Attr, find_all, find_tag, href, text_of};
use crate::http::{CachedSession, get_response};
use crate::models::{Row, row};

pub const HEADER: [&str; 3] = ["Documentation link", "Version", "Status"];

static VERSION_STATUS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Python (?P<version>\d\.\d+) \((?P<status>.*)\)").expect("valid regex"));

/// Scrape the "All versions" list of the documentation landing page.
///
/// Opens its own session over the cache directory instead of reusing the
/// caller's, so the caller's session is only used for its cache location.
#[instrument(level = "info", skip_all)]
pub async fn latest_versions(
    session: &CachedSession,
    ctx: &ScrapeContext,
) -> Result<Option<Vec<Row>>, ParserError> {
    let session = CachedSession::open(session.cache().dir(), Mode::LatestVersions.as_str())?;
    let Some(page) = get_response(&session, &ctx.settings.docs_url).await else {
        return Ok(None);
    };

    let mut results = vec![row(HEADER)];
    for (link, text) in parse_sidebar(&page.text(), &ctx.settings.docs_url)? {
        let (version, status) = split_version_status(&text);
        results.push(row([link.to_string(), version, status]));
    }
    info!(count = results.len() - 1, "Collected Python versions");

    Ok(Some(results))
}

/// Links and their texts from the first sidebar list mentioning "All versions".
fn parse_sidebar(html: &str, base: &Url) -> Result<Vec<(Url, String)>, ParserError> {
    let document = Html::parse_document(html);
    let sidebar = find_tag(
        document.root_element(),
        "div",
        &[Attr::Classes("sphinxsidebarwrapper")],
    )?;
    let versions_list = find_all(sidebar, "ul", &[])
        .find(|ul| text_of(*ul).contains("All versions"))
        .ok_or_else(|| {
            tracing::error!("Python versions list not found");
            ParserError::VersionsListNotFound
        })?;

    find_all(versions_list, "a", &[Attr::Has("href")])
        .map(|a| -> Result<(Url, String), ParserError> { Ok((base.join(href(a))?, text_of(a))) })
        .collect()
}

/// `"Python 3.12 (stable)"` becomes `("3.12", "stable")`; any other text is
/// kept whole as the version with an empty status.
pub fn split_version_status(text: &str) -> (String, String) {
    match VERSION_STATUS.captures(text) {
        Some(caps) => (caps["version"].to_string(), caps["status"].to_string()),
        None => (text.to_string(), String::new()),
    }
}
