//! "What's New" release notes.
//!
//! Walks the table of contents of `whatsnew/` and visits every per-version
//! page, collecting its heading and the editor/author block. A version page
//! that fails to load is skipped; the rest of the run continues.

use indicatif::ProgressIterator;
use scraper::Html;
use tracing::{info, instrument, warn};
use url::Url;

use super::ScrapeContext;
use crate::error::ParserError;
use crate::html::{Attr, find_all, find_tag, href, text_of};
use crate::http::{CachedSession, get_response};
use crate::logging;
use crate::models::{Row, row};

pub const HEADER: [&str; 3] = ["Article link", "Heading", "Editor, author"];

#[instrument(level = "info", skip_all)]
pub async fn whats_new(
    session: &CachedSession,
    ctx: &ScrapeContext,
) -> Result<Option<Vec<Row>>, ParserError> {
    let whats_new_url = ctx.settings.docs_url.join("whatsnew/")?;
    let Some(page) = get_response(session, &whats_new_url).await else {
        return Ok(None);
    };
    let version_links = parse_index(&page.text(), &whats_new_url)?;
    info!(count = version_links.len(), "Indexed What's New pages");

    let mut results = vec![row(HEADER)];
    let progress = logging::progress(version_links.len());
    for version_link in version_links.into_iter().progress_with(progress.bar()) {
        let Some(page) = get_response(session, &version_link).await else {
            warn!(url = %version_link, "Skipping version page");
            continue;
        };
        let (heading, editor) = parse_version_page(&page.text())?;
        results.push(row([version_link.to_string(), heading, editor]));
    }

    Ok(Some(results))
}

/// Absolute links of the per-version pages, in table-of-contents order.
fn parse_index(html: &str, base: &Url) -> Result<Vec<Url>, ParserError> {
    let document = Html::parse_document(html);
    let main_section = find_tag(
        document.root_element(),
        "section",
        &[Attr::Exact("id", "what-s-new-in-python")],
    )?;
    let toctree = find_tag(main_section, "div", &[Attr::Classes("toctree-wrapper")])?;

    find_all(toctree, "li", &[Attr::Classes("toctree-l1")])
        .map(|section| -> Result<Url, ParserError> {
            let link = find_tag(section, "a", &[Attr::Has("href")])?;
            Ok(base.join(href(link))?)
        })
        .collect()
}

/// Top heading and the definition list flattened onto one line.
fn parse_version_page(html: &str) -> Result<(String, String), ParserError> {
    let document = Html::parse_document(html);
    let root = document.root_element();
    let heading = text_of(find_tag(root, "h1", &[])?);
    let editor = text_of(find_tag(root, "dl", &[])?).replace('\n', " ");
    Ok((heading.trim().to_string(), editor.trim().to_string()))
}
