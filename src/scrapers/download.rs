//! A4 PDF documentation archive download.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use std::path::PathBuf;
use tokio::fs;
use tracing::{info, instrument};
use url::Url;

use super::ScrapeContext;
use crate::error::ParserError;
use crate::html::{Attr, find_tag, href};
use crate::http::{CachedSession, get_response};

static PDF_A4_ZIP: Lazy<Regex> = Lazy::new(|| Regex::new(r".+pdf-a4\.zip$").expect("valid regex"));

/// Save the archive under `downloads/`, replacing a previous copy.
///
/// Returns the written path, or `None` when a page could not be fetched.
#[instrument(level = "info", skip_all)]
pub async fn download(session: &CachedSession, ctx: &ScrapeContext) -> Result<Option<PathBuf>, ParserError> {
    let downloads_url = ctx.settings.docs_url.join("download.html")?;
    let Some(page) = get_response(session, &downloads_url).await else {
        return Ok(None);
    };
    let archive_url = parse_archive_url(&page.text(), &downloads_url)?;
    let filename = archive_filename(&archive_url);

    let downloads_dir = ctx.settings.downloads_dir();
    fs::create_dir_all(&downloads_dir).await?;
    let archive_path = downloads_dir.join(filename);

    let Some(archive) = get_response(session, &archive_url).await else {
        return Ok(None);
    };
    fs::write(&archive_path, archive.bytes()).await?;
    info!(path = %archive_path.display(), "Archive downloaded and saved");

    Ok(Some(archive_path))
}

fn parse_archive_url(html: &str, base: &Url) -> Result<Url, ParserError> {
    let document = Html::parse_document(html);
    let main = find_tag(document.root_element(), "div", &[Attr::Exact("role", "main")])?;
    let table = find_tag(main, "table", &[Attr::Classes("docutils")])?;
    let link = find_tag(table, "a", &[Attr::Matches("href", &*PDF_A4_ZIP)])?;
    Ok(base.join(href(link))?)
}

/// Last path segment of the archive URL.
fn archive_filename(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty())
        .unwrap_or("archive.zip")
        .to_string()
}
