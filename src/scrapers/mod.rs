//! Page extractors and the mode dispatcher.
//!
//! | Mode | Module | Pages | Output |
//! |------|--------|-------|--------|
//! | `whats-new` | [`whats_new`] | What's New index and every version page | rows |
//! | `latest-versions` | [`latest_versions`] | documentation landing page | rows |
//! | `pep` | [`pep`] | PEP numerical index and every PEP card | rows |
//! | `download` | [`download`] | downloads page and the A4 PDF archive | file |
//!
//! Each extractor returns `Ok(None)` when a fetch it cannot do without
//! fails, and `Err` when a page no longer has the expected layout.

use crate::cli::Mode;
use crate::config::Settings;
use crate::error::ParserError;
use crate::http::CachedSession;
use crate::models::{Row, StatusExpectations};

pub mod download;
pub mod latest_versions;
pub mod pep;
pub mod whats_new;

/// Everything an extractor reads besides the session.
#[derive(Debug, Clone)]
pub struct ScrapeContext {
    pub settings: Settings,
    pub expected_status: StatusExpectations,
}

impl ScrapeContext {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            expected_status: StatusExpectations::standard(),
        }
    }
}

/// Run the extractor selected by `mode`.
pub async fn run(
    mode: Mode,
    session: &CachedSession,
    ctx: &ScrapeContext,
) -> Result<Option<Vec<Row>>, ParserError> {
    match mode {
        Mode::WhatsNew => whats_new::whats_new(session, ctx).await,
        Mode::LatestVersions => latest_versions::latest_versions(session, ctx).await,
        Mode::Pep => pep::pep(session, ctx).await,
        Mode::Download => download::download(session, ctx).await.map(|_| None),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::path::Path;
    use url::Url;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Context pointing both site roots at `server`.
    pub fn context(server: &MockServer, base_dir: &Path) -> ScrapeContext {
        let root = Url::parse(&format!("{}/", server.uri())).unwrap();
        ScrapeContext::new(Settings {
            docs_url: root.join("3/").unwrap(),
            pep_url: root.join("peps/").unwrap(),
            base_dir: base_dir.to_path_buf(),
        })
    }

    pub fn session(ctx: &ScrapeContext, mode: Mode) -> CachedSession {
        CachedSession::open(ctx.settings.cache_dir(), mode.as_str()).unwrap()
    }

    pub async fn serve_html(server: &MockServer, route: &str, body: impl Into<String>) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(body.into().into_bytes(), "text/html; charset=utf-8"),
            )
            .mount(server)
            .await;
    }
}
