//! Cached HTTP fetching.
//!
//! Every successful response body is stored on disk under the cache
//! directory, one file per URL, so later runs skip the network until the
//! cache is cleared with `--clear-cache`.

use reqwest::{Client, StatusCode};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::{debug, error, instrument, warn};
use url::Url;

use crate::error::ParserError;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Longest wait for any single read; large archives may take far longer
/// than this overall.
const READ_TIMEOUT: Duration = Duration::from_secs(30);

/// A fetched page, from the network or from the cache.
#[derive(Debug, Clone)]
pub struct Page {
    pub url: Url,
    pub status: StatusCode,
    pub body: Vec<u8>,
    pub from_cache: bool,
}

impl Page {
    /// Body decoded as UTF-8 regardless of what the server declared.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.body
    }
}

/// Flat on-disk response cache keyed by request URL.
#[derive(Debug, Clone)]
pub struct HttpCache {
    dir: PathBuf,
}

impl HttpCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, url: &Url) -> PathBuf {
        self.dir.join(urlencoding::encode(url.as_str()).as_ref())
    }

    pub async fn load(&self, url: &Url) -> Option<Vec<u8>> {
        fs::read(self.entry_path(url)).await.ok()
    }

    pub async fn store(&self, url: &Url, body: &[u8]) -> Result<(), ParserError> {
        fs::create_dir_all(&self.dir).await?;
        fs::write(self.entry_path(url), body).await?;
        Ok(())
    }

    /// Drop every cached response.
    #[instrument(level = "info", skip_all, fields(dir = %self.dir.display()))]
    pub async fn clear(&self) -> Result<(), ParserError> {
        match fs::remove_dir_all(&self.dir).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        fs::create_dir_all(&self.dir).await?;
        tracing::info!("HTTP cache cleared");
        Ok(())
    }
}

/// HTTP client bound to a cache and to the mode it fetches for.
#[derive(Debug, Clone)]
pub struct CachedSession {
    client: Client,
    cache: HttpCache,
    mode: &'static str,
}

impl CachedSession {
    pub fn open(cache_dir: impl Into<PathBuf>, mode: &'static str) -> Result<Self, ParserError> {
        Self::with_read_timeout(cache_dir, mode, READ_TIMEOUT)
    }

    pub fn with_read_timeout(
        cache_dir: impl Into<PathBuf>,
        mode: &'static str,
        read_timeout: Duration,
    ) -> Result<Self, ParserError> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .read_timeout(read_timeout)
            .build()?;
        Ok(Self {
            client,
            cache: HttpCache::new(cache_dir),
            mode,
        })
    }

    pub fn cache(&self) -> &HttpCache {
        &self.cache
    }

    pub fn mode(&self) -> &'static str {
        self.mode
    }

    /// GET `url`, answering from the cache when an entry exists.
    ///
    /// Only transport failures are errors; a body that cannot be cached is
    /// still returned.
    pub async fn get(&self, url: &Url) -> Result<Page, ParserError> {
        if let Some(body) = self.cache.load(url).await {
            debug!(%url, "Cache hit");
            return Ok(Page {
                url: url.clone(),
                status: StatusCode::OK,
                body,
                from_cache: true,
            });
        }

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();
        debug!(%url, %status, bytes = body.len(), "Fetched");

        if status.is_success() {
            if let Err(e) = self.cache.store(url, &body).await {
                warn!(%url, error = %e, "Response not cached");
            }
        }

        Ok(Page {
            url: url.clone(),
            status,
            body,
            from_cache: false,
        })
    }
}

/// Fetch `url`, logging and swallowing transport failures.
///
/// Callers decide whether a `None` aborts the run or skips one item.
#[instrument(level = "debug", skip(session), fields(mode = session.mode()))]
pub async fn get_response(session: &CachedSession, url: &Url) -> Option<Page> {
    match session.get(url).await {
        Ok(page) => {
            if !page.status.is_success() {
                warn!(url = %page.url, status = %page.status, mode = session.mode(), "Unexpected status");
            }
            debug!(url = %page.url, from_cache = page.from_cache, "Page loaded");
            Some(page)
        }
        Err(e) => {
            error!(%url, mode = session.mode(), error = %e, "Failed to load page");
            None
        }
    }
}
