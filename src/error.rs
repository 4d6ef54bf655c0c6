//! Error taxonomy shared by the fetcher, the node locator and the extractors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParserError {
    /// The page no longer matches the layout the extractor expects.
    #[error("tag <{tag}> with {attrs} not found")]
    TagNotFound { tag: String, attrs: String },

    #[error("list with Python versions not found in the sidebar")]
    VersionsListNotFound,

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}
