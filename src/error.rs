// src/error.rs
// =============================================================================
// Error types for the search.
//
// Three layers, from the bottom up:
// - UrlError: a string could not be turned into a canonical Wikipedia URL
// - FetchError: a page could not be downloaded
// - SearchError: the whole run failed
//
// main.rs wraps all of these in anyhow, the same way it wraps any other
// unexpected failure.
// =============================================================================

use thiserror::Error;

/// Raised by the URL canonicalizer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlError {
    /// A user-supplied start/target URL does not point at a Wikipedia article.
    #[error("invalid endpoint <{0}>: expected https://[lang.]wikipedia.org/wiki/<title>")]
    InvalidEndpoint(String),

    /// A discovered href is not a link to another article.
    ///
    /// These are expected on every page and are dropped silently.
    #[error("not an article link: {0}")]
    NotAnEdge(String),
}

/// Raised when a page cannot be fetched.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("could not connect to {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Raised when a search run cannot complete.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("fetch failed, aborting search: {0}")]
    Fetch(#[from] FetchError),

    #[error("search task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("concurrency limiter closed unexpectedly")]
    SlotsClosed(#[from] tokio::sync::AcquireError),
}

pub type Result<T> = std::result::Result<T, SearchError>;
