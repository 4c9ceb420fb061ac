// src/page/mod.rs
// =============================================================================
// This module turns a Wikipedia URL into the list of pages it links to.
//
// Submodules:
// - url: canonical URL form and the rules for which links are graph edges
// - html: pulls the hrefs out of the article body
// - http: downloads pages (WikiClient)
//
// The search only sees the LinkSource trait below, so tests can plug in an
// in-memory graph instead of the network.
// =============================================================================

mod html;
mod http;
pub mod url;

use crate::error::FetchError;
use futures::future::BoxFuture;

pub use http::{ClientConfig, WikiClient, DEFAULT_TIMEOUT};
pub use self::url::{edge_links, validate_endpoint, CanonicalUrl};

/// Something that can list the outbound hrefs of a page.
///
/// Returns raw href strings exactly as found; canonicalizing and filtering
/// them is left to the caller.
pub trait LinkSource: Send + Sync {
    fn links<'a>(&'a self, url: &'a CanonicalUrl) -> BoxFuture<'a, Result<Vec<String>, FetchError>>;
}
