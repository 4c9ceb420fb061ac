// src/page/url.rs
// =============================================================================
// This module decides which strings are Wikipedia articles and rewrites them
// into one canonical form.
//
// Every page the search touches is identified by a CanonicalUrl:
//   https://wikipedia.org/wiki/<Title>
// - always https, always the bare wikipedia.org host
// - language subdomains (en., de., fr. ...) are stripped, so the same article
//   reached through two mirrors is one page to the search
// - no fragment and no query string
//
// Two kinds of input reach this module:
// - endpoints: the --start and --target URLs typed by the user (absolute)
// - edges: href attributes found on fetched pages (relative, /wiki/...)
//
// The visited set deduplicates on CanonicalUrl, so any two links that mean the
// same page must come out of here as the same string.
// =============================================================================

use crate::error::UrlError;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use tracing::trace;
use url::Url;

/// Scheme and host every canonical URL starts with.
pub const CANONICAL_ORIGIN: &str = "https://wikipedia.org";

/// Path marker of an article link.
pub const ARTICLE_PREFIX: &str = "/wiki/";

const SITE_DOMAIN: &str = "wikipedia.org";

/// A Wikipedia article URL in canonical form.
///
/// Only this module can build one, so holding a `CanonicalUrl` means the
/// string has already been validated and normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CanonicalUrl(String);

impl CanonicalUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The path part, e.g. `/wiki/Rust_(programming_language)`.
    pub fn path(&self) -> &str {
        &self.as_str()[CANONICAL_ORIGIN.len()..]
    }
}

impl fmt::Display for CanonicalUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for CanonicalUrl {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

// Rewrites a language-specific Wikipedia host to the canonical one
//
// Only the origin changes; the path and anything after it are kept as-is.
// Strings that are not language-subdomain URLs come back unchanged, which also
// makes the function idempotent.
//
// Examples:
//   "https://en.wikipedia.org/wiki/Rust" -> "https://wikipedia.org/wiki/Rust"
//   "http://de.wikipedia.org/wiki/Rust"  -> "https://wikipedia.org/wiki/Rust"
//   "https://wikipedia.org/wiki/Rust"    -> unchanged
//   "/wiki/Rust"                         -> unchanged
pub fn strip_language_subdomain(url: &str) -> String {
    let Some(rest) = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
    else {
        return url.to_string();
    };

    let Some((label, after)) = rest.split_once('.') else {
        return url.to_string();
    };

    // Language codes are 1-3 lowercase letters ("en", "de", "simple" is not one)
    let is_language = (1..=3).contains(&label.len()) && label.bytes().all(|b| b.is_ascii_lowercase());
    if !is_language {
        return url.to_string();
    }

    match after.strip_prefix(SITE_DOMAIN) {
        // The host has to end right after wikipedia.org
        Some(tail) if tail.is_empty() || tail.starts_with(['/', ':', '?', '#']) => {
            format!("{}{}", CANONICAL_ORIGIN, tail)
        }
        _ => url.to_string(),
    }
}

// Validates a start/target URL given by the user
//
// Accepts http(s) URLs on wikipedia.org or any language subdomain of it whose
// path is /wiki/<title> with a non-empty title. Returns the canonical form.
pub fn validate_endpoint(raw: &str) -> Result<CanonicalUrl, UrlError> {
    let raw = raw.trim();
    let invalid = || UrlError::InvalidEndpoint(raw.to_string());

    let parsed = Url::parse(&strip_language_subdomain(raw)).map_err(|_| invalid())?;

    let on_site = matches!(parsed.scheme(), "http" | "https")
        && parsed.host_str() == Some(SITE_DOMAIN)
        && parsed.port().is_none();
    if !on_site {
        return Err(invalid());
    }

    match parsed.path().strip_prefix(ARTICLE_PREFIX) {
        Some(title) if !title.is_empty() => canonicalize(parsed.path()).ok_or_else(invalid),
        _ => Err(invalid()),
    }
}

// Validates an href found on a fetched page
//
// Only relative article links count as edges of the graph:
//   "/wiki/Ferris"            -> https://wikipedia.org/wiki/Ferris
//   "/wiki/Ferris#History"    -> https://wikipedia.org/wiki/Ferris
//   "/wiki/File:Ferris.png"   -> NotAnEdge (namespace prefix)
//   "/w/index.php?title=..."  -> NotAnEdge (not an article path)
//   "https://example.com"     -> NotAnEdge (absolute)
pub fn validate_edge(href: &str) -> Result<CanonicalUrl, UrlError> {
    let not_edge = || UrlError::NotAnEdge(href.to_string());

    let rest = href.strip_prefix(ARTICLE_PREFIX).ok_or_else(not_edge)?;

    // The title ends where the fragment or the query begins
    let title = rest.split(['#', '?']).next().unwrap_or_default();
    if title.is_empty() || has_namespace(title) {
        return Err(not_edge());
    }

    canonicalize(href).ok_or_else(not_edge)
}

// Turns the raw hrefs of one page into its list of graph edges
//
// Raw duplicates are dropped before validation, then canonical duplicates
// ("/wiki/A" and "/wiki/A#Intro") after it. Order of first occurrence is kept.
pub fn edge_links<S: AsRef<str>>(hrefs: &[S]) -> Vec<CanonicalUrl> {
    let mut seen_raw = HashSet::new();
    let mut seen = HashSet::new();

    hrefs
        .iter()
        .map(AsRef::as_ref)
        .filter(|href| seen_raw.insert(*href))
        .filter_map(|href| match validate_edge(href) {
            Ok(url) => Some(url),
            Err(e) => {
                trace!("{}", e);
                None
            }
        })
        .filter(|url| seen.insert(url.clone()))
        .collect()
}

// "File:Ferris.png", "Category:Crabs", "Special:Random", also percent-encoded
fn has_namespace(title: &str) -> bool {
    title.contains(':') || title.to_ascii_uppercase().contains("%3A")
}

// Resolves an article path against the canonical origin
//
// Url::join percent-encodes raw characters and resolves dot segments, so the
// article rules are checked again on the resolved path: "/wiki/.." must not
// turn into the site root. Escapes are then upper-cased ("%c3%a9" -> "%C3%A9").
fn canonicalize(path: &str) -> Option<CanonicalUrl> {
    let mut url = Url::parse(CANONICAL_ORIGIN).ok()?.join(path).ok()?;
    url.set_fragment(None);
    url.set_query(None);

    let title = url.path().strip_prefix(ARTICLE_PREFIX)?;
    if title.is_empty() || has_namespace(title) {
        return None;
    }

    let path = uppercase_escapes(url.path());
    Some(CanonicalUrl(format!("{}{}", CANONICAL_ORIGIN, path)))
}

// Upper-cases the two hex digits of every %XX escape
fn uppercase_escapes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut chars = path.chars();

    while let Some(c) = chars.next() {
        out.push(c);
        if c != '%' {
            continue;
        }

        let escape: String = chars.clone().take(2).collect();
        if escape.len() == 2 && escape.chars().all(|h| h.is_ascii_hexdigit()) {
            out.push_str(&escape.to_ascii_uppercase());
            chars.nth(1);
        }
    }

    out
}
