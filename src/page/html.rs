// src/page/html.rs
// =============================================================================
// This module extracts links from Wikipedia article HTML.
//
// Only the article body counts. Wikipedia wraps it in:
//   <div id="bodyContent"> ... </div>
// Everything outside (sidebar, header, footer, language menu) links to the
// same handful of pages from every article and would make every page one
// click away from "Main_Page".
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// The hrefs are returned raw. Deciding which of them are article links is the
// job of page::url.
// =============================================================================

use scraper::{Html, Selector};

/// CSS selector of the article body container.
pub const CONTENT_SELECTOR: &str = "div#bodyContent";

// Extracts every href inside the article body
//
// Parameters:
//   html: the page HTML (borrowed as &str)
//
// Returns: Vec<String> of raw href values in document order, empty ones
// skipped. A page without a body container yields no links.
//
// Example:
//   html = "<div id='bodyContent'><a href='/wiki/Crab'>Crab</a></div>"
//   result = ["/wiki/Crab"]
pub fn extract_content_links(html: &str) -> Vec<String> {
    // Parse the HTML into a document
    let document = Html::parse_document(html);

    // Both selectors are constants and known to be valid,
    // so unwrap() can only fail on a programmer error
    let content_selector = Selector::parse(CONTENT_SELECTOR).unwrap();
    let link_selector = Selector::parse("a[href]").unwrap();

    let Some(content) = document.select(&content_selector).next() else {
        return Vec::new();
    };

    content
        .select(&link_selector)
        .filter_map(|element| element.value().attr("href"))
        .filter(|href| !href.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_body_links() {
        let html = r#"
            <div id="bodyContent">
                <a href="/wiki/Crab">Crab</a>
                <p>See <a href="/wiki/Lobster#Diet">lobster</a>.</p>
            </div>
        "#;
        assert_eq!(extract_content_links(html), vec!["/wiki/Crab", "/wiki/Lobster#Diet"]);
    }

    #[test]
    fn test_skip_links_outside_body() {
        let html = r#"
            <div id="mw-navigation"><a href="/wiki/Main_Page">Main page</a></div>
            <div id="bodyContent"><a href="/wiki/Crab">Crab</a></div>
            <footer><a href="/wiki/Wikipedia:About">About</a></footer>
        "#;
        assert_eq!(extract_content_links(html), vec!["/wiki/Crab"]);
    }

    #[test]
    fn test_skip_empty_href() {
        let html = r#"<div id="bodyContent"><a href="">x</a><a>y</a><a href="/wiki/Crab">z</a></div>"#;
        assert_eq!(extract_content_links(html), vec!["/wiki/Crab"]);
    }

    #[test]
    fn test_no_body_container() {
        let html = r#"<html><body><a href="/wiki/Crab">Crab</a></body></html>"#;
        assert!(extract_content_links(html).is_empty());
    }
}
