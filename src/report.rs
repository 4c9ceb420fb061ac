// src/report.rs
// =============================================================================
// Turns a finished search into something to print.
//
// Two formats, like the --json switch of most CLIs:
// - text: "It takes 2 clicks:\n<start> -> (1) <page> -> (2) <target>"
// - JSON: the same facts as one object, for scripts
// =============================================================================

use crate::page::CanonicalUrl;
use crate::search::{Outcome, SearchResult, SearchStats, SearchTree};
use serde::Serialize;

/// Printable summary of one search.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub start: &'a CanonicalUrl,
    pub target: &'a CanonicalUrl,
    pub max_depth: usize,
    pub found: bool,
    /// Only present when a path was found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clicks: Option<usize>,
    pub path: &'a [CanonicalUrl],
    /// Pages scheduled during the search, start page included
    pub pages_discovered: usize,
    /// Article links seen on all processed pages
    pub links_scanned: usize,
    #[serde(flatten)]
    pub stats: SearchStats,
    pub unreachable: &'a [CanonicalUrl],
}

impl<'a> Report<'a> {
    pub fn new(target: &'a CanonicalUrl, max_depth: usize, result: &'a SearchResult) -> Self {
        let (clicks, path) = match &result.outcome {
            Outcome::Found(path) => (Some(path.hops()), path.pages()),
            Outcome::NotFound => (None, &[][..]),
        };

        Self {
            start: result.tree.root().url(),
            target,
            max_depth,
            found: clicks.is_some(),
            clicks,
            path,
            pages_discovered: result.tree.len(),
            links_scanned: links_scanned(&result.tree),
            stats: result.stats,
            unreachable: &result.unreachable,
        }
    }

    // Human-readable report
    //
    // The path (or the not-found hint) comes first; the counters after it.
    pub fn render_text(&self) -> String {
        let mut lines = Vec::new();

        if self.found {
            lines.push(render_path(self.path));
        } else {
            lines.push(format!(
                "❌ Path not found within {} clicks. Try to increase --depth",
                self.max_depth
            ));
        }

        lines.push(String::new());
        lines.push(format!(
            "📄 Processed {} page(s), scanned {} article link(s), discovered {} page(s)",
            self.stats.pages_processed, self.links_scanned, self.pages_discovered
        ));

        if !self.unreachable.is_empty() {
            lines.push(format!(
                "⚠️  {} page(s) could not be fetched and were skipped",
                self.unreachable.len()
            ));
        }

        lines.join("\n")
    }
}

// Article links seen on every processed page, duplicates across pages included
fn links_scanned(tree: &SearchTree) -> usize {
    tree.iter()
        .filter_map(|(_, node)| node.children())
        .map(<[CanonicalUrl]>::len)
        .sum()
}

// Formats a click path
//
// Example:
//   [A, C, T] -> "It takes 2 clicks:\nA -> (1) C -> (2) T"
pub fn render_path(path: &[CanonicalUrl]) -> String {
    let Some((start, hops)) = path.split_first() else {
        return String::new();
    };

    let unit = if hops.len() == 1 { "click" } else { "clicks" };
    let mut parts = vec![format!("It takes {} {}:\n{}", hops.len(), unit, start)];
    for (i, url) in hops.iter().enumerate() {
        parts.push(format!("-> ({}) {}", i + 1, url));
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::validate_endpoint;

    fn wiki(title: &str) -> CanonicalUrl {
        validate_endpoint(&format!("https://en.wikipedia.org/wiki/{title}")).unwrap()
    }

    #[test]
    fn test_render_two_clicks() {
        let text = render_path(&[wiki("A"), wiki("C"), wiki("Target")]);
        assert_eq!(
            text,
            "It takes 2 clicks:\nhttps://wikipedia.org/wiki/A \
             -> (1) https://wikipedia.org/wiki/C \
             -> (2) https://wikipedia.org/wiki/Target"
        );
    }

    #[test]
    fn test_render_one_click() {
        let text = render_path(&[wiki("A"), wiki("B")]);
        assert!(text.starts_with("It takes 1 click:\n"));
        assert!(text.ends_with("-> (1) https://wikipedia.org/wiki/B"));
    }

    #[test]
    fn test_render_empty_path() {
        assert_eq!(render_path(&[]), "");
    }

    fn not_found_result() -> SearchResult {
        SearchResult {
            outcome: Outcome::NotFound,
            tree: SearchTree::with_root(wiki("A")).0,
            stats: SearchStats {
                pages_processed: 1,
                pages_skipped: 0,
                levels: 1,
            },
            unreachable: vec![wiki("B")],
        }
    }

    #[test]
    fn test_not_found_text() {
        let result = not_found_result();
        let target = wiki("Target");
        let text = Report::new(&target, 3, &result).render_text();

        assert!(text.contains("Path not found within 3 clicks"));
        assert!(text.contains("1 page(s) could not be fetched"));
    }

    #[test]
    fn test_found_report() {
        let (mut tree, root) = SearchTree::with_root(wiki("A"));
        tree.attach_children(root, vec![wiki("C"), wiki("D")]);
        let c = tree.push_child(root, wiki("C"));
        let reached = tree.push_child(c, wiki("Target"));
        let path = tree.path_to(tree.get(reached));

        let result = SearchResult {
            outcome: Outcome::Found(path),
            tree,
            stats: SearchStats::default(),
            unreachable: Vec::new(),
        };
        let target = wiki("Target");
        let report = Report::new(&target, 5, &result);

        assert!(report.found);
        assert_eq!(report.clicks, Some(2));
        assert_eq!(report.path, &[wiki("A"), wiki("C"), wiki("Target")]);
        assert_eq!(report.links_scanned, 2);
        assert!(report.render_text().starts_with("It takes 2 clicks:"));
    }

    #[test]
    fn test_not_found_json() {
        let result = not_found_result();
        let target = wiki("Target");
        let json = serde_json::to_value(Report::new(&target, 3, &result)).unwrap();

        assert_eq!(json["start"], "https://wikipedia.org/wiki/A");
        assert_eq!(json["found"], false);
        assert!(json.get("clicks").is_none());
        assert_eq!(json["path"], serde_json::json!([]));
        assert_eq!(json["pages_processed"], 1);
        assert_eq!(json["unreachable"], serde_json::json!(["https://wikipedia.org/wiki/B"]));
    }
}
