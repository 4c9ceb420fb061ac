// src/search/node.rs
// =============================================================================
// Search nodes and the tree they form.
//
// Every page the search schedules becomes one SearchNode. Nodes live in a
// single append-only Vec (the SearchTree) and point to their parent by index,
// never by reference:
//
//   index:   0        1        2        3
//   node:   [Crab] <- [Shell] <- [Lime] [Claw]
//   parent:  -        0        1        0
//
// Indices keep ownership simple (the tree owns every node, a parent link can
// never dangle) and make walking back to the root a plain loop.
// =============================================================================

use crate::page::CanonicalUrl;
use serde::Serialize;

/// Position of a node in its SearchTree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(usize);

/// One discovered page.
#[derive(Debug, Clone, Serialize)]
pub struct SearchNode {
    url: CanonicalUrl,
    parent: Option<NodeId>,
    depth: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    children: Option<Vec<CanonicalUrl>>,
}

impl SearchNode {
    pub(crate) fn new(url: CanonicalUrl, parent: Option<NodeId>, depth: usize) -> Self {
        Self {
            url,
            parent,
            depth,
            children: None,
        }
    }

    pub fn url(&self) -> &CanonicalUrl {
        &self.url
    }

    /// The node that discovered this one; `None` for the start page.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Number of clicks from the start page.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Article links found on the page, once it has been processed.
    pub fn children(&self) -> Option<&[CanonicalUrl]> {
        self.children.as_deref()
    }
}

/// Arena owning every node scheduled during one search.
#[derive(Debug, Default, Serialize)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
}

impl SearchTree {
    /// A tree holding only the start page, at depth 0.
    pub(crate) fn with_root(url: CanonicalUrl) -> (Self, NodeId) {
        let tree = Self {
            nodes: vec![SearchNode::new(url, None, 0)],
        };
        (tree, NodeId(0))
    }

    /// Appends a node one level below `parent`.
    pub(crate) fn push_child(&mut self, parent: NodeId, url: CanonicalUrl) -> NodeId {
        let depth = self.get(parent).depth + 1;
        let id = NodeId(self.nodes.len());
        self.nodes.push(SearchNode::new(url, Some(parent), depth));
        id
    }

    /// Records the links of a processed page. Only the first call has an effect.
    pub(crate) fn attach_children(&mut self, id: NodeId, children: Vec<CanonicalUrl>) {
        let node = &mut self.nodes[id.0];
        if node.children.is_none() {
            node.children = Some(children);
        }
    }

    // Ids are only handed out by this tree and nodes are never removed,
    // so indexing cannot go out of bounds.
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }

    pub fn root(&self) -> &SearchNode {
        &self.nodes[0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SearchNode)> {
        self.nodes.iter().enumerate().map(|(i, node)| (NodeId(i), node))
    }

    // Rebuilds the click path ending at `node`
    //
    // `node` does not have to be stored in the tree: the page that matched the
    // target is kept outside of it, only its parent link points in here.
    pub fn path_to(&self, node: &SearchNode) -> ClickPath {
        let mut pages = vec![node.url().clone()];
        let mut next = node.parent();

        while let Some(id) = next {
            let ancestor = self.get(id);
            pages.push(ancestor.url().clone());
            next = ancestor.parent();
        }

        pages.reverse();
        ClickPath(pages)
    }
}

/// Ordered pages from the start page to the target, both included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClickPath(Vec<CanonicalUrl>);

impl ClickPath {
    pub fn pages(&self) -> &[CanonicalUrl] {
        &self.0
    }

    /// Number of clicks needed, i.e. pages minus one.
    pub fn hops(&self) -> usize {
        self.0.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::validate_endpoint;

    fn wiki(title: &str) -> CanonicalUrl {
        validate_endpoint(&format!("https://en.wikipedia.org/wiki/{title}")).unwrap()
    }

    #[test]
    fn test_root_only_path() {
        let (tree, root) = SearchTree::with_root(wiki("Crab"));
        let path = tree.path_to(tree.get(root));

        assert_eq!(path.pages(), &[wiki("Crab")]);
        assert_eq!(path.hops(), 0);
    }

    #[test]
    fn test_children_get_parent_depth_plus_one() {
        let (mut tree, root) = SearchTree::with_root(wiki("Crab"));
        let shell = tree.push_child(root, wiki("Shell"));
        let lime = tree.push_child(shell, wiki("Lime"));

        assert_eq!(tree.get(shell).depth(), 1);
        assert_eq!(tree.get(lime).depth(), 2);
        assert_eq!(tree.get(lime).parent(), Some(shell));
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_path_to_detached_terminal_node() {
        let (mut tree, root) = SearchTree::with_root(wiki("Crab"));
        let _claw = tree.push_child(root, wiki("Claw"));
        let shell = tree.push_child(root, wiki("Shell"));
        let terminal = SearchNode::new(wiki("Lime"), Some(shell), 2);

        let path = tree.path_to(&terminal);

        assert_eq!(path.pages(), &[wiki("Crab"), wiki("Shell"), wiki("Lime")]);
        assert_eq!(path.hops(), 2);
    }

    #[test]
    fn test_children_attach_once() {
        let (mut tree, root) = SearchTree::with_root(wiki("Crab"));
        tree.attach_children(root, vec![wiki("Shell")]);
        tree.attach_children(root, vec![wiki("Claw")]);

        assert_eq!(tree.root().children(), Some(&[wiki("Shell")][..]));
    }
}
