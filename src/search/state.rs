// src/search/state.rs
// =============================================================================
// The state shared by every page task of one search.
//
// Two pieces, guarded differently:
// - Frontier: the node tree, the visited set and the next-level queue, all
//   behind ONE mutex so that "is it visited?" and "queue it" happen together
// - the result slot: a OnceLock holding the node that matched the target;
//   OnceLock::set is an atomic exactly-once write, so when several tasks see
//   the target at the same time only one of them wins
//
// The mutex is never held across a network call; tasks take it only for the
// short bookkeeping steps below.
// =============================================================================

use super::node::{NodeId, SearchNode, SearchTree};
use crate::page::CanonicalUrl;
use std::collections::HashSet;
use std::sync::OnceLock;
use tokio::sync::Mutex;

#[derive(Debug)]
struct Frontier {
    tree: SearchTree,
    visited: HashSet<CanonicalUrl>,
    next: Vec<NodeId>,
}

#[derive(Debug)]
pub(crate) struct SearchState {
    frontier: Mutex<Frontier>,
    found: OnceLock<SearchNode>,
}

impl SearchState {
    /// Fresh state for a search from `start`; the start page counts as visited.
    pub(crate) fn new(start: CanonicalUrl) -> (Self, NodeId) {
        let (tree, root) = SearchTree::with_root(start.clone());
        let state = Self {
            frontier: Mutex::new(Frontier {
                tree,
                visited: HashSet::from([start]),
                next: Vec::new(),
            }),
            found: OnceLock::new(),
        };
        (state, root)
    }

    /// URL and depth of a scheduled node.
    pub(crate) async fn node(&self, id: NodeId) -> (CanonicalUrl, usize) {
        let frontier = self.frontier.lock().await;
        let node = frontier.tree.get(id);
        (node.url().clone(), node.depth())
    }

    pub(crate) async fn attach_children(&self, id: NodeId, children: Vec<CanonicalUrl>) {
        self.frontier.lock().await.tree.attach_children(id, children);
    }

    // Queues `url` for the next level unless some task already did
    //
    // Returns the new node, or None when the URL was visited before. The first
    // task to get here keeps its node as the parent.
    pub(crate) async fn enqueue(&self, parent: NodeId, url: CanonicalUrl) -> Option<NodeId> {
        let mut frontier = self.frontier.lock().await;

        if frontier.visited.contains(&url) {
            return None;
        }
        frontier.visited.insert(url.clone());

        let id = frontier.tree.push_child(parent, url);
        frontier.next.push(id);
        Some(id)
    }

    /// Hands over the queued level and starts an empty one.
    pub(crate) async fn take_next_level(&self) -> Vec<NodeId> {
        std::mem::take(&mut self.frontier.lock().await.next)
    }

    /// Tries to store the node that reached the target. True for the one winner.
    pub(crate) fn try_finish(&self, node: SearchNode) -> bool {
        self.found.set(node).is_ok()
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.found.get().is_some()
    }

    /// Moves the tree out and returns it with the winning node, if any.
    pub(crate) async fn finish(&self) -> (SearchTree, Option<SearchNode>) {
        let tree = std::mem::take(&mut self.frontier.lock().await.tree);
        (tree, self.found.get().cloned())
    }
}
