// src/search/mod.rs
// =============================================================================
// This module searches for the shortest click-path between two pages.
//
// Features:
// - Breadth-first search, one level at a time
// - A fixed number of pages fetched concurrently
// - Stops everything as soon as the target is found
// - Configurable depth limit and fetch-failure policy
//
// Submodules:
// - node: search nodes, the tree they form, path reconstruction
// - state: visited set, next-level queue and result slot shared by the tasks
// - bfs: the level-by-level driver and the per-page task
// =============================================================================

mod bfs;
mod node;
mod state;

// Re-export the public search API
pub use bfs::{FetchPolicy, Outcome, PathFinder, SearchConfig, SearchResult, SearchStats};
pub use node::SearchTree;
