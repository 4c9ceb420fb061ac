// src/search/bfs.rs
// =============================================================================
// This module finds the shortest click-path with a breadth-first search.
//
// How it works:
// 1. Start with the start page as the only page of level 0
// 2. Fetch every page of the current level concurrently (bounded by a
//    semaphore), extract its article links, queue the unseen ones for the
//    next level
// 3. Wait for the WHOLE level to finish before starting the next one
// 4. Stop as soon as a page links to the target, when the next level is
//    empty, or when the depth limit is reached
//
// Why level by level?
// - A page is only fetched after every page one click closer to the start
//   has been fetched, so the first path found is a shortest one
// - The price: one slow page holds up the next level
//
// Stopping early:
// - The task that finds the target raises a CancellationToken
// - Tasks check it before fetching and before each link they look at
// - Fetches already in flight are not interrupted, they finish or time out
// =============================================================================

use super::node::{ClickPath, NodeId, SearchNode, SearchTree};
use super::state::SearchState;
use crate::error::{FetchError, Result};
use crate::page::{edge_links, CanonicalUrl, LinkSource};
use clap::ValueEnum;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// What to do when a page cannot be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FetchPolicy {
    /// Stop the whole search and report the error
    #[default]
    Abort,
    /// Treat the page as a dead end and keep searching
    Skip,
}

/// Search settings. `Default` matches the command-line defaults.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Longest path, in clicks, the search looks for.
    pub max_depth: usize,
    /// Pages fetched at the same time.
    pub max_concurrency: usize,
    /// Pause after each fetched page, taken while still holding the fetch slot.
    pub delay: Duration,
    pub fetch_policy: FetchPolicy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            max_concurrency: 5,
            delay: Duration::from_millis(600),
            fetch_policy: FetchPolicy::Abort,
        }
    }
}

impl SearchConfig {
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_max_concurrency(mut self, concurrency: usize) -> Self {
        // Zero permits would never let a single fetch through
        self.max_concurrency = concurrency.max(1);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_fetch_policy(mut self, policy: FetchPolicy) -> Self {
        self.fetch_policy = policy;
        self
    }
}

/// How the search ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Found(ClickPath),
    /// No path within the depth limit (or the reachable graph ran out).
    NotFound,
}

/// Counters collected during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Pages fetched and scanned for links.
    pub pages_processed: usize,
    /// Tasks that saw the stop signal before fetching anything.
    pub pages_skipped: usize,
    /// Levels started, the start page being level 0.
    pub levels: usize,
}

/// Everything a finished search hands back.
#[derive(Debug)]
pub struct SearchResult {
    pub outcome: Outcome,
    /// Every page that was scheduled, with its parent links.
    pub tree: SearchTree,
    pub stats: SearchStats,
    /// Pages skipped after a fetch failure (FetchPolicy::Skip only).
    pub unreachable: Vec<CanonicalUrl>,
}

impl SearchResult {
    pub fn path(&self) -> Option<&ClickPath> {
        match &self.outcome {
            Outcome::Found(path) => Some(path),
            Outcome::NotFound => None,
        }
    }
}

/// Runs shortest-path searches over any LinkSource.
pub struct PathFinder<S> {
    source: Arc<S>,
    config: SearchConfig,
}

// Shared, read-only context of one run, cloned (as an Arc) into every task
struct TaskContext<S> {
    source: Arc<S>,
    state: Arc<SearchState>,
    target: CanonicalUrl,
    max_depth: usize,
    delay: Duration,
    fetch_policy: FetchPolicy,
    stop: CancellationToken,
}

// What a single page task did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageOutcome {
    /// The stop signal was already raised, nothing fetched
    Skipped,
    /// Links scanned, new pages queued
    Expanded,
    /// This task stored the path to the target
    Reached,
}

// A page task whose fetch failed
#[derive(Debug)]
struct PageFailure {
    url: CanonicalUrl,
    error: FetchError,
}

impl<S: LinkSource + 'static> PathFinder<S> {
    pub fn new(source: Arc<S>, config: SearchConfig) -> Self {
        Self { source, config }
    }

    // Searches for the shortest path from `start` to `target`
    //
    // Returns Ok for both outcomes (found / not found). Err means the run
    // itself broke: a fetch failed under FetchPolicy::Abort, or a task panicked.
    pub async fn find(&self, start: CanonicalUrl, target: CanonicalUrl) -> Result<SearchResult> {
        info!(
            "Searching {} -> {} (max depth {}, {} concurrent fetches)",
            start, target, self.config.max_depth, self.config.max_concurrency
        );

        let (state, root) = SearchState::new(start.clone());
        let state = Arc::new(state);
        let mut stats = SearchStats::default();
        let mut unreachable = Vec::new();

        // Zero clicks: nothing to fetch
        if start == target {
            state.try_finish(SearchNode::new(target, None, 0));
            return Ok(Self::collect(&state, stats, unreachable).await);
        }

        let stop = CancellationToken::new();
        let slots = Arc::new(Semaphore::new(self.config.max_concurrency));
        let ctx = Arc::new(TaskContext {
            source: Arc::clone(&self.source),
            state: Arc::clone(&state),
            target,
            max_depth: self.config.max_depth,
            delay: self.config.delay,
            fetch_policy: self.config.fetch_policy,
            stop: stop.clone(),
        });

        let mut level = vec![root];
        let mut depth = 0;

        // Pages of depth `max_depth` are only compared with the target,
        // never fetched, so expansion stops one level earlier
        while !level.is_empty() && depth < self.config.max_depth {
            stats.levels += 1;
            info!("[d {}] Processing {} page(s)", depth, level.len());

            let mut tasks = JoinSet::new();
            for id in level {
                // Wait for a free slot, unless the search is already over
                let permit = tokio::select! {
                    biased;
                    _ = stop.cancelled() => break,
                    permit = Arc::clone(&slots).acquire_owned() => permit?,
                };
                tasks.spawn(process_page(Arc::clone(&ctx), id, permit));
            }

            // Level barrier: every task of this level finishes before the next starts
            let mut failure = None;
            while let Some(joined) = tasks.join_next().await {
                match joined? {
                    Ok(PageOutcome::Skipped) => stats.pages_skipped += 1,
                    Ok(PageOutcome::Expanded | PageOutcome::Reached) => stats.pages_processed += 1,
                    Err(PageFailure { url, error }) => match self.config.fetch_policy {
                        FetchPolicy::Abort => {
                            failure.get_or_insert(error);
                        }
                        FetchPolicy::Skip => {
                            warn!("Skipping {}: {}", url, error);
                            unreachable.push(url);
                        }
                    },
                }
            }

            if let Some(error) = failure {
                return Err(error.into());
            }
            if state.is_finished() {
                break;
            }

            level = state.take_next_level().await;
            info!(
                "[d {}] Processed {} page(s) so far, {} queued for the next level",
                depth,
                stats.pages_processed,
                level.len()
            );
            depth += 1;
        }

        Ok(Self::collect(&state, stats, unreachable).await)
    }

    async fn collect(
        state: &SearchState,
        stats: SearchStats,
        unreachable: Vec<CanonicalUrl>,
    ) -> SearchResult {
        let (tree, found) = state.finish().await;
        let outcome = match found {
            Some(node) => Outcome::Found(tree.path_to(&node)),
            None => Outcome::NotFound,
        };

        SearchResult {
            outcome,
            tree,
            stats,
            unreachable,
        }
    }
}

// Processes one page of the current level
//
// The semaphore permit is held for the whole task, politeness delay included,
// and released when the task returns, whatever the outcome.
async fn process_page<S: LinkSource>(
    ctx: Arc<TaskContext<S>>,
    id: NodeId,
    _permit: OwnedSemaphorePermit,
) -> std::result::Result<PageOutcome, PageFailure> {
    if ctx.stop.is_cancelled() {
        return Ok(PageOutcome::Skipped);
    }

    let (url, depth) = ctx.state.node(id).await;

    let hrefs = match ctx.source.links(&url).await {
        Ok(hrefs) => hrefs,
        Err(error) => {
            // Under Abort, pages still waiting for a slot should not start
            if ctx.fetch_policy == FetchPolicy::Abort {
                ctx.stop.cancel();
            }
            return Err(PageFailure { url, error });
        }
    };

    let links = edge_links(&hrefs);
    debug!("[d {}] Processed {}, got {} links", depth, url, links.len());
    ctx.state.attach_children(id, links.clone()).await;

    let mut outcome = PageOutcome::Expanded;
    for link in links {
        if ctx.stop.is_cancelled() {
            break;
        }

        if link == ctx.target {
            let node = SearchNode::new(link, Some(id), depth + 1);
            if ctx.state.try_finish(node) {
                info!("Found target on {} at depth {}", url, depth + 1);
                ctx.stop.cancel();
                outcome = PageOutcome::Reached;
            }
            break;
        }

        // Links at the depth limit could only ever be compared with the target
        if depth + 1 < ctx.max_depth {
            ctx.state.enqueue(id, link).await;
        }
    }

    if !ctx.delay.is_zero() && !ctx.stop.is_cancelled() {
        tokio::time::sleep(ctx.delay).await;
    }

    Ok(outcome)
}
