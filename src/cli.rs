// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// One command, no subcommands:
//
//   wikipath --start <URL> --target <URL> [--depth N] [-c N] [--json] ...
//
// The flags map onto two settings structs:
// - SearchConfig: depth limit, concurrency, politeness delay, failure policy
// - ClientConfig: request timeout and an optional origin override
// =============================================================================

use crate::page::{ClientConfig, DEFAULT_TIMEOUT};
use crate::search::{FetchPolicy, SearchConfig};
use clap::{ArgAction, Parser};
use std::time::Duration;
use tracing::Level;
use url::Url;

// The whole CLI
//
// #[derive(Parser)] generates the parsing code; the doc comments on each
// field become the --help text.
#[derive(Parser, Debug)]
#[command(
    name = "wikipath",
    version = "0.1.0",
    about = "Finds the shortest click-path between two Wikipedia articles",
    long_about = "wikipath follows the links in the body of Wikipedia articles, level by level, \
                  until it reaches the target article. The path it prints is a shortest one: \
                  no path with fewer clicks exists within the pages it explored."
)]
pub struct Cli {
    /// Article to start from (e.g., https://en.wikipedia.org/wiki/Crab)
    #[arg(long, value_name = "URL")]
    pub start: String,

    /// Article to look for
    #[arg(long, value_name = "URL")]
    pub target: String,

    /// Maximum number of clicks in the path
    ///
    /// Pages N clicks away are compared with the target but never fetched,
    /// so --depth N explores N-1 levels of links. Depth 0 only matches when
    /// start and target are the same article
    #[arg(long, default_value_t = 5)]
    pub depth: usize,

    /// Number of pages fetched at the same time (1-64)
    #[arg(short, long, default_value_t = 5, value_parser = clap::value_parser!(u16).range(1..=64))]
    pub concurrency: u16,

    /// Timeout for one page request, in seconds
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout: u64,

    /// Pause after each fetched page, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 600)]
    pub delay_ms: u64,

    /// What to do when a page cannot be fetched
    #[arg(long, value_enum, default_value_t = FetchPolicy::Abort)]
    pub on_fetch_error: FetchPolicy,

    /// Fetch pages from this origin instead of https://wikipedia.org
    ///
    /// Paths stay the same; useful with a local mirror
    #[arg(long, value_name = "URL")]
    pub origin: Option<Url>,

    /// Output the result as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// More logging (-v: debug, -vv: trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig::default()
            .with_max_depth(self.depth)
            .with_max_concurrency(usize::from(self.concurrency))
            .with_delay(Duration::from_millis(self.delay_ms))
            .with_fetch_policy(self.on_fetch_error)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.timeout),
            origin: self.origin.clone(),
        }
    }

    // Log level for the subscriber
    //
    // JSON output is meant for scripts, so progress lines are silenced
    // unless -v asks for them explicitly.
    pub fn log_level(&self) -> Level {
        match (self.verbose, self.json) {
            (0, true) => Level::WARN,
            (0, false) => Level::INFO,
            (1, _) => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}
