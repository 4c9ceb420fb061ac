// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (to stderr, so stdout only carries the result)
// 3. Check that both URLs point at Wikipedia articles
// 4. Run the search and print the report
// 5. Exit with proper code (0 = path found, 1 = no path, 2 = error)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; // src/cli.rs - command-line parsing
mod error; // src/error.rs - error types
mod page; // src/page/ - URLs, HTML links and HTTP fetching
mod report; // src/report.rs - text and JSON output
mod search; // src/search/ - the concurrent breadth-first search

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use page::{validate_endpoint, WikiClient};
use report::Report;
use search::PathFinder;
use std::sync::Arc;
use tracing::debug;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// The main application logic
// Returns:
//   Ok(0) = a path was found
//   Ok(1) = no path within the depth limit
//   Err = bad input or the search itself failed
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let start = validate_endpoint(&cli.start).context("Invalid starting URL")?;
    let target = validate_endpoint(&cli.target).context("Invalid URL to look for")?;
    let config = cli.search_config();
    debug!("{:?}", config);

    if !cli.json {
        println!("🔍 Looking for a path from {} to {}", start, target);
        println!("📊 Max depth: {}, concurrent fetches: {}", config.max_depth, config.max_concurrency);
    }

    let client = WikiClient::new(cli.client_config()).context("Failed to create HTTP client")?;
    let max_depth = config.max_depth;
    let finder = PathFinder::new(Arc::new(client), config);

    let result = finder.find(start, target.clone()).await?;
    let report = Report::new(&target, max_depth, &result);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!();
        println!("{}", report.render_text());
    }

    Ok(if result.path().is_some() { 0 } else { 1 })
}
