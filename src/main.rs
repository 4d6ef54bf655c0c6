//! # pydocs_parser
//!
//! Collects structured information published on docs.python.org and
//! peps.python.org and prints it as text, a console table or a CSV file.
//!
//! ## Modes
//!
//! - `whats-new`: link, heading and editors of every "What's New" page
//! - `latest-versions`: documentation link and status for each Python version
//! - `download`: saves the A4 PDF documentation archive under `downloads/`
//! - `pep`: number of PEPs per status, with a total
//!
//! ## Usage
//!
//! ```sh
//! pydocs_parser pep -o pretty
//! pydocs_parser whats-new --clear-cache --output file
//! ```
//!
//! Responses are cached on disk under `http_cache/`, so repeated runs only
//! hit the network after `--clear-cache`.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};

mod cli;
mod config;
mod constants;
mod error;
mod html;
mod http;
mod logging;
mod models;
mod outputs;
mod scrapers;

use cli::Cli;
use config::Settings;
use http::CachedSession;
use scrapers::ScrapeContext;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::parse();
    let settings = Settings::from_cli(&args)?;
    logging::init(&settings.log_file())?;

    let start_time = std::time::Instant::now();
    info!("Parser started");
    info!(?args, "Command line arguments");

    let session = CachedSession::open(settings.cache_dir(), args.mode.as_str())?;
    if args.clear_cache {
        session.cache().clear().await?;
    }

    let ctx = ScrapeContext::new(settings);
    let results = match scrapers::run(args.mode, &session, &ctx).await {
        Ok(results) => results,
        Err(e) => {
            error!(mode = %args.mode, error = %e, "Parser stopped");
            return Err(e.into());
        }
    };

    match results {
        Some(rows) if !rows.is_empty() => {
            debug!(rows = rows.len(), "Rendering results");
            outputs::control_output(&rows, args.output, args.mode, &ctx.settings)?;
        }
        _ => debug!("No rows to render"),
    }

    let elapsed = start_time.elapsed();
    info!(?elapsed, "Parser finished");
    Ok(())
}
