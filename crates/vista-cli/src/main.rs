// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Vista CLI entrypoint.
//!
//! Drives the view applicator against the simulated camera engine:
//! `check` validates a view-set file, `tour` applies every view in order,
//! `go` applies one view plus optional manual adjustments, `export` writes
//! the collection merged with the current camera, and `prefs` shows or
//! changes saved viewer preferences.
//!
//! Output goes to stdout; logs and notices go to stderr.

// The CLI is expected to print to stdout/stderr.
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;
mod output;
mod session;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Cli::parse();
    cli::run(args).await
}
