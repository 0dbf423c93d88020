//! # cgshare — cgroup CPU share control
//!
//! Policy engine and command interpreter for cgroup v1 CPU shares.
//! Both stages read lines on stdin and write directives on stdout, so
//! `cgshare policy | cgshare apply` is the usual composition.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used, clippy::panic))]

mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use crate::commands::Cli;

/// Builds the log filter from a `RUST_LOG`-style spec.
///
/// Without a spec, warnings stay visible so skipped lines and failed
/// filesystem calls are always reported on stderr.
fn env_filter(spec: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(spec.unwrap_or_default())
}

fn main() -> anyhow::Result<()> {
    let spec = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(spec.as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    commands::execute(cli)
}
