//! CLI command definitions and dispatch.

pub mod apply;
pub mod pipeline;
pub mod plan;
pub mod policy;

use std::path::{Path, PathBuf};

use cgshare_common::config::CgshareConfig;
use clap::{Parser, Subcommand};

/// cgshare — redistribute and apply cgroup CPU shares.
#[derive(Parser, Debug)]
#[command(name = "cgshare", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// JSON configuration file. Flags and environment variables override it.
    #[arg(long, global = true, env = "CGSHARE_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Read demand records on stdin and emit score and share directives.
    Policy(policy::PolicyArgs),
    /// Apply directives from stdin to the cgroup hierarchy.
    Apply(apply::ApplyArgs),
    /// Run the policy engine and apply its output in one process.
    Pipeline(pipeline::PipelineArgs),
    /// Show the filesystem action each directive on stdin would perform.
    Plan(plan::PlanArgs),
}

/// Loads the configuration file if one was given, else the defaults.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is invalid.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<CgshareConfig> {
    match path {
        Some(path) => {
            let config = CgshareConfig::from_file(path)?;
            tracing::debug!(path = %path.display(), "configuration loaded");
            Ok(config)
        }
        None => Ok(CgshareConfig::default()),
    }
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if configuration is invalid or a stream fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Policy(args) => policy::execute(&args, &config),
        Command::Apply(args) => apply::execute(&args, &config),
        Command::Pipeline(args) => pipeline::execute(&args, &config),
        Command::Plan(args) => plan::execute(&args, &config),
    }
}
