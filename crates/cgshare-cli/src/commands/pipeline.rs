//! `cgshare pipeline` — policy pass and interpreter in one process.
//!
//! The emitted directives are echoed to stdout so the score still reaches
//! an external aggregator.

use std::io::{Cursor, Write};

use cgshare_common::config::CgshareConfig;
use cgshare_core::RunReport;
use cgshare_policy::{PolicyEngine, PolicyReport};
use clap::Args;

use super::apply::ApplyArgs;
use super::policy::PolicyArgs;

/// Arguments for the `pipeline` command.
#[derive(Args, Debug, Default)]
pub struct PipelineArgs {
    /// Policy engine flags.
    #[command(flatten)]
    pub policy: PolicyArgs,

    /// Interpreter flags.
    #[command(flatten)]
    pub apply: ApplyArgs,
}

/// Runs both stages over `input`, echoing directives to `echo`.
///
/// # Errors
///
/// Returns an error if configuration is invalid or a stream fails.
pub fn run_pipeline<R: std::io::BufRead, W: Write>(
    args: &PipelineArgs,
    config: &CgshareConfig,
    input: R,
    mut echo: W,
) -> anyhow::Result<(PolicyReport, RunReport)> {
    let engine = PolicyEngine::new(args.policy.policy_config(config)?);
    let mut directives = Vec::new();
    let policy_report = engine.run(input, &mut directives)?;

    echo.write_all(&directives)?;
    echo.flush()?;

    let run_report = args.apply.interpreter(config).run(Cursor::new(directives))?;
    Ok((policy_report, run_report))
}

/// Executes the `pipeline` command.
///
/// # Errors
///
/// Returns an error if configuration is invalid or stdin/stdout fail.
pub fn execute(args: &PipelineArgs, config: &CgshareConfig) -> anyhow::Result<()> {
    let (policy_report, run_report) = run_pipeline(
        args,
        config,
        std::io::stdin().lock(),
        std::io::stdout().lock(),
    )?;
    tracing::info!(policy = %policy_report, apply = %run_report, "pipeline finished");
    Ok(())
}
