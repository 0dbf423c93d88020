//! `cgshare plan` — describe directives without applying them.

use std::io::Write;
use std::path::PathBuf;

use cgshare_common::config::CgshareConfig;
use cgshare_core::cgroup::cpu::read_cpu_shares;
use cgshare_core::directive::parse_directive;
use cgshare_core::input::InputLines;
use cgshare_core::{Action, Interpreter};
use clap::Args;

use super::apply::ApplyArgs;

/// Arguments for the `plan` command.
#[derive(Args, Debug, Default)]
pub struct PlanArgs {
    /// Mount point of the cgroup CPU controller.
    #[arg(long, env = "CGSHARE_CGROUP_ROOT")]
    pub cgroup_root: Option<PathBuf>,
}

/// Writes one plan line per directive read from `input`.
///
/// # Errors
///
/// Returns an error if `input` cannot be read or `out` cannot be written.
pub fn write_plan<R: std::io::BufRead, W: Write>(
    interpreter: &Interpreter,
    input: R,
    mut out: W,
) -> anyhow::Result<()> {
    for line in InputLines::new(input) {
        let line = line?;
        if line.is_ignorable() {
            continue;
        }
        match line.text().and_then(parse_directive) {
            Ok(directive) => {
                let action = interpreter.plan(&directive);
                match action {
                    Action::WriteShares { ref file, .. } => {
                        let current = file
                            .parent()
                            .and_then(|group| read_cpu_shares(group).ok())
                            .map_or_else(|| "unknown".to_owned(), |share| share.to_string());
                        writeln!(out, "{:>4}  {action} (currently {current})", line.number)?;
                    }
                    _ => writeln!(out, "{:>4}  {action}", line.number)?,
                }
            }
            Err(e) => writeln!(out, "{:>4}  error: {e}", line.number)?,
        }
    }
    Ok(())
}

/// Executes the `plan` command.
///
/// # Errors
///
/// Returns an error if stdin cannot be read or stdout cannot be written.
pub fn execute(args: &PlanArgs, config: &CgshareConfig) -> anyhow::Result<()> {
    let apply = ApplyArgs {
        cgroup_root: args.cgroup_root.clone(),
        dry_run: true,
        ..ApplyArgs::default()
    };
    write_plan(
        &apply.interpreter(config),
        std::io::stdin().lock(),
        std::io::stdout().lock(),
    )
}
