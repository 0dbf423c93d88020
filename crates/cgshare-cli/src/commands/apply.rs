//! `cgshare apply` — apply directives from stdin to the cgroup hierarchy.

use std::path::PathBuf;

use cgshare_common::config::CgshareConfig;
use cgshare_common::types::RemovePolicy;
use cgshare_core::cgroup::CgroupFs;
use cgshare_core::{Interpreter, InterpreterOptions};
use clap::Args;

/// Arguments for the `apply` command.
#[derive(Args, Debug, Default)]
pub struct ApplyArgs {
    /// Mount point of the cgroup CPU controller.
    #[arg(long, env = "CGSHARE_CGROUP_ROOT")]
    pub cgroup_root: Option<PathBuf>,

    /// Log what would be done without touching the filesystem.
    #[arg(long)]
    pub dry_run: bool,

    /// Treat `remove` of a missing group as already done.
    #[arg(long)]
    pub ignore_missing: bool,
}

impl ApplyArgs {
    /// Builds an interpreter from these flags and the loaded configuration.
    pub fn interpreter(&self, base: &CgshareConfig) -> Interpreter {
        let root = self
            .cgroup_root
            .clone()
            .unwrap_or_else(|| base.cgroup_root.clone());
        let remove_policy = if self.ignore_missing {
            RemovePolicy::IgnoreMissing
        } else {
            base.remove_policy
        };
        tracing::debug!(
            root = %root.display(),
            %remove_policy,
            dry_run = self.dry_run,
            "interpreter configured"
        );
        Interpreter::new(
            CgroupFs::new(root),
            InterpreterOptions {
                dry_run: self.dry_run,
                remove_policy,
            },
        )
    }
}

/// Executes the `apply` command.
///
/// Per-line failures are logged and do not change the exit status.
///
/// # Errors
///
/// Returns an error only if stdin cannot be read.
pub fn execute(args: &ApplyArgs, config: &CgshareConfig) -> anyhow::Result<()> {
    let interpreter = args.interpreter(config);
    let _ = interpreter.run(std::io::stdin().lock())?;
    Ok(())
}
