//! Command interpreter: one cgroup mutation per directive line.
//!
//! Lines are independent. A malformed line or a failed filesystem call is
//! logged and counted, then the stream continues. Only a broken input
//! stream ends a run early.

use std::fmt;
use std::io::BufRead;
use std::path::PathBuf;

use cgshare_common::constants::{CPU_SHARES_FILE, TASKS_FILE};
use cgshare_common::error::Result;
use cgshare_common::types::{RemovePolicy, Share};

use crate::cgroup::CgroupFs;
use crate::directive::{Directive, parse_directive};
use crate::input::InputLines;

/// Behavior switches for an [`Interpreter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InterpreterOptions {
    /// Log and count actions without touching the filesystem.
    pub dry_run: bool,
    /// Handling of `remove` on a missing directory.
    pub remove_policy: RemovePolicy,
}

/// The filesystem effect of a single directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Create a directory and its parents.
    CreateDir(PathBuf),
    /// Remove an empty directory.
    RemoveDir(PathBuf),
    /// Append a task id to a `tasks` file.
    AppendTask {
        /// Target `tasks` file.
        file: PathBuf,
        /// Task id to append.
        task: u32,
    },
    /// Overwrite a `cpu.shares` file.
    WriteShares {
        /// Target `cpu.shares` file.
        file: PathBuf,
        /// Share weight to write.
        share: Share,
    },
    /// No filesystem effect (score directives).
    Ignore,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateDir(path) => write!(f, "create directory {}", path.display()),
            Self::RemoveDir(path) => write!(f, "remove directory {}", path.display()),
            Self::AppendTask { file, task } => write!(f, "append {task} to {}", file.display()),
            Self::WriteShares { file, share } => write!(f, "write {share} to {}", file.display()),
            Self::Ignore => write!(f, "no filesystem effect"),
        }
    }
}

/// Per-run counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Lines read, including skipped ones.
    pub lines: usize,
    /// Directives whose action succeeded (or would have, in a dry run).
    pub applied: usize,
    /// Blank, comment, and score lines.
    pub skipped: usize,
    /// Lines that did not parse.
    pub parse_errors: usize,
    /// Directives whose filesystem call failed.
    pub fs_errors: usize,
}

impl RunReport {
    /// Total number of failed lines.
    pub const fn failures(&self) -> usize {
        self.parse_errors + self.fs_errors
    }

    /// Returns `true` if no line failed.
    pub const fn is_clean(&self) -> bool {
        self.failures() == 0
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} line(s): {} applied, {} skipped, {} parse error(s), {} filesystem error(s)",
            self.lines, self.applied, self.skipped, self.parse_errors, self.fs_errors
        )
    }
}

/// Applies directives against a cgroup hierarchy.
#[derive(Debug, Clone)]
pub struct Interpreter {
    fs: CgroupFs,
    options: InterpreterOptions,
}

impl Interpreter {
    /// Creates an interpreter over the given hierarchy.
    pub const fn new(fs: CgroupFs, options: InterpreterOptions) -> Self {
        Self { fs, options }
    }

    /// Returns the hierarchy this interpreter writes to.
    pub const fn cgroup_fs(&self) -> &CgroupFs {
        &self.fs
    }

    /// Describes what `directive` would do, without doing it.
    pub fn plan(&self, directive: &Directive) -> Action {
        match directive {
            Directive::Create { subsystem, group } => {
                Action::CreateDir(self.fs.group_path(subsystem, group))
            }
            Directive::Remove { subsystem, group } => {
                Action::RemoveDir(self.fs.group_path(subsystem, group))
            }
            Directive::Add {
                subsystem,
                group,
                task,
            } => Action::AppendTask {
                file: self.fs.group_path(subsystem, group).join(TASKS_FILE),
                task: *task,
            },
            Directive::SetLimit {
                subsystem,
                group,
                share,
            } => Action::WriteShares {
                file: self.fs.group_path(subsystem, group).join(CPU_SHARES_FILE),
                share: *share,
            },
            Directive::Score(_) => Action::Ignore,
        }
    }

    /// Performs the filesystem action for one directive.
    ///
    /// # Errors
    ///
    /// Returns an error carrying the offending path if the filesystem
    /// call fails.
    pub fn apply(&self, directive: &Directive) -> Result<Action> {
        let action = self.plan(directive);
        if self.options.dry_run {
            tracing::info!(%action, "dry run");
            return Ok(action);
        }

        let path = match directive {
            Directive::Create { subsystem, group } => self.fs.create_group(subsystem, group)?,
            Directive::Remove { subsystem, group } => {
                self.fs
                    .remove_group(subsystem, group, self.options.remove_policy)?
            }
            Directive::Add {
                subsystem,
                group,
                task,
            } => self.fs.add_task(subsystem, group, *task)?,
            Directive::SetLimit {
                subsystem,
                group,
                share,
            } => self.fs.set_cpu_shares(subsystem, group, *share)?,
            Directive::Score(score) => {
                tracing::debug!(%score, "score directive has no filesystem effect");
                return Ok(action);
            }
        };
        tracing::debug!(tag = directive.tag(), path = %path.display(), "directive applied");
        Ok(action)
    }

    /// Applies every directive line from `reader`.
    ///
    /// # Errors
    ///
    /// Returns [`cgshare_common::error::CgshareError::Stream`] only if the
    /// stream itself cannot be read. Per-line failures are counted in the
    /// returned report.
    pub fn run<R: BufRead>(&self, reader: R) -> Result<RunReport> {
        let mut report = RunReport::default();

        for line in InputLines::new(reader) {
            let line = line?;
            report.lines += 1;
            if line.is_ignorable() {
                report.skipped += 1;
                continue;
            }

            let directive = match line.text().and_then(parse_directive) {
                Ok(directive) => directive,
                Err(e) => {
                    report.parse_errors += 1;
                    tracing::warn!(line = line.number, error = %e, "skipping malformed directive");
                    continue;
                }
            };

            match self.apply(&directive) {
                Ok(Action::Ignore) => report.skipped += 1,
                Ok(_) => report.applied += 1,
                Err(e) => {
                    report.fs_errors += 1;
                    tracing::warn!(
                        line = line.number,
                        %directive,
                        error = %e,
                        "directive failed"
                    );
                }
            }
        }

        tracing::info!(%report, "directive stream finished");
        Ok(report)
    }
}
