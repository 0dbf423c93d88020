//! Task attachment via the cgroup v1 `tasks` file.

use std::io::Write;
use std::path::{Path, PathBuf};

use cgshare_common::constants::TASKS_FILE;
use cgshare_common::error::{CgshareError, Result};

/// Appends a task id to a cgroup's task list.
///
/// Existing entries are kept. The group directory must already exist.
///
/// # Errors
///
/// Returns an error if the `tasks` file cannot be opened or written.
pub fn append_task(cgroup_path: &Path, task: u32) -> Result<PathBuf> {
    let file = cgroup_path.join(TASKS_FILE);
    let io_err = |e| CgshareError::Io {
        path: file.clone(),
        source: e,
    };
    let mut handle = std::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(&file)
        .map_err(io_err)?;
    handle.write_all(format!("{task}\n").as_bytes()).map_err(io_err)?;
    tracing::debug!(task, path = %file.display(), "task added to cgroup");
    Ok(file)
}
