//! Cgroup v1 hierarchy management.
//!
//! Every operation is a single direct filesystem call against
//! `<root>/<subsystem>/<group>`. Nothing is cached or verified
//! beyond what the call itself reports.

pub mod cpu;
pub mod tasks;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use cgshare_common::error::{CgshareError, Result};
use cgshare_common::types::{GroupId, RemovePolicy, Share};

/// Handle to a cgroup controller mount point.
#[derive(Debug, Clone)]
pub struct CgroupFs {
    root: PathBuf,
}

impl CgroupFs {
    /// Creates a handle rooted at the given controller mount point.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the controller mount point.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns `<root>/<subsystem>/<group>`.
    pub fn group_path(&self, subsystem: &str, group: &GroupId) -> PathBuf {
        self.root.join(subsystem).join(group.as_str())
    }

    /// Creates the group directory and any missing parents.
    ///
    /// Succeeds if the directory already exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn create_group(&self, subsystem: &str, group: &GroupId) -> Result<PathBuf> {
        let path = self.group_path(subsystem, group);
        std::fs::create_dir_all(&path).map_err(|e| CgshareError::Io {
            path: path.clone(),
            source: e,
        })?;
        tracing::info!(path = %path.display(), "cgroup created");
        Ok(path)
    }

    /// Removes the group directory. Never recursive.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory is not empty, or if it is missing
    /// and `policy` is [`RemovePolicy::Strict`].
    pub fn remove_group(
        &self,
        subsystem: &str,
        group: &GroupId,
        policy: RemovePolicy,
    ) -> Result<PathBuf> {
        let path = self.group_path(subsystem, group);
        match std::fs::remove_dir(&path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "cgroup removed");
                Ok(path)
            }
            Err(e) if e.kind() == ErrorKind::NotFound && policy == RemovePolicy::IgnoreMissing => {
                tracing::debug!(path = %path.display(), "cgroup already absent");
                Ok(path)
            }
            Err(e) => Err(CgshareError::Io { path, source: e }),
        }
    }

    /// Appends a task id to the group's `tasks` file.
    ///
    /// # Errors
    ///
    /// Returns an error if the group does not exist or the write fails.
    pub fn add_task(&self, subsystem: &str, group: &GroupId, task: u32) -> Result<PathBuf> {
        tasks::append_task(&self.group_path(subsystem, group), task)
    }

    /// Overwrites the group's `cpu.shares` file.
    ///
    /// # Errors
    ///
    /// Returns an error if the group does not exist or the write fails.
    pub fn set_cpu_shares(
        &self,
        subsystem: &str,
        group: &GroupId,
        share: Share,
    ) -> Result<PathBuf> {
        cpu::set_cpu_shares(&self.group_path(subsystem, group), share)
    }
}
