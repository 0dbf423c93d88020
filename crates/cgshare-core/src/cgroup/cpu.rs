//! CPU resource control via the cgroup v1 `cpu` controller.

use std::path::{Path, PathBuf};

use cgshare_common::constants::CPU_SHARES_FILE;
use cgshare_common::error::{CgshareError, Result};
use cgshare_common::types::Share;

/// Sets the CPU share weight for a cgroup.
///
/// The previous value is replaced. The group directory must already
/// exist.
///
/// # Errors
///
/// Returns an error if writing to `cpu.shares` fails.
pub fn set_cpu_shares(cgroup_path: &Path, share: Share) -> Result<PathBuf> {
    let file = cgroup_path.join(CPU_SHARES_FILE);
    std::fs::write(&file, format!("{share}\n")).map_err(|e| CgshareError::Io {
        path: file.clone(),
        source: e,
    })?;
    tracing::debug!(share, path = %file.display(), "CPU shares set");
    Ok(file)
}

/// Reads the current CPU share weight of a cgroup.
///
/// # Errors
///
/// Returns an error if `cpu.shares` cannot be read or does not hold
/// an integer.
pub fn read_cpu_shares(cgroup_path: &Path) -> Result<Share> {
    let file = cgroup_path.join(CPU_SHARES_FILE);
    let raw = std::fs::read_to_string(&file).map_err(|e| CgshareError::Io {
        path: file.clone(),
        source: e,
    })?;
    raw.trim().parse().map_err(|e| CgshareError::Parse {
        line: raw.trim().to_owned(),
        message: format!("{}: {e}", file.display()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_overwrites_previous_value() {
        let dir = tempfile::tempdir().expect("tempdir");
        let _ = set_cpu_shares(dir.path(), 1024).expect("should write");
        let _ = set_cpu_shares(dir.path(), 990).expect("should overwrite");

        assert_eq!(read_cpu_shares(dir.path()).expect("should read"), 990);
        let raw = std::fs::read_to_string(dir.path().join("cpu.shares")).expect("read");
        assert_eq!(raw, "990\n");
    }

    #[test]
    fn read_rejects_garbage() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("cpu.shares"), "lots\n").expect("write");
        assert!(read_cpu_shares(dir.path()).unwrap_err().is_parse());
    }
}
