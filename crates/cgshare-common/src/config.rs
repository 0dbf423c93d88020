//! Global configuration model for cgshare.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CgshareError, Result};
use crate::types::RemovePolicy;

/// Root configuration shared by the policy engine and the interpreter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CgshareConfig {
    /// Mount point of the cgroup CPU controller.
    pub cgroup_root: PathBuf,
    /// Total share budget considered "not overcommitted".
    pub virtual_capacity: u64,
    /// Highest requested share still counted as elastic.
    pub elastic_threshold: u64,
    /// Subsystem segment written into emitted `set_limit` directives.
    pub subsystem: String,
    /// Handling of `remove` on a missing directory.
    pub remove_policy: RemovePolicy,
}

impl Default for CgshareConfig {
    fn default() -> Self {
        Self {
            cgroup_root: PathBuf::from(crate::constants::CGROUP_V1_CPU_PATH),
            virtual_capacity: crate::constants::DEFAULT_VIRTUAL_CAPACITY,
            elastic_threshold: crate::constants::DEFAULT_ELASTIC_THRESHOLD,
            subsystem: crate::constants::DEFAULT_SUBSYSTEM.to_owned(),
            remove_policy: RemovePolicy::default(),
        }
    }
}

impl CgshareConfig {
    /// Loads a configuration from a JSON file. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON,
    /// or fails validation.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| CgshareError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that cannot be expressed in the type system.
    ///
    /// # Errors
    ///
    /// Returns [`CgshareError::Config`] if the subsystem is not a single
    /// path segment.
    pub fn validate(&self) -> Result<()> {
        crate::types::check_path_segment(&self.subsystem).map_err(|reason| {
            CgshareError::Config {
                message: format!("subsystem {:?}: {reason}", self.subsystem),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_match_cpu_controller() {
        let config = CgshareConfig::default();
        assert_eq!(config.cgroup_root, PathBuf::from("/sys/fs/cgroup/cpu/"));
        assert_eq!(config.virtual_capacity, 2000);
        assert_eq!(config.elastic_threshold, 50);
        assert_eq!(config.subsystem, "cpu");
        assert_eq!(config.remove_policy, RemovePolicy::Strict);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"{{ "virtual_capacity": 4000, "remove_policy": "ignore_missing" }}"#
        )
        .expect("write config");

        let config = CgshareConfig::from_file(file.path()).expect("should load");
        assert_eq!(config.virtual_capacity, 4000);
        assert_eq!(config.remove_policy, RemovePolicy::IgnoreMissing);
        assert_eq!(config.elastic_threshold, 50);
    }

    #[test]
    fn invalid_subsystem_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "subsystem": "../etc" }}"#).expect("write config");

        let err = CgshareConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, CgshareError::Config { .. }));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = CgshareConfig::from_file(Path::new("/nonexistent/cgshare.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/cgshare.json"));
    }
}
