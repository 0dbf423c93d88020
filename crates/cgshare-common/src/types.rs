//! Domain primitive types used across the cgshare workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a managed application and of its cgroup directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupId(String);

impl GroupId {
    /// Creates a new group ID from a string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// CPU share weight as written to `cpu.shares`.
pub type Share = u64;

/// Pressure signal handed to an external aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score(f64);

impl Score {
    /// Wraps a raw score value.
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Returns the raw score value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How `remove` treats a group directory that does not exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovePolicy {
    /// Report every failed removal, including missing directories.
    #[default]
    Strict,
    /// Treat a missing directory as already removed.
    IgnoreMissing,
}

impl fmt::Display for RemovePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::IgnoreMissing => write!(f, "ignore_missing"),
        }
    }
}

/// Checks that `segment` is safe to join onto a cgroup path.
///
/// # Errors
///
/// Returns a short reason when the segment is empty, is `.` or `..`,
/// or contains a path separator or NUL byte.
pub fn check_path_segment(segment: &str) -> Result<(), &'static str> {
    if segment.is_empty() {
        return Err("empty path segment");
    }
    if segment == "." || segment == ".." {
        return Err("relative path segment");
    }
    if segment.contains(['/', '\0']) {
        return Err("path segment contains a separator or NUL");
    }
    Ok(())
}
