//! Typed directive protocol.
//!
//! Wire shapes (colon-delimited, one per line):
//!
//! ```text
//! create:<subsystem>:<unused>:<group>
//! remove:<subsystem>:<unused>:<group>
//! add:<subsystem>:<unused>:<group>:<task_id>
//! set_limit:<subsystem>:<unused>:<group>:<unused>:<share>
//! score:<float>
//! ```

pub mod parser;

use std::fmt;
use std::str::FromStr;

use cgshare_common::constants::{CPU_SHARES_FILE, UNUSED_FIELD};
use cgshare_common::error::CgshareError;
use cgshare_common::types::{GroupId, Score, Share};

pub use parser::{parse_directive, split_fields};

/// One cgroup operation, parsed once at the input boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// Ensure the group directory exists.
    Create {
        /// Subsystem directory under the controller root.
        subsystem: String,
        /// Group directory under the subsystem.
        group: GroupId,
    },
    /// Remove the (empty) group directory.
    Remove {
        /// Subsystem directory under the controller root.
        subsystem: String,
        /// Group directory under the subsystem.
        group: GroupId,
    },
    /// Append a task id to the group's task list.
    Add {
        /// Subsystem directory under the controller root.
        subsystem: String,
        /// Group directory under the subsystem.
        group: GroupId,
        /// Task (thread) id to attach.
        task: u32,
    },
    /// Overwrite the group's CPU share weight.
    SetLimit {
        /// Subsystem directory under the controller root.
        subsystem: String,
        /// Group directory under the subsystem.
        group: GroupId,
        /// New share weight.
        share: Share,
    },
    /// Pressure score for an external aggregator.
    Score(Score),
}

impl Directive {
    /// Returns the wire tag of this directive.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Remove { .. } => "remove",
            Self::Add { .. } => "add",
            Self::SetLimit { .. } => "set_limit",
            Self::Score(_) => "score",
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = self.tag();
        match self {
            Self::Create { subsystem, group } | Self::Remove { subsystem, group } => {
                write!(f, "{tag}:{subsystem}:{UNUSED_FIELD}:{group}")
            }
            Self::Add {
                subsystem,
                group,
                task,
            } => write!(f, "{tag}:{subsystem}:{UNUSED_FIELD}:{group}:{task}"),
            Self::SetLimit {
                subsystem,
                group,
                share,
            } => write!(
                f,
                "{tag}:{subsystem}:{UNUSED_FIELD}:{group}:{CPU_SHARES_FILE}:{share}"
            ),
            Self::Score(score) => write!(f, "{tag}:{score}"),
        }
    }
}

impl FromStr for Directive {
    type Err = CgshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_directive(s)
    }
}
