//! Demand records: one managed application per input line.
//!
//! Input shape is `<tag>:<id>:<attr>:<share>`. The tag and attribute
//! fields are not interpreted.

use cgshare_common::error::{CgshareError, Result};
use cgshare_common::types::{GroupId, Share, check_path_segment};
use cgshare_core::directive::split_fields;

const RECORD_FIELDS: usize = 4;

/// Current CPU share request of one application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemandRecord {
    /// Application and cgroup identifier.
    pub id: GroupId,
    /// Requested share weight. Only ever grows during redistribution.
    pub requested_share: Share,
}

impl DemandRecord {
    /// Creates a record directly.
    pub fn new(id: impl Into<String>, requested_share: Share) -> Self {
        Self {
            id: GroupId::new(id),
            requested_share,
        }
    }

    /// Parses one input line.
    ///
    /// # Errors
    ///
    /// Returns [`CgshareError::Parse`] if the line does not have exactly
    /// four fields, the id is not a safe path segment, or the share is not
    /// a non-negative integer.
    pub fn parse(line: &str) -> Result<Self> {
        let parts = split_fields(line)?;
        if parts.len() != RECORD_FIELDS {
            return Err(CgshareError::parse(
                line,
                format!(
                    "demand record expects {RECORD_FIELDS} fields, got {}",
                    parts.len()
                ),
            ));
        }

        let id = parts[1];
        check_path_segment(id)
            .map_err(|reason| CgshareError::parse(line, format!("id {id:?}: {reason}")))?;
        let raw_share = parts[3].trim();
        let requested_share = raw_share
            .parse()
            .map_err(|e| CgshareError::parse(line, format!("share {raw_share:?}: {e}")))?;

        Ok(Self::new(id, requested_share))
    }

    /// Returns `true` if the share is at or below `threshold`.
    pub const fn is_elastic(&self, threshold: Share) -> bool {
        self.requested_share <= threshold
    }
}
