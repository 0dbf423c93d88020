//! Batch summary computed once over the whole demand set.

use cgshare_common::types::Share;

use crate::record::DemandRecord;

/// Aggregate demand of one batch. Immutable once folded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Sum of all requested shares.
    pub total: Share,
    /// Number of records at or below the elastic threshold.
    pub elastic_count: usize,
}

impl BatchSummary {
    /// Folds a batch into its summary.
    pub fn fold(records: &[DemandRecord], elastic_threshold: Share) -> Self {
        records.iter().fold(Self::default(), |acc, record| Self {
            total: acc.total.saturating_add(record.requested_share),
            elastic_count: acc.elastic_count + usize::from(record.is_elastic(elastic_threshold)),
        })
    }

    /// Returns `true` if `total` exceeds `capacity`. Ties are within budget.
    pub const fn exceeds(&self, capacity: Share) -> bool {
        self.total > capacity
    }
}
