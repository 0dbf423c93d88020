//! Pressure scoring and slack redistribution.
//!
//! The pressure decision and the per-record bonus both come from the
//! [`BatchSummary`] folded before any share is touched. Fixed records
//! are never changed and no share ever shrinks.

use cgshare_common::constants::{SCORE_OVER_BUDGET, SCORE_UNDER_BUDGET};
use cgshare_common::types::{Score, Share};
use cgshare_core::directive::Directive;

use crate::engine::PolicyConfig;
use crate::record::DemandRecord;
use crate::summary::BatchSummary;

/// Whether aggregate demand fits the virtual capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pressure {
    /// Total demand is at or below capacity.
    UnderBudget,
    /// Total demand exceeds capacity.
    OverBudget,
}

impl Pressure {
    /// Classifies a batch against `capacity`.
    pub const fn of(summary: &BatchSummary, capacity: Share) -> Self {
        if summary.exceeds(capacity) {
            Self::OverBudget
        } else {
            Self::UnderBudget
        }
    }

    /// The score directive value for this pressure level.
    pub const fn score(self) -> Score {
        match self {
            Self::UnderBudget => Score::new(SCORE_UNDER_BUDGET),
            Self::OverBudget => Score::new(SCORE_OVER_BUDGET),
        }
    }
}

/// Result of one policy pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    /// Summary of the original demand.
    pub summary: BatchSummary,
    /// Pressure decided from the original total.
    pub pressure: Pressure,
    /// Amount added to every elastic record.
    pub bonus: Share,
    /// Records with their final shares, in input order.
    pub records: Vec<DemandRecord>,
}

impl Allocation {
    /// The pressure score to emit.
    pub const fn score(&self) -> Score {
        self.pressure.score()
    }

    /// The directives to emit: the score first, then one `set_limit` per
    /// record in input order.
    pub fn directives(&self, subsystem: &str) -> Vec<Directive> {
        std::iter::once(Directive::Score(self.score()))
            .chain(self.records.iter().map(|record| Directive::SetLimit {
                subsystem: subsystem.to_owned(),
                group: record.id.clone(),
                share: record.requested_share,
            }))
            .collect()
    }
}

/// Spreads slack capacity evenly across elastic records.
///
/// Slack is only distributed when the batch is within budget and has at
/// least one elastic record; each elastic record gains
/// `floor(slack / elastic_count)`.
pub fn redistribute(
    mut records: Vec<DemandRecord>,
    summary: &BatchSummary,
    config: &PolicyConfig,
) -> Allocation {
    let pressure = Pressure::of(summary, config.virtual_capacity);

    let bonus = match pressure {
        Pressure::OverBudget => 0,
        Pressure::UnderBudget if summary.elastic_count == 0 => 0,
        Pressure::UnderBudget => {
            let slack = config.virtual_capacity - summary.total;
            let elastic = Share::try_from(summary.elastic_count).unwrap_or(Share::MAX);
            slack / elastic
        }
    };

    if bonus > 0 {
        for record in &mut records {
            if record.is_elastic(config.elastic_threshold) {
                record.requested_share = record.requested_share.saturating_add(bonus);
            }
        }
    }

    tracing::debug!(
        total = summary.total,
        elastic_count = summary.elastic_count,
        capacity = config.virtual_capacity,
        bonus,
        ?pressure,
        "allocation decided"
    );

    Allocation {
        summary: *summary,
        pressure,
        bonus,
        records,
    }
}

/// Folds the batch summary and redistributes in one call.
pub fn allocate(records: Vec<DemandRecord>, config: &PolicyConfig) -> Allocation {
    let summary = BatchSummary::fold(&records, config.elastic_threshold);
    redistribute(records, &summary, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shares(allocation: &Allocation) -> Vec<Share> {
        allocation
            .records
            .iter()
            .map(|record| record.requested_share)
            .collect()
    }

    #[test]
    fn slack_goes_to_elastic_records() {
        let records = vec![DemandRecord::new("A", 10), DemandRecord::new("B", 30)];
        let allocation = allocate(records, &PolicyConfig::default());

        assert_eq!(allocation.summary.total, 40);
        assert_eq!(allocation.summary.elastic_count, 2);
        assert_eq!(allocation.bonus, 980);
        assert_eq!(allocation.score(), Score::new(0.1));
        assert_eq!(shares(&allocation), vec![990, 1010]);
    }

    #[test]
    fn no_elastic_records_leaves_shares_unchanged() {
        let records = vec![DemandRecord::new("A", 200), DemandRecord::new("B", 300)];
        let allocation = allocate(records, &PolicyConfig::default());

        assert_eq!(allocation.pressure, Pressure::UnderBudget);
        assert_eq!(allocation.bonus, 0);
        assert_eq!(shares(&allocation), vec![200, 300]);
    }

    #[test]
    fn over_budget_is_scored_not_corrected() {
        let records = vec![DemandRecord::new("A", 1500), DemandRecord::new("B", 600)];
        let allocation = allocate(records, &PolicyConfig::default());

        assert_eq!(allocation.score(), Score::new(-0.1));
        assert_eq!(shares(&allocation), vec![1500, 600]);
    }

    #[test]
    fn over_budget_ignores_elastic_records() {
        let records = vec![DemandRecord::new("A", 1990), DemandRecord::new("B", 20)];
        let allocation = allocate(records, &PolicyConfig::default());

        assert_eq!(allocation.pressure, Pressure::OverBudget);
        assert_eq!(shares(&allocation), vec![1990, 20]);
    }

    #[test]
    fn exact_budget_is_under_with_zero_slack() {
        let records = vec![DemandRecord::new("A", 1960), DemandRecord::new("B", 40)];
        let allocation = allocate(records, &PolicyConfig::default());

        assert_eq!(allocation.score(), Score::new(0.1));
        assert_eq!(allocation.bonus, 0);
        assert_eq!(shares(&allocation), vec![1960, 40]);
    }

    #[test]
    fn fixed_records_are_untouched_and_slack_is_floored() {
        let records = vec![
            DemandRecord::new("A", 50),
            DemandRecord::new("B", 51),
            DemandRecord::new("C", 0),
        ];
        // total 101, slack 1899, two elastic -> 949 each
        let allocation = allocate(records, &PolicyConfig::default());

        assert_eq!(allocation.bonus, 949);
        assert_eq!(shares(&allocation), vec![999, 51, 949]);
    }

    #[test]
    fn empty_batch_is_under_budget() {
        let allocation = allocate(Vec::new(), &PolicyConfig::default());
        assert_eq!(allocation.pressure, Pressure::UnderBudget);
        assert_eq!(allocation.directives("cpu"), vec![Directive::Score(Score::new(0.1))]);
    }

    #[test]
    fn shares_never_shrink() {
        let config = PolicyConfig::default();
        let batches: [&[Share]; 5] = [
            &[0, 0, 0],
            &[50, 2000],
            &[10, 20, 30, 1000, 900],
            &[3000],
            &[49, 51, 1, 1899],
        ];
        for batch in batches {
            let records: Vec<_> = batch
                .iter()
                .enumerate()
                .map(|(i, &share)| DemandRecord::new(format!("g{i}"), share))
                .collect();
            let allocation = allocate(records, &config);
            for (original, record) in batch.iter().zip(&allocation.records) {
                assert!(record.requested_share >= *original);
            }
            let total: Share = allocation.records.iter().map(|r| r.requested_share).sum();
            if allocation.pressure == Pressure::UnderBudget {
                assert!(total <= config.virtual_capacity);
            }
        }
    }

    #[test]
    fn directives_keep_input_order() {
        let records = vec![
            DemandRecord::new("zeta", 100),
            DemandRecord::new("alpha", 10),
        ];
        let allocation = allocate(records, &PolicyConfig::default());
        let rendered: Vec<String> = allocation
            .directives("cpu")
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            rendered,
            vec![
                "score:0.1",
                "set_limit:cpu:_:zeta:cpu.shares:100",
                "set_limit:cpu:_:alpha:cpu.shares:1900",
            ]
        );
    }

    #[test]
    fn custom_threshold_and_capacity() {
        let config = PolicyConfig {
            virtual_capacity: 1000,
            elastic_threshold: 100,
            ..PolicyConfig::default()
        };
        let records = vec![DemandRecord::new("A", 100), DemandRecord::new("B", 300)];
        let allocation = allocate(records, &config);
        assert_eq!(shares(&allocation), vec![700, 300]);
    }
}
