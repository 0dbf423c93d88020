//! Batch driver: read every record, allocate, then emit directives.
//!
//! Nothing is written until the whole batch has been read, since the
//! pressure score and the bonus depend on the complete set.

use std::fmt;
use std::io::{BufRead, Write};

use cgshare_common::config::CgshareConfig;
use cgshare_common::constants::{
    DEFAULT_ELASTIC_THRESHOLD, DEFAULT_SUBSYSTEM, DEFAULT_VIRTUAL_CAPACITY,
};
use cgshare_common::error::{CgshareError, Result};
use cgshare_common::types::{Score, Share};
use cgshare_core::input::InputLines;

use crate::allocation::{Allocation, Pressure, allocate};
use crate::record::DemandRecord;

/// Tunables of the policy pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyConfig {
    /// Total share budget.
    pub virtual_capacity: Share,
    /// Highest share still counted as elastic.
    pub elastic_threshold: Share,
    /// Subsystem segment of emitted `set_limit` directives.
    pub subsystem: String,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            virtual_capacity: DEFAULT_VIRTUAL_CAPACITY,
            elastic_threshold: DEFAULT_ELASTIC_THRESHOLD,
            subsystem: DEFAULT_SUBSYSTEM.to_owned(),
        }
    }
}

impl From<&CgshareConfig> for PolicyConfig {
    fn from(config: &CgshareConfig) -> Self {
        Self {
            virtual_capacity: config.virtual_capacity,
            elastic_threshold: config.elastic_threshold,
            subsystem: config.subsystem.clone(),
        }
    }
}

/// Outcome of one engine run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicyReport {
    /// Records that parsed and were emitted.
    pub records: usize,
    /// Lines rejected as malformed.
    pub malformed: usize,
    /// Blank and comment lines.
    pub skipped: usize,
    /// Pressure decided for the batch.
    pub pressure: Pressure,
    /// Score emitted for the batch.
    pub score: Score,
    /// Amount added to each elastic record.
    pub bonus: Share,
}

impl fmt::Display for PolicyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} record(s), {} malformed, {} skipped, score {}, bonus {}",
            self.records, self.malformed, self.skipped, self.score, self.bonus
        )
    }
}

/// Stateless policy engine. Each run sees only its own batch.
#[derive(Debug, Clone, Default)]
pub struct PolicyEngine {
    config: PolicyConfig,
}

impl PolicyEngine {
    /// Creates an engine with the given tunables.
    pub const fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    /// Reads the whole batch, skipping and logging malformed lines.
    ///
    /// Returns the parsed records plus `(malformed, skipped)` counts.
    ///
    /// # Errors
    ///
    /// Returns [`CgshareError::Stream`] if the input cannot be read.
    pub fn read_batch<R: BufRead>(&self, reader: R) -> Result<(Vec<DemandRecord>, usize, usize)> {
        let mut records = Vec::new();
        let mut malformed = 0;
        let mut skipped = 0;

        for line in InputLines::new(reader) {
            let line = line?;
            if line.is_ignorable() {
                skipped += 1;
                continue;
            }
            match line.text().and_then(DemandRecord::parse) {
                Ok(record) => records.push(record),
                Err(e) => {
                    malformed += 1;
                    tracing::warn!(
                        line = line.number,
                        error = %e,
                        "skipping malformed demand record"
                    );
                }
            }
        }

        Ok((records, malformed, skipped))
    }

    /// Runs one policy pass from `reader` to `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`CgshareError::Stream`] if the input cannot be read or
    /// the directives cannot be written.
    pub fn run<R: BufRead, W: Write>(&self, reader: R, mut writer: W) -> Result<PolicyReport> {
        let (records, malformed, skipped) = self.read_batch(reader)?;
        let allocation = allocate(records, &self.config);
        self.emit(&allocation, &mut writer)?;

        let report = PolicyReport {
            records: allocation.records.len(),
            malformed,
            skipped,
            pressure: allocation.pressure,
            score: allocation.score(),
            bonus: allocation.bonus,
        };
        tracing::info!(%report, total = allocation.summary.total, "policy pass finished");
        Ok(report)
    }

    /// Writes the directives of an allocation, one per line.
    ///
    /// # Errors
    ///
    /// Returns [`CgshareError::Stream`] if writing fails.
    pub fn emit<W: Write>(&self, allocation: &Allocation, writer: &mut W) -> Result<()> {
        for directive in allocation.directives(&self.config.subsystem) {
            writeln!(writer, "{directive}").map_err(|source| CgshareError::Stream { source })?;
        }
        writer
            .flush()
            .map_err(|source| CgshareError::Stream { source })
    }
}
