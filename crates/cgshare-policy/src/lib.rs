//! # cgshare-policy
//!
//! CPU share policy engine.
//!
//! Reads a batch of demand records, decides whether aggregate demand
//! exceeds the virtual capacity, and spreads any slack evenly across
//! elastic consumers. The output is a `score` directive followed by one
//! `set_limit` directive per record, in input order.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod allocation;
pub mod engine;
pub mod record;
pub mod summary;

pub use allocation::{Allocation, Pressure, allocate, redistribute};
pub use engine::{PolicyConfig, PolicyEngine, PolicyReport};
pub use record::DemandRecord;
pub use summary::BatchSummary;
