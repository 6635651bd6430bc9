//! Grouping and aggregation.
//!
//! `stats` holds the per-column numeric kernel; `aggregator` partitions a
//! table by its key columns and applies the kernel to every group.

pub mod aggregator;
pub mod stats;

pub use aggregator::*;
