//! tallyline core: metric value holders, snapshots, line format, and errors.
//!
//! This crate holds the pieces shared by the collection pipeline and any host
//! program. It carries no threads and no file handles so the metric types can
//! be embedded anywhere.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Metric operations are total and never fail.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod metric;
pub mod snapshot;

/// Shared result type.
pub use error::{Result, TallyError};
pub use metric::{Counter, Gauge, Metric};
pub use snapshot::{MetricSnapshot, SnapshotEntry};
