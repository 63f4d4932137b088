//! Operational logging, separate from the metrics sink.

pub mod oplog;

pub use oplog::OpsLog;
