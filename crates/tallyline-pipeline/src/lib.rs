//! tallyline pipeline library entry.
//!
//! Wires the handoff queue, the background writer, and the collector into a
//! collection pipeline, plus the config loader, ops log, and demo drivers used
//! by the `tallyline-demo` binary and by integration tests.

pub mod collector;
pub mod config;
pub mod demo;
pub mod drivers;
pub mod obs;
pub mod queue;
pub mod writer;

pub use collector::Collector;
pub use queue::HandoffQueue;
pub use writer::{AsyncWriter, WriterStats};
