//! Metric snapshots and their text line format.
//!
//! Line format: `<timestamp> "<name>" <value> "<name>" <value> ...`
//! The timestamp is supplied by the writer; this module only renders.

use std::fmt::Write;

/// One `(name, value)` pair of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotEntry {
    pub name: String,
    pub value: String,
}

/// Ordered capture of every registered metric at one collection tick.
///
/// Immutable once built; moved from collector to queue to writer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricSnapshot {
    entries: Vec<SnapshotEntry>,
}

impl MetricSnapshot {
    pub fn new(entries: Vec<SnapshotEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[SnapshotEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render one sink line (with trailing newline).
    pub fn render_line(&self, timestamp: &str) -> String {
        let mut out = String::with_capacity(timestamp.len() + 1 + self.entries.len() * 24);
        out.push_str(timestamp);
        for e in &self.entries {
            let _ = write!(out, " \"{}\" {}", e.name, e.value);
        }
        out.push('\n');
        out
    }
}

impl FromIterator<(String, String)> for MetricSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, value)| SnapshotEntry { name, value })
                .collect(),
        }
    }
}
