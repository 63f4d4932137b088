//! Metric registry that snapshots, resets, and forwards to the writer.

use parking_lot::Mutex;

use tallyline_core::error::Result;
use tallyline_core::{Metric, MetricSnapshot};

use crate::writer::{AsyncWriter, WriterStats};

pub struct Collector {
    metrics: Mutex<Vec<Metric>>,
    writer: AsyncWriter,
}

impl Collector {
    /// Collector writing to a file sink at `path`.
    pub fn open(path: &str) -> Result<Self> {
        Ok(Self::new(AsyncWriter::open(path)?))
    }

    pub fn new(writer: AsyncWriter) -> Self {
        Self { metrics: Mutex::new(Vec::new()), writer }
    }

    /// Register a metric. Duplicate names are allowed and show up twice in
    /// every snapshot.
    pub fn add_metric(&self, metric: impl Into<Metric>) {
        let metric = metric.into();
        let mut list = self.metrics.lock();
        if list.iter().any(|m| m.name() == metric.name()) {
            tracing::warn!(metric = %metric.name(), "duplicate metric name registered");
        }
        list.push(metric);
    }

    pub fn len(&self) -> usize {
        self.metrics.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.lock().is_empty()
    }

    /// Capture and reset every registered metric, then hand the snapshot to
    /// the writer. Returns the number of entries captured.
    ///
    /// The list lock is held only while reading; each metric is read and
    /// zeroed under its own lock so concurrent updates are never dropped.
    pub fn collect_and_write(&self) -> usize {
        let snapshot: MetricSnapshot = {
            let list = self.metrics.lock();
            list.iter()
                .map(|m| (m.name().to_string(), m.take_value_string()))
                .collect()
        };
        let n = snapshot.len();
        self.writer.write(snapshot);
        n
    }

    pub fn writer(&self) -> &AsyncWriter {
        &self.writer
    }

    /// Stop the writer after it drains every collected snapshot.
    pub fn shutdown(self) -> WriterStats {
        self.writer.stop()
    }
}
