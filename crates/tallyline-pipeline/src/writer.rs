//! Asynchronous snapshot writer.
//!
//! One background thread owns the sink and drains the handoff queue, appending
//! one timestamped line per snapshot and flushing after each line. Producers
//! only ever touch the queue. Stopping waits for a full drain.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tallyline_core::error::{Result, TallyError};
use tallyline_core::MetricSnapshot;

use crate::queue::HandoffQueue;

/// Default backlog depth above which `write` logs a warning.
pub const DEFAULT_WARN_DEPTH: usize = 1024;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Lines persisted and lines dropped on I/O errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterStats {
    pub written: u64,
    pub failed: u64,
}

#[derive(Default)]
struct Shared {
    queue: HandoffQueue,
    written: AtomicU64,
    failed: AtomicU64,
}

impl Shared {
    fn stats(&self) -> WriterStats {
        WriterStats {
            written: self.written.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

pub struct AsyncWriter {
    label: String,
    shared: Arc<Shared>,
    handle: Option<JoinHandle<()>>,
    warn_depth: usize,
}

impl AsyncWriter {
    /// Open `path` for appending (created if missing) and start the writer.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| TallyError::SinkOpen { path: path.to_path_buf(), source })?;
        tracing::info!(sink = %path.display(), "sink opened");
        Self::from_sink(path.display().to_string(), file)
    }

    /// Start a writer over any append-only stream. `label` names it in logs.
    ///
    /// The sink moves into the thread; if the spawn fails it is dropped here.
    pub fn from_sink<W>(label: impl Into<String>, sink: W) -> Result<Self>
    where
        W: Write + Send + 'static,
    {
        let label = label.into();
        let shared = Arc::new(Shared::default());

        let thread_shared = Arc::clone(&shared);
        let thread_label = label.clone();
        let handle = thread::Builder::new()
            .name("tallyline-writer".into())
            .spawn(move || run(&thread_shared, sink, &thread_label))
            .map_err(TallyError::Spawn)?;

        Ok(Self {
            label,
            shared,
            handle: Some(handle),
            warn_depth: DEFAULT_WARN_DEPTH,
        })
    }

    /// Backlog depth above which `write` warns. Zero is treated as one.
    pub fn with_warn_depth(mut self, depth: usize) -> Self {
        self.warn_depth = depth.max(1);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Enqueue a snapshot and return immediately.
    pub fn write(&self, snapshot: MetricSnapshot) {
        let depth = self.shared.queue.push(snapshot);
        if depth == self.warn_depth + 1 {
            tracing::warn!(sink = %self.label, depth, "writer backlog above warn depth");
        }
    }

    /// Snapshots enqueued but not yet taken by the writer thread.
    pub fn pending(&self) -> usize {
        self.shared.queue.len()
    }

    pub fn stats(&self) -> WriterStats {
        self.shared.stats()
    }

    /// Stop accepting work, drain everything queued, and join the thread.
    pub fn stop(mut self) -> WriterStats {
        self.shutdown()
    }

    fn shutdown(&mut self) -> WriterStats {
        let Some(handle) = self.handle.take() else {
            return self.shared.stats();
        };
        self.shared.queue.stop();
        if handle.join().is_err() {
            tracing::error!(sink = %self.label, "writer thread panicked");
        }
        let stats = self.shared.stats();
        tracing::info!(
            sink = %self.label,
            written = stats.written,
            failed = stats.failed,
            "writer stopped"
        );
        stats
    }
}

impl Drop for AsyncWriter {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run<W: Write>(shared: &Shared, mut sink: W, label: &str) {
    loop {
        let Some(snapshot) = shared.queue.wait_and_pop() else {
            // Only a stopped, empty queue ends the loop.
            if shared.queue.is_drained() {
                break;
            }
            continue;
        };

        let line = snapshot.render_line(&timestamp_now());
        match sink.write_all(line.as_bytes()).and_then(|()| sink.flush()) {
            Ok(()) => {
                shared.written.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                shared.failed.fetch_add(1, Ordering::Relaxed);
                tracing::error!(sink = %label, error = %e, "failed to persist metrics line, skipping");
            }
        }
    }
}

fn timestamp_now() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}
