//! Operational log handle for driver and host code.
//!
//! Appends `YYYY-MM-DD HH:MM:SS [LEVEL] message` lines to its own file and
//! mirrors every entry to `tracing`. Constructed explicitly and shared by
//! `Arc`; the pipeline core never depends on it.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use parking_lot::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Info,
    Error,
}

impl Level {
    fn as_str(self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Error => "ERROR",
        }
    }
}

pub struct OpsLog {
    file: Mutex<Option<File>>,
}

impl OpsLog {
    /// Open (append) the log at `path`. An unopenable file degrades to
    /// tracing-only output.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => Some(f),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ops log unavailable, tracing only");
                None
            }
        };
        Self { file: Mutex::new(file) }
    }

    /// Tracing-only handle.
    pub fn disabled() -> Self {
        Self { file: Mutex::new(None) }
    }

    pub fn info(&self, msg: &str) {
        tracing::info!(target: "tallyline::ops", "{msg}");
        self.append(Level::Info, msg);
    }

    pub fn error(&self, msg: &str) {
        tracing::error!(target: "tallyline::ops", "{msg}");
        self.append(Level::Error, msg);
    }

    fn append(&self, level: Level, msg: &str) {
        let mut guard = self.file.lock();
        let Some(file) = guard.as_mut() else { return };
        let ts = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        if let Err(e) = writeln!(file, "{ts} [{}] {msg}", level.as_str()) {
            tracing::warn!(error = %e, "ops log write failed");
        }
    }
}
