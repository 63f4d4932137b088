//! Shared error type across tallyline crates.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, TallyError>;

/// Unified error type used by core and pipeline.
#[derive(Debug, Error)]
pub enum TallyError {
    #[error("cannot open sink {}: {source}", path.display())]
    SinkOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot spawn writer thread: {0}")]
    Spawn(#[source] io::Error),
    #[error("config: {0}")]
    Config(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("io: {0}")]
    Io(#[from] io::Error),
}

impl TallyError {
    /// Stable short code, used in log fields and assertions.
    pub fn kind(&self) -> &'static str {
        match self {
            TallyError::SinkOpen { .. } => "SINK_OPEN",
            TallyError::Spawn(_) => "SPAWN",
            TallyError::Config(_) => "CONFIG",
            TallyError::UnsupportedVersion => "UNSUPPORTED_VERSION",
            TallyError::Io(_) => "IO",
        }
    }
}
