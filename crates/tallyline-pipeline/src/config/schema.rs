use serde::Deserialize;
use tallyline_core::error::{Result, TallyError};

use crate::writer::DEFAULT_WARN_DEPTH;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DemoConfig {
    pub version: u32,

    #[serde(default)]
    pub collector: CollectorSection,

    #[serde(default)]
    pub demo: DemoSection,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            version: 1,
            collector: CollectorSection::default(),
            demo: DemoSection::default(),
        }
    }
}

impl DemoConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(TallyError::UnsupportedVersion);
        }
        self.collector.validate()?;
        self.demo.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectorSection {
    #[serde(default = "default_sink")]
    pub sink: String,

    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    #[serde(default = "default_queue_warn_depth")]
    pub queue_warn_depth: usize,
}

impl Default for CollectorSection {
    fn default() -> Self {
        Self {
            sink: default_sink(),
            interval_ms: default_interval_ms(),
            queue_warn_depth: default_queue_warn_depth(),
        }
    }
}

impl CollectorSection {
    pub fn validate(&self) -> Result<()> {
        if self.sink.trim().is_empty() {
            return Err(TallyError::Config("collector.sink must not be empty".into()));
        }
        if !(10..=60000).contains(&self.interval_ms) {
            return Err(TallyError::Config(
                "collector.interval_ms must be between 10 and 60000".into(),
            ));
        }
        if self.queue_warn_depth == 0 {
            return Err(TallyError::Config("collector.queue_warn_depth must be > 0".into()));
        }
        Ok(())
    }
}

fn default_sink() -> String {
    "metrics_output.txt".into()
}
fn default_interval_ms() -> u64 {
    1000
}
fn default_queue_warn_depth() -> usize {
    DEFAULT_WARN_DEPTH
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DemoSection {
    #[serde(default = "default_duration_secs")]
    pub duration_secs: u64,

    #[serde(default = "default_ops_log")]
    pub ops_log: String,

    #[serde(default = "default_drivers")]
    pub drivers: Vec<DriverConfig>,
}

impl Default for DemoSection {
    fn default() -> Self {
        Self {
            duration_secs: default_duration_secs(),
            ops_log: default_ops_log(),
            drivers: default_drivers(),
        }
    }
}

impl DemoSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=3600).contains(&self.duration_secs) {
            return Err(TallyError::Config(
                "demo.duration_secs must be between 1 and 3600".into(),
            ));
        }
        for d in &self.drivers {
            d.validate()?;
        }
        Ok(())
    }
}

fn default_duration_secs() -> u64 {
    6
}
fn default_ops_log() -> String {
    "metrics.log".into()
}
fn default_drivers() -> Vec<DriverConfig> {
    vec![
        DriverConfig::new(DriverKind::Gauge, "CPU_usage", 0.0, 8.0),
        DriverConfig::new(DriverKind::Gauge, "Memory_usage_GB", 0.0, 16.0),
        DriverConfig::new(DriverKind::Counter, "HTTP_requests_RPS", 0.0, 150.0),
        DriverConfig::new(DriverKind::Counter, "Server_errors", 0.0, 5.0),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverKind {
    Gauge,
    Counter,
}

/// One simulated metric source. Counter drivers round `min`/`max` to integers.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DriverConfig {
    pub kind: DriverKind,
    pub name: String,
    pub min: f64,
    pub max: f64,
}

impl DriverConfig {
    pub fn new(kind: DriverKind, name: &str, min: f64, max: f64) -> Self {
        Self { kind, name: name.to_string(), min, max }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(TallyError::Config("driver name must not be empty".into()));
        }
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(TallyError::Config(format!(
                "driver {}: min/max must be finite with min <= max",
                self.name
            )));
        }
        Ok(())
    }
}
