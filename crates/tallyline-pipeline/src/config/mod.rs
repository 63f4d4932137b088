//! Demo config loader (strict parsing).

pub mod schema;

use std::fs;

use tallyline_core::error::{Result, TallyError};

pub use schema::{CollectorSection, DemoConfig, DemoSection, DriverConfig, DriverKind};

pub fn load_from_file(path: &str) -> Result<DemoConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| TallyError::Config(format!("read config {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<DemoConfig> {
    let cfg: DemoConfig = serde_yaml::from_str(s)
        .map_err(|e| TallyError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
