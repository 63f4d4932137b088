//! tallyline demo
//!
//! Simulated CPU/memory gauges and request/error counters, collected on a
//! fixed interval and appended to the metrics sink by the background writer.
//! Usage: `tallyline-demo [config.yaml]`; built-in defaults without a path.

use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use tallyline_pipeline::config::{self, DemoConfig};
use tallyline_pipeline::demo;
use tallyline_pipeline::obs::OpsLog;

fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = match std::env::args().nth(1) {
        Some(path) => config::load_from_file(&path),
        None => Ok(DemoConfig::default()),
    };
    let cfg = match cfg {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(error = %e, kind = e.kind(), "config load failed");
            return ExitCode::FAILURE;
        }
    };

    let ops = Arc::new(OpsLog::open(&cfg.demo.ops_log));
    tracing::info!(sink = %cfg.collector.sink, "tallyline demo starting");

    match demo::run(&cfg, &ops) {
        Ok(stats) => {
            tracing::info!(
                sink = %cfg.collector.sink,
                written = stats.written,
                failed = stats.failed,
                "metrics collection completed"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            ops.error(&format!("demo failed: {e}"));
            ExitCode::FAILURE
        }
    }
}
