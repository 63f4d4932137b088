//! Demo run: simulated drivers feeding a collector on a fixed cadence.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tallyline_core::error::Result;
use tallyline_core::{Counter, Gauge};

use crate::collector::Collector;
use crate::config::{DemoConfig, DriverConfig, DriverKind};
use crate::drivers::{self, Schedule};
use crate::obs::OpsLog;
use crate::writer::{AsyncWriter, WriterStats};

/// Run the configured simulation to completion and return the writer stats.
pub fn run(cfg: &DemoConfig, ops: &Arc<OpsLog>) -> Result<WriterStats> {
    let writer = AsyncWriter::open(&cfg.collector.sink)?
        .with_warn_depth(cfg.collector.queue_warn_depth);
    let collector = Collector::new(writer);
    ops.info(&format!("collector initialized with sink: {}", cfg.collector.sink));

    let interval = Duration::from_millis(cfg.collector.interval_ms);
    let ticks = (cfg.demo.duration_secs * 1000 / cfg.collector.interval_ms).max(1);
    let schedule = Schedule { ticks, every: interval };

    let mut handles = Vec::with_capacity(cfg.demo.drivers.len());
    for d in &cfg.demo.drivers {
        match register_and_spawn(&collector, d, schedule, ops) {
            Ok(h) => handles.push(h),
            Err(e) => {
                ops.error(&format!("driver {} failed to start: {e}", d.name));
                join_drivers(handles, ops);
                return Err(e);
            }
        }
    }
    ops.info(&format!("{} metrics registered", collector.len()));

    for tick in 1..=ticks {
        let entries = collector.collect_and_write();
        tracing::debug!(tick, entries, "metrics collected");
        thread::sleep(interval);
    }

    join_drivers(handles, ops);

    collector.collect_and_write();
    ops.info("final metrics collection completed");

    Ok(collector.shutdown())
}

fn register_and_spawn(
    collector: &Collector,
    d: &DriverConfig,
    schedule: Schedule,
    ops: &Arc<OpsLog>,
) -> Result<JoinHandle<()>> {
    match d.kind {
        DriverKind::Gauge => {
            let g = Arc::new(Gauge::new(d.name.clone()));
            collector.add_metric(Arc::clone(&g));
            drivers::spawn_gauge_driver(g, d.min, d.max, schedule, Arc::clone(ops))
        }
        DriverKind::Counter => {
            let c = Arc::new(Counter::new(d.name.clone()));
            collector.add_metric(Arc::clone(&c));
            let (min, max) = (d.min.round() as i64, d.max.round() as i64);
            drivers::spawn_counter_driver(c, min, max, schedule, Arc::clone(ops))
        }
    }
}

fn join_drivers(handles: Vec<JoinHandle<()>>, ops: &OpsLog) {
    for h in handles {
        let name = h.thread().name().unwrap_or("driver").to_string();
        if h.join().is_err() {
            ops.error(&format!("{name} panicked"));
        }
    }
}
