//! Simulated metric sources for the demo binary.
//!
//! Each driver owns one thread that mutates a metric once per tick with a
//! uniformly random value and reports the step to the ops log.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rand::Rng;

use tallyline_core::error::{Result, TallyError};
use tallyline_core::{Counter, Gauge};

use crate::obs::OpsLog;

/// How long and how often a driver runs.
#[derive(Debug, Clone, Copy)]
pub struct Schedule {
    pub ticks: u64,
    pub every: Duration,
}

/// Set `gauge` to a random value in `[min, max]` every tick.
pub fn spawn_gauge_driver(
    gauge: Arc<Gauge>,
    min: f64,
    max: f64,
    schedule: Schedule,
    ops: Arc<OpsLog>,
) -> Result<JoinHandle<()>> {
    let name = format!("driver-{}", gauge.name());
    thread::Builder::new()
        .name(name)
        .spawn(move || {
            let mut rng = rand::rng();
            for _ in 0..schedule.ticks {
                let v = rng.random_range(min..=max);
                gauge.update(v);
                ops.info(&format!("{} simulated: {v:.6}", gauge.name()));
                thread::sleep(schedule.every);
            }
        })
        .map_err(TallyError::Spawn)
}

/// Add a random integer in `[min, max]` to `counter` every tick.
pub fn spawn_counter_driver(
    counter: Arc<Counter>,
    min: i64,
    max: i64,
    schedule: Schedule,
    ops: Arc<OpsLog>,
) -> Result<JoinHandle<()>> {
    let name = format!("driver-{}", counter.name());
    thread::Builder::new()
        .name(name)
        .spawn(move || {
            let mut rng = rand::rng();
            for _ in 0..schedule.ticks {
                let delta = rng.random_range(min..=max);
                counter.increment(delta);
                ops.info(&format!("{} simulated: {delta}", counter.name()));
                thread::sleep(schedule.every);
            }
        })
        .map_err(TallyError::Spawn)
}
