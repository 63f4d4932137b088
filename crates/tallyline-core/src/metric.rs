//! Metric value holders.
//!
//! `Counter` accumulates an integer total, `Gauge` keeps the last value set.
//! Each instance guards its value with its own lock so unrelated metrics never
//! contend. `Metric` is the closed set the collector works over; it holds
//! shared handles so driver code can keep mutating after registration.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

/// Integer accumulator, reset to 0 at every collection.
pub struct Counter {
    name: String,
    value: Mutex<i64>,
}

impl Counter {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), value: Mutex::new(0) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Increment by 1.
    pub fn inc(&self) {
        self.increment(1);
    }

    /// Add an arbitrary signed delta. Zero and negative deltas are accepted.
    pub fn increment(&self, delta: i64) {
        let mut v = self.value.lock();
        *v = v.wrapping_add(delta);
    }

    pub fn get(&self) -> i64 {
        *self.value.lock()
    }

    pub fn value_string(&self) -> String {
        self.get().to_string()
    }

    pub fn reset(&self) {
        *self.value.lock() = 0;
    }

    /// Read and zero the value under one lock acquisition.
    pub fn take(&self) -> i64 {
        std::mem::take(&mut *self.value.lock())
    }
}

impl fmt::Debug for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Counter").field("name", &self.name).field("value", &self.get()).finish()
    }
}

/// Last-write-wins floating value, reset to 0.0 at every collection.
pub struct Gauge {
    name: String,
    value: Mutex<f64>,
}

impl Gauge {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), value: Mutex::new(0.0) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replace the stored value.
    pub fn update(&self, value: f64) {
        *self.value.lock() = value;
    }

    pub fn get(&self) -> f64 {
        *self.value.lock()
    }

    /// Fixed-point, exactly two fractional digits.
    pub fn value_string(&self) -> String {
        format_gauge(self.get())
    }

    pub fn reset(&self) {
        *self.value.lock() = 0.0;
    }

    /// Read and zero the value under one lock acquisition.
    pub fn take(&self) -> f64 {
        std::mem::replace(&mut *self.value.lock(), 0.0)
    }
}

impl fmt::Debug for Gauge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gauge").field("name", &self.name).field("value", &self.get()).finish()
    }
}

fn format_gauge(v: f64) -> String {
    format!("{v:.2}")
}

/// A registered metric. Cloning clones the handle, not the value.
#[derive(Debug, Clone)]
pub enum Metric {
    Counter(Arc<Counter>),
    Gauge(Arc<Gauge>),
}

impl Metric {
    pub fn name(&self) -> &str {
        match self {
            Metric::Counter(c) => c.name(),
            Metric::Gauge(g) => g.name(),
        }
    }

    pub fn value_string(&self) -> String {
        match self {
            Metric::Counter(c) => c.value_string(),
            Metric::Gauge(g) => g.value_string(),
        }
    }

    pub fn reset(&self) {
        match self {
            Metric::Counter(c) => c.reset(),
            Metric::Gauge(g) => g.reset(),
        }
    }

    /// Render the current value and reset it atomically, so an update racing
    /// with collection lands either in this interval or the next, never lost.
    pub fn take_value_string(&self) -> String {
        match self {
            Metric::Counter(c) => c.take().to_string(),
            Metric::Gauge(g) => format_gauge(g.take()),
        }
    }
}

impl From<Arc<Counter>> for Metric {
    fn from(c: Arc<Counter>) -> Self {
        Metric::Counter(c)
    }
}

impl From<Arc<Gauge>> for Metric {
    fn from(g: Arc<Gauge>) -> Self {
        Metric::Gauge(g)
    }
}
