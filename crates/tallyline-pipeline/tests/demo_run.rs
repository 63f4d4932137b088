//! End-to-end demo run with short intervals.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;
use std::sync::Arc;

use tallyline_pipeline::config::{DemoConfig, DriverConfig, DriverKind};
use tallyline_pipeline::demo;
use tallyline_pipeline::obs::OpsLog;

#[test]
fn demo_writes_every_tick_plus_final() {
    let dir = tempfile::tempdir().unwrap();
    let sink = dir.path().join("metrics_output.txt");
    let ops_path = dir.path().join("metrics.log");

    let mut cfg = DemoConfig::default();
    cfg.collector.sink = sink.to_str().unwrap().to_string();
    cfg.collector.interval_ms = 100;
    cfg.demo.duration_secs = 1;
    cfg.demo.drivers = vec![
        DriverConfig::new(DriverKind::Gauge, "cpu", 0.0, 4.0),
        DriverConfig::new(DriverKind::Counter, "reqs", 1.0, 1.0),
    ];
    cfg.validate().unwrap();

    let ops = Arc::new(OpsLog::open(&ops_path));
    let stats = demo::run(&cfg, &ops).unwrap();
    assert_eq!(stats.written, 11);
    assert_eq!(stats.failed, 0);

    let text = fs::read_to_string(&sink).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 11);
    for line in &lines {
        assert!(line.contains("\"cpu\" "));
        assert!(line.contains("\"reqs\" "));
    }

    // Every increment of 1 shows up in exactly one interval.
    let total: i64 = lines
        .iter()
        .map(|l| l.rsplit(' ').next().unwrap().parse::<i64>().unwrap())
        .sum();
    assert_eq!(total, 10);

    let ops_text = fs::read_to_string(&ops_path).unwrap();
    assert!(ops_text.contains("[INFO] collector initialized"));
    assert!(ops_text.contains("[INFO] final metrics collection completed"));
}

#[test]
fn demo_fails_on_unopenable_sink() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = DemoConfig::default();
    cfg.collector.sink = dir.path().join("missing/out.txt").to_str().unwrap().to_string();

    let err = demo::run(&cfg, &Arc::new(OpsLog::disabled())).expect_err("must fail");
    assert_eq!(err.kind(), "SINK_OPEN");
}
