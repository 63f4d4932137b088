//! Background writer: line format, ordering, drain on stop, I/O failures.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use chrono::NaiveDateTime;
use tallyline_core::MetricSnapshot;
use tallyline_pipeline::AsyncWriter;

fn snap(n: usize) -> MetricSnapshot {
    vec![("seq".to_string(), n.to_string())].into_iter().collect()
}

fn seq_of(line: &str) -> usize {
    line.rsplit(' ').next().unwrap().parse().unwrap()
}

/// In-memory sink; fails every write whose index is in `fail_on`.
#[derive(Clone, Default)]
struct MemSink {
    buf: Arc<Mutex<Vec<u8>>>,
    writes: Arc<Mutex<usize>>,
    fail_on: Vec<usize>,
}

impl MemSink {
    fn text(&self) -> String {
        String::from_utf8(self.buf.lock().unwrap().clone()).unwrap()
    }
}

impl Write for MemSink {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut n = self.writes.lock().unwrap();
        let idx = *n;
        *n += 1;
        if self.fail_on.contains(&idx) {
            return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
        }
        self.buf.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn stop_drains_everything_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");

    let writer = AsyncWriter::open(&path).unwrap();
    for i in 0..200 {
        writer.write(snap(i));
    }
    let stats = writer.stop();
    assert_eq!(stats.written, 200);
    assert_eq!(stats.failed, 0);

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 200);
    for (i, line) in lines.iter().enumerate() {
        assert_eq!(seq_of(line), i);
    }
}

#[test]
fn line_has_millisecond_timestamp() {
    let sink = MemSink::default();
    let writer = AsyncWriter::from_sink("mem", sink.clone()).unwrap();
    writer.write(vec![("g".to_string(), "1.00".to_string())].into_iter().collect());
    writer.stop();

    let text = sink.text();
    let line = text.lines().next().unwrap();
    let (ts, rest) = line.split_at(23);
    NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S%.3f").expect("timestamp format");
    assert_eq!(rest, " \"g\" 1.00");
}

#[test]
fn drop_also_drains() {
    let sink = MemSink::default();
    {
        let writer = AsyncWriter::from_sink("mem", sink.clone()).unwrap();
        for i in 0..10 {
            writer.write(snap(i));
        }
    }
    assert_eq!(sink.text().lines().count(), 10);
}

#[test]
fn failed_write_is_skipped_and_counted() {
    let sink = MemSink { fail_on: vec![1], ..Default::default() };
    let writer = AsyncWriter::from_sink("flaky", sink.clone()).unwrap();
    for i in 0..3 {
        writer.write(snap(i));
    }
    let stats = writer.stop();
    assert_eq!(stats.written, 2);
    assert_eq!(stats.failed, 1);

    let seqs: Vec<usize> = sink.text().lines().map(seq_of).collect();
    assert_eq!(seqs, vec![0, 2]);
}

#[test]
fn appends_to_existing_sink() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");
    fs::write(&path, "previous line\n").unwrap();

    let writer = AsyncWriter::open(&path).unwrap();
    writer.write(snap(1));
    writer.stop();

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "previous line");
}

#[test]
fn unopenable_sink_is_an_init_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no/such/dir/out.txt");
    let err = AsyncWriter::open(&path).err().expect("must fail");
    assert_eq!(err.kind(), "SINK_OPEN");
}

#[test]
fn stop_with_nothing_queued_returns() {
    let writer = AsyncWriter::from_sink("idle", io::sink()).unwrap();
    assert_eq!(writer.pending(), 0);
    assert_eq!(writer.stop().written, 0);
}
