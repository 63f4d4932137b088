//! Snapshot line rendering.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use tallyline_core::MetricSnapshot;

#[test]
fn renders_entries_in_order() {
    let snap: MetricSnapshot = vec![
        ("g".to_string(), "123.45".to_string()),
        ("c".to_string(), "7".to_string()),
    ]
    .into_iter()
    .collect();

    let line = snap.render_line("2024-01-02 03:04:05.006");
    assert_eq!(line, "2024-01-02 03:04:05.006 \"g\" 123.45 \"c\" 7\n");
}

#[test]
fn empty_snapshot_renders_timestamp_only() {
    let snap = MetricSnapshot::default();
    assert!(snap.is_empty());
    assert_eq!(snap.render_line("ts"), "ts\n");
}

#[test]
fn duplicate_names_are_kept() {
    let snap: MetricSnapshot = vec![
        ("x".to_string(), "1".to_string()),
        ("x".to_string(), "2".to_string()),
    ]
    .into_iter()
    .collect();
    assert_eq!(snap.len(), 2);
    assert_eq!(snap.render_line("t"), "t \"x\" 1 \"x\" 2\n");
}
