use std::time::Instant;

use chrono::Local;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

use energize::core::plant::{
    complete_deferred, export_to, report_filename, DeferredAction, FileSink, NotificationKind,
    SystemState, TaskQueue, REPORT_TITLE,
};
use energize::EnergizeError;

#[test]
fn test_export_writes_named_csv() {
    let dir = TempDir::new().unwrap();
    let mut sink = FileSink::new(dir.path());
    let state = SystemState::seed();
    let now = Local::now();

    let path = export_to(&mut sink, &state, now).unwrap();

    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        report_filename(now.date_naive())
    );
    assert!(path.exists());

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with(REPORT_TITLE));
}

#[test]
fn test_exported_report_row_layout() {
    let dir = TempDir::new().unwrap();
    let mut sink = FileSink::new(dir.path());
    let state = SystemState::seed();

    let path = export_to(&mut sink, &state, Local::now()).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();

    // 9 header/meta rows, 5 machines, blank, health block (2 + 3), blank,
    // suggestions header, 5 suggestions
    assert_eq!(lines.len(), 27);
    assert_eq!(lines[3], "System Status:,Online");
    assert_eq!(lines[4], "Total Live Usage:,6.50 kWh");
    assert_eq!(lines[5], "Total Savings Today:,$127.50");

    // Every machine row's usage field has exactly two decimal places
    for line in &lines[9..14] {
        let usage = line.split(',').nth(2).unwrap();
        assert_eq!(usage.split('.').nth(1).unwrap().len(), 2);
    }
}

#[test]
fn test_deferred_export_delivers_through_sink() {
    let dir = TempDir::new().unwrap();
    let mut sink = FileSink::new(dir.path());
    let mut state = SystemState::seed();
    let mut queue = TaskQueue::new();
    let mut rng = StdRng::seed_from_u64(0);

    let notice = complete_deferred(
        DeferredAction::BuildReport,
        &mut state,
        &mut queue,
        &mut rng,
        &mut sink,
        Instant::now(),
    );

    assert_eq!(notice.kind, NotificationKind::Success);
    assert_eq!(notice.title, "Report Ready");

    let expected = dir.path().join(report_filename(Local::now().date_naive()));
    assert!(expected.exists());
}

#[test]
fn test_export_to_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("does-not-exist");
    let mut sink = FileSink::new(missing);
    let state = SystemState::seed();

    let err = export_to(&mut sink, &state, Local::now()).unwrap_err();
    assert!(matches!(err, EnergizeError::Report(_)));
}

#[test]
fn test_deferred_export_failure_is_reported() {
    let dir = TempDir::new().unwrap();
    let mut sink = FileSink::new(dir.path().join("does-not-exist"));
    let mut state = SystemState::seed();
    let mut queue = TaskQueue::new();
    let mut rng = StdRng::seed_from_u64(0);

    let notice = complete_deferred(
        DeferredAction::BuildReport,
        &mut state,
        &mut queue,
        &mut rng,
        &mut sink,
        Instant::now(),
    );

    assert_eq!(notice.kind, NotificationKind::Error);
    assert_eq!(notice.title, "Report Failed");
}
