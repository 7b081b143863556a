use std::fs;
use std::path::PathBuf;

use sweep_core::ExperimentTuple;
use sweep_exec::{
    append_ledger, append_log_fragment, backup_artifacts, read_ledger, InvocationRecord,
    SweepOutcome, SweepReport,
};

fn listing(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("read dir")
        .map(|entry| entry.expect("entry").file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

#[test]
fn missing_backup_target_is_silently_ignored() {
    let dir = tempfile::tempdir().expect("tmp dir");
    fs::write(dir.path().join("unrelated.txt"), "keep").expect("write");
    let before = listing(dir.path());

    let moved = backup_artifacts(dir.path(), &[PathBuf::from("all_times.csv")]);

    assert!(moved.is_empty());
    assert_eq!(listing(dir.path()), before);
}

#[test]
fn existing_artifacts_move_to_old_suffix() {
    let dir = tempfile::tempdir().expect("tmp dir");
    fs::write(dir.path().join("static_times.csv"), "d,p,r,t\n").expect("write");
    let moved = backup_artifacts(
        dir.path(),
        &[
            PathBuf::from("static_times.csv"),
            PathBuf::from("drawing_times.csv"),
        ],
    );
    assert_eq!(moved, vec![dir.path().join("static_times.csv")]);
    assert_eq!(listing(dir.path()), vec!["static_times.csv.old".to_string()]);
    let content = fs::read_to_string(dir.path().join("static_times.csv.old")).expect("read");
    assert_eq!(content, "d,p,r,t\n");
}

#[test]
fn backup_replaces_previous_old_file() {
    let dir = tempfile::tempdir().expect("tmp dir");
    fs::write(dir.path().join("drawing_times.csv"), "new").expect("write");
    fs::write(dir.path().join("drawing_times.csv.old"), "stale").expect("write");
    backup_artifacts(dir.path(), &[PathBuf::from("drawing_times.csv")]);
    let content = fs::read_to_string(dir.path().join("drawing_times.csv.old")).expect("read");
    assert_eq!(content, "new");
}

#[test]
fn missing_log_source_appends_nothing() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let appended = append_log_fragment(
        &dir.path().join("timedemo.log"),
        &dir.path().join("all_timedemo.log"),
    )
    .expect("append");
    assert_eq!(appended, 0);
    assert!(!dir.path().join("all_timedemo.log").exists());
}

fn report(exit_codes: &[i32]) -> SweepReport {
    let invocations = exit_codes
        .iter()
        .enumerate()
        .map(|(index, exit_code)| InvocationRecord {
            index,
            tuple: ExperimentTuple::new(3, 1024, 0.05 * (index + 1) as f64),
            command: format!("sbt \"run -timedemo 3 1024 {}\"", index),
            exit_code: *exit_code,
            elapsed_ms: 5,
        })
        .collect();
    SweepReport {
        plan_name: "smoke".to_string(),
        plan_hash: "abc".to_string(),
        planned: 4,
        invocations,
        outcome: SweepOutcome::Completed,
    }
}

#[test]
fn ledger_writes_header_once_across_appends() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let path = dir.path().join("ledger").join("sweeps.csv");
    append_ledger(&path, &report(&[0, 0])).expect("first append");
    append_ledger(&path, &report(&[0, 0, 1])).expect("second append");

    let text = fs::read_to_string(&path).expect("read");
    assert_eq!(text.matches("plan_name").count(), 1);

    let rows = read_ledger(&path).expect("read ledger");
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[4].exit_code, 1);
    assert_eq!(rows[4].index, 2);
    assert_eq!(rows[0].point_count, 1024);
}
