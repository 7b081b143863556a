use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn tdsweep(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tdsweep"))
        .args(args)
        .output()
        .expect("run tdsweep")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn ranges_preset_task_lines() {
    let output = tdsweep(&["plan", "--preset", "ranges", "--format", "task"]);
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 342);
    assert_eq!(lines[0], "run -timedemo 3 10 0.05");
    assert_eq!(lines[341], "run -timedemo 8 30 1.252687");
    assert!(lines.iter().any(|line| line == "run -timedemo 3 10 0.06"));
}

fn significant_digits(radius: &str) -> usize {
    radius
        .chars()
        .filter(char::is_ascii_digit)
        .skip_while(|digit| *digit == '0')
        .count()
}

#[test]
fn volume_preset_radii_keep_twelve_digits() {
    let output = tdsweep(&["plan", "--preset", "volume", "--format", "task"]);
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 660);
    for line in &lines {
        let radius = line.rsplit(' ').next().expect("radius");
        assert!(significant_digits(radius) <= 12, "{line}");
    }
}

#[test]
fn unknown_preset_fails() {
    let output = tdsweep(&["plan", "--preset", "spiral"]);
    assert!(!output.status.success());
}

#[test]
fn geom_volume_of_unit_three_ball() {
    let output = tdsweep(&["geom", "volume", "--dim", "3", "--radius", "1"]);
    assert!(output.status.success());
    let value: f64 = String::from_utf8_lossy(&output.stdout).trim().parse().expect("float");
    assert!((value - 4.0 / 3.0 * std::f64::consts::PI).abs() < 1e-9);
}

const FAKE_BENCHMARK: &str = r#"echo "$1" >> calls.txt
case "$1" in
  *" 4 10 0.1") exit 5 ;;
esac
exit 0
"#;

const PLAN: &str = r#"name: cli-smoke
radii:
  type: grid
  dimensions: [3, 4]
  radii: [0.2, 0.1]
points:
  type: list
  values: [10]
invoker:
  launcher: sh fake.sh
artifacts:
  backup: [static_times.csv, drawing_times.csv]
  log:
    source: timedemo.log
    aggregate: all_timedemo.log
"#;

fn workspace(dir: &Path) {
    fs::write(dir.join("fake.sh"), FAKE_BENCHMARK).expect("write fake benchmark");
    fs::write(dir.join("plan.yaml"), PLAN).expect("write plan");
    fs::write(dir.join("static_times.csv"), "previous\n").expect("write artifact");
    fs::write(dir.join("timedemo.log"), "stale\n").expect("write log fragment");
}

#[cfg(unix)]
#[test]
fn run_aborts_with_benchmark_status() {
    let dir = tempfile::tempdir().expect("tmp dir");
    workspace(dir.path());
    let plan = dir.path().join("plan.yaml");
    let report = dir.path().join("report.json");
    let output = tdsweep(&[
        "run",
        "--plan",
        plan.to_str().unwrap(),
        "--workdir",
        dir.path().to_str().unwrap(),
        "--report",
        report.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(5));
    let calls = fs::read_to_string(dir.path().join("calls.txt")).expect("calls");
    assert_eq!(
        calls,
        "run -timedemo 3 10 0.1\nrun -timedemo 3 10 0.2\nrun -timedemo 4 10 0.1\n"
    );
    assert!(dir.path().join("static_times.csv.old").exists());
    assert!(!dir.path().join("static_times.csv").exists());

    let value: serde_json::Value =
        serde_json::from_slice(&fs::read(&report).expect("report")).expect("json");
    assert_eq!(value["outcome"]["status"], "aborted");
    assert_eq!(value["outcome"]["index"], 2);
    assert_eq!(value["planned"], 4);
}

#[test]
fn dry_run_prints_shell_lines_and_keeps_artifacts() {
    let dir = tempfile::tempdir().expect("tmp dir");
    workspace(dir.path());
    let plan = dir.path().join("plan.yaml");
    let output = tdsweep(&[
        "run",
        "--plan",
        plan.to_str().unwrap(),
        "--workdir",
        dir.path().to_str().unwrap(),
        "--dry-run",
    ]);
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "sh fake.sh \"run -timedemo 3 10 0.1\"");
    assert!(dir.path().join("static_times.csv").exists());
    assert!(!dir.path().join("calls.txt").exists());
    assert!(!dir.path().join("all_timedemo.log").exists());
}

#[cfg(unix)]
#[test]
fn driver_failure_still_writes_report_and_ledger() {
    let dir = tempfile::tempdir().expect("tmp dir");
    workspace(dir.path());
    fs::create_dir(dir.path().join("all_timedemo.log")).expect("aggregate dir");
    let plan = dir.path().join("plan.yaml");
    let report = dir.path().join("report.json");
    let ledger = dir.path().join("ledger.csv");
    let output = tdsweep(&[
        "run",
        "--plan",
        plan.to_str().unwrap(),
        "--workdir",
        dir.path().to_str().unwrap(),
        "--report",
        report.to_str().unwrap(),
        "--ledger",
        ledger.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value =
        serde_json::from_slice(&fs::read(&report).expect("report")).expect("json");
    assert_eq!(value["outcome"]["status"], "failed");
    assert_eq!(value["outcome"]["index"], 0);
    assert_eq!(value["invocations"].as_array().map(Vec::len), Some(1));
    let rows = fs::read_to_string(&ledger).expect("ledger");
    assert_eq!(rows.lines().count(), 2);
}
