use std::fs;
use std::path::PathBuf;

use sweep_core::SweepError;
use sweep_plan::{load_plan, preset, PointSpec, RadiusStrategy};

fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join(relative)
}

#[test]
fn shipped_plans_match_presets() {
    for name in ["ranges", "volume", "fragmentation"] {
        let loaded = load_plan(fixture_path(&format!("plans/{name}.yaml"))).expect("load plan");
        assert_eq!(loaded, preset(name).expect("preset"), "plan {name}");
    }
}

#[test]
fn smoke_plan_fills_defaults() {
    let plan = load_plan(fixture_path("plans/smoke.yaml")).expect("load plan");
    assert_eq!(plan.invoker.launcher, "sbt");
    assert_eq!(plan.invoker.task, "run -timedemo");
    assert_eq!(plan.artifacts.backup.len(), 7);
    let log = plan.artifacts.log.expect("log capture");
    assert_eq!(log.aggregate, PathBuf::from("all_timedemo.log"));
    assert_eq!(plan.lookup.program, "Rscript");
}

#[test]
fn plan_hash_is_stable_and_content_sensitive() {
    let plan = preset("volume").expect("preset");
    assert_eq!(plan.plan_hash().unwrap(), plan.clone().plan_hash().unwrap());
    let mut other = plan.clone();
    other.points = PointSpec::List { values: vec![1024] };
    assert_ne!(plan.plan_hash().unwrap(), other.plan_hash().unwrap());
}

#[test]
fn yaml_written_by_plan_loads_back() {
    let plan = preset("ranges").expect("preset");
    let dir = tempfile::tempdir().expect("tmp dir");
    let path = dir.path().join("ranges.yaml");
    fs::write(&path, plan.to_yaml_string().expect("yaml")).expect("write");
    assert_eq!(load_plan(&path).expect("load"), plan);
}

fn write_plan(body: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tmp dir");
    let path = dir.path().join("plan.yaml");
    fs::write(&path, body).expect("write plan");
    (dir, path)
}

#[test]
fn inverted_range_is_rejected() {
    let (_dir, path) = write_plan(
        "radii:\n  type: merged\n  steps: 4\n  ranges:\n    - { dimension: 3, min: 0.5, max: 0.1 }\npoints:\n  type: list\n  values: [10]\n",
    );
    let err = load_plan(&path).unwrap_err();
    assert_eq!(err.info().code, "range_inverted");
}

#[test]
fn volume_reduction_below_one_is_rejected() {
    let (_dir, path) = write_plan(
        "radii:\n  type: volume-normalized\n  dimensions: [2, 3]\n  radii: [0.1]\npoints:\n  type: list\n  values: [10]\n",
    );
    let err = load_plan(&path).unwrap_err();
    assert_eq!(err.info().code, "dimension_reduction");
}

#[test]
fn empty_points_are_rejected() {
    let (_dir, path) = write_plan(
        "radii:\n  type: grid\n  dimensions: [3]\n  radii: [0.1]\npoints:\n  type: list\n  values: []\n",
    );
    assert_eq!(load_plan(&path).unwrap_err().info().code, "points_empty");
}

#[test]
fn unknown_strategy_is_serde_error() {
    let (_dir, path) = write_plan("radii:\n  type: spiral\npoints:\n  type: list\n  values: [1]\n");
    assert!(matches!(load_plan(&path).unwrap_err(), SweepError::Serde(_)));
}

#[test]
fn merged_sort_defaults_to_true() {
    let (_dir, path) = write_plan(
        "radii:\n  type: merged\n  steps: 2\n  exact:\n    - { dimension: 4, radius: 0.3 }\npoints:\n  type: list\n  values: [10]\n",
    );
    let plan = load_plan(&path).expect("load");
    assert!(matches!(plan.radii, RadiusStrategy::Merged { sort: true, .. }));
}

#[test]
fn missing_file_is_io_error() {
    let err = load_plan(fixture_path("plans/does-not-exist.yaml")).unwrap_err();
    assert!(matches!(err, SweepError::Io(_)));
}
