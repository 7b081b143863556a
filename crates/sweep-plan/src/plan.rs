use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sweep_core::{
    from_yaml_slice, stable_hash_string, to_yaml_string, ErrorInfo, RadiusPoint, SweepError,
};

fn plan_error(code: &str, message: impl Into<String>) -> SweepError {
    SweepError::Plan(ErrorInfo::new(code, message))
}

/// Linear radius range for a single dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeDescriptor {
    /// Dimension the range applies to.
    pub dimension: u32,
    /// Smallest radius (inclusive).
    pub min: f64,
    /// Largest radius (inclusive).
    pub max: f64,
}

impl RangeDescriptor {
    /// Creates a new range descriptor.
    pub const fn new(dimension: u32, min: f64, max: f64) -> Self {
        Self { dimension, min, max }
    }
}

/// How (dimension, radius) pairs are produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RadiusStrategy {
    /// Range-expanded radii combined with an explicit list of exact pairs.
    Merged {
        /// Number of intervals each range is split into (`steps + 1` samples).
        steps: usize,
        /// Ranges expanded into evenly spaced radii.
        #[serde(default)]
        ranges: Vec<RangeDescriptor>,
        /// Exact (dimension, radius) pairs appended after the ranges.
        #[serde(default)]
        exact: Vec<RadiusPoint>,
        /// Sort the combined list by (dimension, radius) before emission.
        #[serde(default = "default_sort")]
        sort: bool,
    },
    /// Every dimension paired with every radius, unconverted.
    Grid {
        /// Dimensions in sweep order.
        dimensions: Vec<u32>,
        /// Radii, visited in ascending order for each dimension.
        radii: Vec<f64>,
    },
    /// Radii converted so that `volume_factor * r` is held as a volume in
    /// `dimension - reduce_by` dimensions.
    VolumeNormalized {
        /// Dimensions in sweep order.
        dimensions: Vec<u32>,
        /// Base radii, visited in ascending order for each dimension.
        radii: Vec<f64>,
        /// Dimension whose radii are used unchanged.
        #[serde(default = "default_reference_dimension")]
        reference_dimension: u32,
        /// Dimension reduction applied before solving for the radius.
        #[serde(default = "default_reduce_by")]
        reduce_by: u32,
        /// Multiplier turning a base radius into the held volume.
        #[serde(default = "default_volume_factor")]
        volume_factor: f64,
    },
    /// Radii converted through the external fragmentation statistic.
    FragmentationNormalized {
        /// Dimensions in sweep order.
        dimensions: Vec<u32>,
        /// Base radii, visited in ascending order for each dimension.
        radii: Vec<f64>,
        /// Dimension the fragmentation statistic is measured in.
        #[serde(default = "default_reference_dimension")]
        reference_dimension: u32,
    },
}

fn default_sort() -> bool {
    true
}

fn default_reference_dimension() -> u32 {
    3
}

fn default_reduce_by() -> u32 {
    2
}

fn default_volume_factor() -> f64 {
    2.0
}

impl RadiusStrategy {
    /// Returns true when expansion needs a fragmentation lookup.
    pub fn needs_lookup(&self) -> bool {
        matches!(self, RadiusStrategy::FragmentationNormalized { .. })
    }
}

/// Point counts applied to every radius point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PointSpec {
    /// Explicit list, visited in order.
    List {
        /// Point counts.
        values: Vec<u64>,
    },
    /// `2^min_exp ..= 2^max_exp`.
    PowersOfTwo {
        /// Smallest exponent (inclusive).
        min_exp: u32,
        /// Largest exponent (inclusive).
        max_exp: u32,
    },
}

impl PointSpec {
    /// Expands into concrete point counts.
    pub fn counts(&self) -> Vec<u64> {
        match self {
            PointSpec::List { values } => values.clone(),
            PointSpec::PowersOfTwo { min_exp, max_exp } => {
                (*min_exp..=*max_exp).map(|exp| 1u64 << exp).collect()
            }
        }
    }
}

/// Benchmark command template: `<launcher> "<task> <d> <N> <r>"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvokerSpec {
    /// Build/run tool the task is handed to.
    #[serde(default = "default_launcher")]
    pub launcher: String,
    /// Task keyword preceding the tuple fields.
    #[serde(default = "default_task")]
    pub task: String,
    /// Directory the benchmark runs in. Relative to the driver's working directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workdir: Option<PathBuf>,
}

fn default_launcher() -> String {
    "sbt".to_string()
}

fn default_task() -> String {
    "run -timedemo".to_string()
}

impl Default for InvokerSpec {
    fn default() -> Self {
        Self {
            launcher: default_launcher(),
            task: default_task(),
            workdir: None,
        }
    }
}

/// Per-invocation log capture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogCapture {
    /// Log written by the benchmark on each run.
    pub source: PathBuf,
    /// File the source log is appended to after every run.
    pub aggregate: PathBuf,
}

/// Files the benchmark produces that the driver touches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactSpec {
    /// Files renamed to `<name>.old` before the sweep starts.
    #[serde(default = "default_backup")]
    pub backup: Vec<PathBuf>,
    /// Optional log aggregation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<LogCapture>,
}

fn default_backup() -> Vec<PathBuf> {
    vec![
        PathBuf::from("static_times.csv"),
        PathBuf::from("drawing_times.csv"),
    ]
}

impl Default for ArtifactSpec {
    fn default() -> Self {
        Self {
            backup: default_backup(),
            log: None,
        }
    }
}

/// External statistics script used by fragmentation normalisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupSpec {
    /// Interpreter executable.
    #[serde(default = "default_lookup_program")]
    pub program: String,
    /// Script sourced before evaluating the lookup expression.
    #[serde(default = "default_lookup_source")]
    pub source: PathBuf,
}

fn default_lookup_program() -> String {
    "Rscript".to_string()
}

fn default_lookup_source() -> PathBuf {
    PathBuf::from("frags.R")
}

impl Default for LookupSpec {
    fn default() -> Self {
        Self {
            program: default_lookup_program(),
            source: default_lookup_source(),
        }
    }
}

/// Immutable description of a complete sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPlan {
    /// Label used in logs and reports.
    #[serde(default)]
    pub name: String,
    /// Radius generation strategy.
    pub radii: RadiusStrategy,
    /// Point counts run for every radius point.
    pub points: PointSpec,
    /// Benchmark command template.
    #[serde(default)]
    pub invoker: InvokerSpec,
    /// Artifact housekeeping.
    #[serde(default)]
    pub artifacts: ArtifactSpec,
    /// Fragmentation lookup settings.
    #[serde(default)]
    pub lookup: LookupSpec,
}

impl SweepPlan {
    /// Returns the deterministic hash associated with the plan contents.
    pub fn plan_hash(&self) -> Result<String, SweepError> {
        stable_hash_string(self)
    }

    /// Produces a YAML representation of the plan.
    pub fn to_yaml_string(&self) -> Result<String, SweepError> {
        to_yaml_string(self)
    }

    /// Checks the plan for values the generator cannot expand.
    pub fn validate(&self) -> Result<(), SweepError> {
        validate_points(&self.points)?;
        validate_radii(&self.radii)?;
        if self.invoker.launcher.trim().is_empty() {
            return Err(plan_error("invoker_launcher", "launcher must not be empty"));
        }
        Ok(())
    }
}

fn validate_points(points: &PointSpec) -> Result<(), SweepError> {
    match points {
        PointSpec::List { values } => {
            if values.is_empty() {
                return Err(plan_error("points_empty", "point list must not be empty"));
            }
            if values.contains(&0) {
                return Err(plan_error("points_zero", "point counts must be positive"));
            }
        }
        PointSpec::PowersOfTwo { min_exp, max_exp } => {
            if min_exp > max_exp || *max_exp > 62 {
                return Err(SweepError::Plan(
                    ErrorInfo::new("points_exponents", "invalid power-of-two exponents")
                        .with_context("min_exp", min_exp.to_string())
                        .with_context("max_exp", max_exp.to_string())
                        .with_hint("require min_exp <= max_exp <= 62"),
                ));
            }
        }
    }
    Ok(())
}

fn validate_dimensions(dimensions: &[u32]) -> Result<(), SweepError> {
    if dimensions.is_empty() {
        return Err(plan_error("dimensions_empty", "dimension list must not be empty"));
    }
    if dimensions.contains(&0) {
        return Err(plan_error("dimension_zero", "dimensions must be positive"));
    }
    Ok(())
}

fn validate_radius(radius: f64) -> Result<(), SweepError> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(SweepError::Plan(
            ErrorInfo::new("radius_invalid", "radii must be positive and finite")
                .with_context("radius", radius.to_string()),
        ))
    }
}

fn validate_radius_list(radii: &[f64]) -> Result<(), SweepError> {
    if radii.is_empty() {
        return Err(plan_error("radii_empty", "radius list must not be empty"));
    }
    radii.iter().try_for_each(|radius| validate_radius(*radius))
}

fn validate_radii(strategy: &RadiusStrategy) -> Result<(), SweepError> {
    match strategy {
        RadiusStrategy::Merged { ranges, exact, .. } => {
            if ranges.is_empty() && exact.is_empty() {
                return Err(plan_error(
                    "merged_empty",
                    "merged strategy needs at least one range or exact pair",
                ));
            }
            for range in ranges {
                if range.dimension == 0 {
                    return Err(plan_error("dimension_zero", "dimensions must be positive"));
                }
                validate_radius(range.min)?;
                validate_radius(range.max)?;
                if range.min > range.max {
                    return Err(SweepError::Plan(
                        ErrorInfo::new("range_inverted", "range minimum exceeds maximum")
                            .with_context("dimension", range.dimension.to_string()),
                    ));
                }
            }
            for point in exact {
                if point.dimension == 0 {
                    return Err(plan_error("dimension_zero", "dimensions must be positive"));
                }
                validate_radius(point.radius)?;
            }
        }
        RadiusStrategy::Grid { dimensions, radii }
        | RadiusStrategy::FragmentationNormalized {
            dimensions, radii, ..
        } => {
            validate_dimensions(dimensions)?;
            validate_radius_list(radii)?;
        }
        RadiusStrategy::VolumeNormalized {
            dimensions,
            radii,
            reference_dimension,
            reduce_by,
            volume_factor,
        } => {
            validate_dimensions(dimensions)?;
            validate_radius_list(radii)?;
            if !(volume_factor.is_finite() && *volume_factor > 0.0) {
                return Err(plan_error("volume_factor", "volume factor must be positive"));
            }
            for dimension in dimensions {
                if dimension != reference_dimension && *dimension <= *reduce_by {
                    return Err(SweepError::Plan(
                        ErrorInfo::new(
                            "dimension_reduction",
                            "reduced dimension must stay positive",
                        )
                        .with_context("dimension", dimension.to_string())
                        .with_context("reduce_by", reduce_by.to_string()),
                    ));
                }
            }
        }
    }
    Ok(())
}

/// Loads and validates a plan from a YAML file.
pub fn load_plan<P: AsRef<Path>>(path: P) -> Result<SweepPlan, SweepError> {
    let plan_path = path.as_ref();
    let bytes = fs::read(plan_path).map_err(|err| SweepError::io("plan_read", plan_path, err))?;
    let plan: SweepPlan = from_yaml_slice(&bytes)?;
    plan.validate()?;
    Ok(plan)
}
