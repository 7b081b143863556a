use std::path::{Path, PathBuf};
use std::process::Command;

use sweep_core::{ErrorInfo, SweepError};

use crate::plan::LookupSpec;

/// External fragmentation statistic and its inverse.
pub trait FragmentationLookup {
    /// Fragmentation of a ball of `radius` in `dimension` dimensions.
    fn fragmentation(&self, dimension: u32, radius: f64) -> Result<f64, SweepError>;

    /// Radius in `dimension` dimensions producing the given fragmentation.
    fn radius_for_fragmentation(&self, value: f64, dimension: u32) -> Result<f64, SweepError>;
}

/// Parses the single scalar a lookup script prints on stdout.
pub fn parse_scalar(output: &str) -> Result<f64, SweepError> {
    let trimmed = output.trim();
    trimmed.parse::<f64>().map_err(|err| {
        SweepError::Lookup(
            ErrorInfo::new("lookup_parse", "lookup output is not a float")
                .with_context("output", trimmed)
                .with_hint(err.to_string()),
        )
    })
}

/// Evaluates the lookup functions by running a statistics interpreter.
///
/// Each call runs `<program> -e 'source("<script>"); cat(<expr>)'` and blocks
/// until it exits.
#[derive(Debug, Clone)]
pub struct ScriptLookup {
    program: String,
    source: PathBuf,
}

impl ScriptLookup {
    /// Creates a lookup running `program` against the `source` script.
    pub fn new(program: impl Into<String>, source: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            source: source.into(),
        }
    }

    /// Builds a lookup from plan settings.
    pub fn from_spec(spec: &LookupSpec) -> Self {
        Self::new(spec.program.clone(), spec.source.clone())
    }

    /// Script sourced before each evaluation.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Full expression handed to the interpreter for `call`.
    pub fn script_for(&self, call: &str) -> String {
        format!("source({}); cat({})", quote(&self.source), call)
    }

    fn evaluate(&self, call: &str) -> Result<f64, SweepError> {
        let script = self.script_for(call);
        let output = Command::new(&self.program)
            .arg("-e")
            .arg(&script)
            .output()
            .map_err(|err| {
                SweepError::Lookup(
                    ErrorInfo::new("lookup_spawn", "failed to start lookup interpreter")
                        .with_context("program", self.program.clone())
                        .with_hint(err.to_string()),
                )
            })?;
        if !output.status.success() {
            return Err(SweepError::Lookup(
                ErrorInfo::new("lookup_status", "lookup interpreter exited with failure")
                    .with_context("call", call)
                    .with_context("status", output.status.to_string())
                    .with_context("stderr", String::from_utf8_lossy(&output.stderr).trim()),
            ));
        }
        let value = parse_scalar(&String::from_utf8_lossy(&output.stdout))?;
        tracing::trace!(call, value, "lookup evaluated");
        Ok(value)
    }
}

fn quote(path: &Path) -> String {
    let raw = path.to_string_lossy();
    format!("\"{}\"", raw.replace('\\', "\\\\").replace('"', "\\\""))
}

impl FragmentationLookup for ScriptLookup {
    fn fragmentation(&self, dimension: u32, radius: f64) -> Result<f64, SweepError> {
        self.evaluate(&format!("exp.frags({dimension}, {radius}, 1)"))
    }

    fn radius_for_fragmentation(&self, value: f64, dimension: u32) -> Result<f64, SweepError> {
        self.evaluate(&format!("radius.for.frags({value}, 1, {dimension})"))
    }
}
