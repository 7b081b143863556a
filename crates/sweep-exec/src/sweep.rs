use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use sweep_core::{to_canonical_json_bytes, ExperimentTuple, SweepError};
use sweep_plan::{InvokerSpec, LogCapture, SweepPlan};

use crate::artifacts::append_log_fragment;
use crate::runner::{ExternalRunner, Invocation};

/// Settings for a single sweep execution.
#[derive(Debug, Clone)]
pub struct SweepOptions {
    /// Plan label recorded in the report.
    pub plan_name: String,
    /// Plan hash recorded in the report.
    pub plan_hash: String,
    /// Command template.
    pub invoker: InvokerSpec,
    /// Directory artifact and log paths are resolved against.
    pub workdir: PathBuf,
    /// Log fragment appended after every invocation.
    pub log: Option<LogCapture>,
}

impl SweepOptions {
    /// Derives options from a plan, resolving files against `workdir`.
    pub fn for_plan(plan: &SweepPlan, workdir: impl Into<PathBuf>) -> Result<Self, SweepError> {
        Ok(Self {
            plan_name: plan.name.clone(),
            plan_hash: plan.plan_hash()?,
            invoker: plan.invoker.clone(),
            workdir: workdir.into(),
            log: plan.artifacts.log.clone(),
        })
    }
}

/// Result of one benchmark invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationRecord {
    /// Position in the sweep.
    pub index: usize,
    /// Tuple passed to the benchmark.
    pub tuple: ExperimentTuple,
    /// Shell line executed.
    pub command: String,
    /// Exit status reported by the runner.
    pub exit_code: i32,
    /// Wall-clock time of the invocation in milliseconds.
    pub elapsed_ms: u64,
}

/// How the sweep ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum SweepOutcome {
    /// Every tuple ran and exited with status 0.
    Completed,
    /// The tuple at `index` failed; nothing after it ran.
    Aborted {
        /// Index of the failing invocation.
        index: usize,
        /// Exit status of the failing invocation.
        exit_code: i32,
    },
    /// The driver itself failed at `index`: the benchmark could not be
    /// started or its log could not be aggregated.
    Failed {
        /// Index of the tuple being processed.
        index: usize,
        /// Driver error that stopped the sweep.
        error: SweepError,
    },
}

/// Aggregate record of a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    /// Plan label.
    pub plan_name: String,
    /// Plan hash.
    pub plan_hash: String,
    /// Number of tuples the plan generated.
    pub planned: usize,
    /// Invocations actually attempted, in order.
    pub invocations: Vec<InvocationRecord>,
    /// Completion state.
    pub outcome: SweepOutcome,
}

impl SweepReport {
    /// Exit status the driver should finish with.
    pub fn exit_code(&self) -> i32 {
        match &self.outcome {
            SweepOutcome::Completed => 0,
            SweepOutcome::Aborted { exit_code, .. } => *exit_code,
            SweepOutcome::Failed { .. } => 1,
        }
    }

    /// Driver error that ended the sweep, if any.
    pub fn error(&self) -> Option<&SweepError> {
        match &self.outcome {
            SweepOutcome::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Writes the report as canonical JSON.
    pub fn write_json(&self, path: &Path) -> Result<(), SweepError> {
        let bytes = to_canonical_json_bytes(self)?;
        fs::write(path, bytes).map_err(|err| SweepError::io("report_write", path, err))
    }
}

/// Runs `tuples` strictly in order, stopping at the first non-zero exit.
///
/// The configured log fragment is appended after every invocation, including
/// the failing one. Driver errors end the sweep as [`SweepOutcome::Failed`]
/// and the report keeps every invocation attempted before them.
pub fn run_sweep(
    tuples: &[ExperimentTuple],
    runner: &mut dyn ExternalRunner,
    options: &SweepOptions,
) -> SweepReport {
    let mut invocations = Vec::with_capacity(tuples.len());
    let mut outcome = SweepOutcome::Completed;
    for (index, tuple) in tuples.iter().enumerate() {
        let invocation = Invocation::new(&options.invoker, *tuple);
        tracing::info!(
            d = tuple.dimension,
            p = tuple.point_count,
            r = tuple.radius,
            index,
            total = tuples.len(),
            "invoking benchmark"
        );
        let started = Instant::now();
        let exit_code = match runner.run(&invocation) {
            Ok(code) => code,
            Err(error) => {
                tracing::warn!(index, error = %error, "benchmark could not be started");
                outcome = SweepOutcome::Failed { index, error };
                break;
            }
        };
        let elapsed_ms = started.elapsed().as_millis() as u64;

        invocations.push(InvocationRecord {
            index,
            tuple: *tuple,
            command: invocation.shell_line,
            exit_code,
            elapsed_ms,
        });

        if let Some(log) = &options.log {
            if let Err(error) = append_log_fragment(
                &options.workdir.join(&log.source),
                &options.workdir.join(&log.aggregate),
            ) {
                tracing::warn!(index, error = %error, "log aggregation failed; aborting sweep");
                outcome = SweepOutcome::Failed { index, error };
                break;
            }
        }

        if exit_code != 0 {
            tracing::warn!(
                index,
                exit_code,
                remaining = tuples.len() - index - 1,
                "benchmark failed; aborting sweep"
            );
            outcome = SweepOutcome::Aborted { index, exit_code };
            break;
        }
    }
    if outcome == SweepOutcome::Completed {
        tracing::info!(invocations = invocations.len(), "sweep completed");
    }
    SweepReport {
        plan_name: options.plan_name.clone(),
        plan_hash: options.plan_hash.clone(),
        planned: tuples.len(),
        invocations,
        outcome,
    }
}
