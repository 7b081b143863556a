use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use sweep_exec::{
    append_ledger, backup_artifacts, run_sweep, DryRunner, ExternalRunner, ShellRunner,
    SweepOptions,
};

use super::source::{generate, PlanSource};

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub source: PlanSource,
    /// Directory the benchmark runs in; overrides the plan's invoker workdir.
    #[arg(long)]
    pub workdir: Option<PathBuf>,
    /// Print the shell lines instead of executing them. Artifacts and logs are left alone.
    #[arg(long)]
    pub dry_run: bool,
    /// Write the sweep report as JSON.
    #[arg(long)]
    pub report: Option<PathBuf>,
    /// Append one CSV row per invocation to this ledger.
    #[arg(long)]
    pub ledger: Option<PathBuf>,
}

/// Runs the sweep and returns the exit status the driver should finish with.
pub fn run(args: &RunArgs) -> Result<i32, Box<dyn Error>> {
    let plan = args.source.load()?;
    let workdir = args
        .workdir
        .clone()
        .or_else(|| plan.invoker.workdir.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    let tuples = generate(&plan)?;
    tracing::info!(
        plan = %plan.name,
        tuples = tuples.len(),
        workdir = %workdir.display(),
        "sweep planned"
    );

    let mut options = SweepOptions::for_plan(&plan, &workdir)?;
    if args.dry_run {
        options.log = None;
    }
    let mut dry = DryRunner::default();
    let mut shell = ShellRunner::with_workdir(&workdir);
    let runner: &mut dyn ExternalRunner = if args.dry_run {
        &mut dry
    } else {
        backup_artifacts(&workdir, &plan.artifacts.backup);
        &mut shell
    };

    let report = run_sweep(&tuples, runner, &options);
    if let Some(path) = &args.report {
        report.write_json(path)?;
    }
    if let Some(path) = &args.ledger {
        append_ledger(path, &report)?;
    }
    if let Some(error) = report.error() {
        return Err(error.clone().into());
    }
    Ok(report.exit_code())
}
