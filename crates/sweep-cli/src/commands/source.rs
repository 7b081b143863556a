use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use sweep_core::ExperimentTuple;
use sweep_plan::{expand_plan, load_plan, preset, ScriptLookup, SweepPlan, PRESET_NAMES};

/// Where the plan comes from: a YAML file or a built-in preset.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct PlanSource {
    /// YAML plan describing the sweep.
    #[arg(long)]
    pub plan: Option<PathBuf>,
    /// Built-in plan: ranges, volume, grid or fragmentation.
    #[arg(long)]
    pub preset: Option<String>,
}

impl PlanSource {
    pub fn load(&self) -> Result<SweepPlan, Box<dyn Error>> {
        if let Some(path) = &self.plan {
            return Ok(load_plan(path)?);
        }
        let name = self.preset.as_deref().unwrap_or_default();
        preset(name).ok_or_else(|| {
            format!(
                "unknown preset `{name}` (expected one of: {})",
                PRESET_NAMES.join(", ")
            )
            .into()
        })
    }
}

/// Expands a plan, wiring the script lookup only when the strategy needs it.
pub fn generate(plan: &SweepPlan) -> Result<Vec<ExperimentTuple>, Box<dyn Error>> {
    let tuples = if plan.radii.needs_lookup() {
        let lookup = ScriptLookup::from_spec(&plan.lookup);
        expand_plan(plan, Some(&lookup))?
    } else {
        expand_plan(plan, None)?
    };
    Ok(tuples)
}
