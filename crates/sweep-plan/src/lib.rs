#![deny(missing_docs)]
#![doc = "Declarative sweep plans and deterministic generation of experiment tuples."]

/// Range expansion, merging and tuple generation.
pub mod expand;
/// External fragmentation lookup.
pub mod lookup;
/// Plan schema, validation and loading.
pub mod plan;
pub mod presets;

pub use expand::{expand_plan, expand_range, expand_ranges, merge_points, radius_points};
pub use lookup::{parse_scalar, FragmentationLookup, ScriptLookup};
pub use plan::{
    load_plan, ArtifactSpec, InvokerSpec, LogCapture, LookupSpec, PointSpec, RadiusStrategy,
    RangeDescriptor, SweepPlan,
};
pub use presets::{preset, PRESET_NAMES};
