#![deny(missing_docs)]
#![doc = "Core types, structured errors and canonical serialization for the timedemo sweep driver."]

pub mod errors;
/// Canonical JSON/YAML helpers and stable hashing.
pub mod serde;
mod tuple;

pub use errors::{ErrorInfo, SweepError};
pub use crate::serde::{
    from_json_slice, from_yaml_slice, stable_hash_string, to_canonical_json_bytes, to_yaml_string,
};
pub use tuple::{format_radius, ExperimentTuple, RadiusPoint};
