use sweep_core::{ErrorInfo, ExperimentTuple, RadiusPoint, SweepError};
use sweep_geom::sphere_radius;

use crate::lookup::FragmentationLookup;
use crate::plan::{RadiusStrategy, RangeDescriptor, SweepPlan};

/// Closed-interval linear interpolation: `steps + 1` samples from `min` to
/// `max`, both endpoints included.
pub fn expand_range(min: f64, max: f64, steps: usize) -> Vec<f64> {
    if steps == 0 {
        return vec![min];
    }
    let span = max - min;
    (0..=steps)
        .map(|step| {
            if step == steps {
                max
            } else {
                min + step as f64 * span / steps as f64
            }
        })
        .collect()
}

/// Expands the ranges step-major (every range at step 0, then step 1, ...).
pub fn expand_ranges(ranges: &[RangeDescriptor], steps: usize) -> Vec<RadiusPoint> {
    let samples: Vec<Vec<f64>> = ranges
        .iter()
        .map(|range| expand_range(range.min, range.max, steps))
        .collect();
    let count = samples.first().map_or(0, Vec::len);
    let mut points = Vec::with_capacity(count * ranges.len());
    for step in 0..count {
        for (range, values) in ranges.iter().zip(&samples) {
            points.push(RadiusPoint::new(range.dimension, values[step]));
        }
    }
    points
}

/// Concatenates range-expanded and exact points, optionally sorting by
/// (dimension, radius). Nothing is deduplicated.
pub fn merge_points(
    expanded: Vec<RadiusPoint>,
    exact: &[RadiusPoint],
    sort: bool,
) -> Vec<RadiusPoint> {
    let mut merged = expanded;
    merged.extend_from_slice(exact);
    if sort {
        merged.sort_by(RadiusPoint::sweep_order);
    }
    merged
}

fn reduced_dimension(dimension: u32, reduce_by: u32) -> Result<u32, SweepError> {
    dimension
        .checked_sub(reduce_by)
        .filter(|reduced| *reduced > 0)
        .ok_or_else(|| {
            SweepError::Plan(
                ErrorInfo::new("dimension_reduction", "reduced dimension must stay positive")
                    .with_context("dimension", dimension.to_string())
                    .with_context("reduce_by", reduce_by.to_string()),
            )
        })
}

fn ascending(radii: &[f64]) -> Vec<f64> {
    let mut sorted = radii.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Produces the (dimension, radius) sequence for a strategy.
///
/// `lookup` is only consulted by fragmentation normalisation; passing `None`
/// for that strategy is a plan error.
pub fn radius_points(
    strategy: &RadiusStrategy,
    lookup: Option<&dyn FragmentationLookup>,
) -> Result<Vec<RadiusPoint>, SweepError> {
    match strategy {
        RadiusStrategy::Merged {
            steps,
            ranges,
            exact,
            sort,
        } => Ok(merge_points(expand_ranges(ranges, *steps), exact, *sort)),
        RadiusStrategy::Grid { dimensions, radii } => {
            let radii = ascending(radii);
            Ok(dimensions
                .iter()
                .flat_map(|dimension| radii.iter().map(move |r| RadiusPoint::new(*dimension, *r)))
                .collect())
        }
        RadiusStrategy::VolumeNormalized {
            dimensions,
            radii,
            reference_dimension,
            reduce_by,
            volume_factor,
        } => {
            let radii = ascending(radii);
            let mut points = Vec::with_capacity(dimensions.len() * radii.len());
            for dimension in dimensions {
                for radius in &radii {
                    let converted = if dimension == reference_dimension {
                        *radius
                    } else {
                        let reduced = reduced_dimension(*dimension, *reduce_by)?;
                        sphere_radius(reduced, volume_factor * radius)
                    };
                    points.push(RadiusPoint::new(*dimension, converted));
                }
            }
            Ok(points)
        }
        RadiusStrategy::FragmentationNormalized {
            dimensions,
            radii,
            reference_dimension,
        } => {
            let lookup = lookup.ok_or_else(|| {
                SweepError::Plan(
                    ErrorInfo::new(
                        "lookup_missing",
                        "fragmentation normalisation requires a lookup",
                    )
                    .with_hint("configure the `lookup` section of the plan"),
                )
            })?;
            let radii = ascending(radii);
            let mut points = Vec::with_capacity(dimensions.len() * radii.len());
            for dimension in dimensions {
                for radius in &radii {
                    let converted = if dimension == reference_dimension {
                        *radius
                    } else {
                        let frags = lookup.fragmentation(*reference_dimension, *radius)?;
                        let equivalent = lookup.radius_for_fragmentation(frags, *dimension)?;
                        tracing::debug!(
                            dimension,
                            radius,
                            fragmentation = frags,
                            equivalent,
                            "radius normalised via lookup"
                        );
                        equivalent
                    };
                    points.push(RadiusPoint::new(*dimension, converted));
                }
            }
            Ok(points)
        }
    }
}

/// Generates the ordered tuple sequence for a plan. Point counts vary fastest.
pub fn expand_plan(
    plan: &SweepPlan,
    lookup: Option<&dyn FragmentationLookup>,
) -> Result<Vec<ExperimentTuple>, SweepError> {
    let counts = plan.points.counts();
    let points = radius_points(&plan.radii, lookup)?;
    let tuples: Vec<ExperimentTuple> = points
        .iter()
        .flat_map(|point| {
            counts
                .iter()
                .map(move |count| ExperimentTuple::from_point(*point, *count))
        })
        .collect();
    tracing::debug!(plan = %plan.name, tuples = tuples.len(), "plan expanded");
    Ok(tuples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_steps_is_single_sample() {
        assert_eq!(expand_range(0.2, 0.4, 0), vec![0.2]);
    }

    #[test]
    fn degenerate_range_repeats_endpoint() {
        assert_eq!(expand_range(0.3, 0.3, 2), vec![0.3, 0.3, 0.3]);
    }

    #[test]
    fn ranges_are_step_major() {
        let ranges = [RangeDescriptor::new(3, 0.0, 1.0), RangeDescriptor::new(4, 1.0, 2.0)];
        let points = expand_ranges(&ranges, 1);
        assert_eq!(
            points,
            vec![
                RadiusPoint::new(3, 0.0),
                RadiusPoint::new(4, 1.0),
                RadiusPoint::new(3, 1.0),
                RadiusPoint::new(4, 2.0),
            ]
        );
    }
}
