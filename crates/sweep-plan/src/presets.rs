//! Built-in plans for the standard timedemo sweeps.

use sweep_core::RadiusPoint;

use crate::plan::{
    ArtifactSpec, InvokerSpec, LookupSpec, PointSpec, RadiusStrategy, RangeDescriptor, SweepPlan,
};

/// Names accepted by [`preset`].
pub const PRESET_NAMES: [&str; 4] = ["ranges", "volume", "grid", "fragmentation"];

static SMALL_RANGES: [(u32, f64, f64); 6] = [
    (3, 0.05, 0.10),
    (4, 0.1110274, 0.1888459),
    (5, 0.1820622, 0.2813588),
    (6, 0.2566508, 0.3725323),
    (7, 0.3314793, 0.4599944),
    (8, 0.4050211, 0.5434151),
];

static LARGE_RADII: [(u32, [f64; 8]); 6] = [
    (3, [0.15, 0.20, 0.25, 0.30, 0.35, 0.40, 0.45, 0.50]),
    (
        4,
        [
            0.2585059, 0.3237339, 0.3861447, 0.4466526, 0.5058640, 0.5642333, 0.6221396,
            0.6799346,
        ],
    ),
    (
        5,
        [
            0.3646144, 0.4394349, 0.5088121, 0.5742420, 0.6365387, 0.6961351, 0.7532204,
            0.8078192,
        ],
    ),
    (
        6,
        [
            0.4661741, 0.5489244, 0.6253015, 0.6977744, 0.7680074, 0.8373636, 0.9072191,
            0.9793229,
        ],
    ),
    (
        7,
        [
            0.5610659, 0.6490777, 0.7296070, 0.8056319, 0.8790900, 0.9514502, 1.0239579,
            1.0976875,
        ],
    ),
    (
        8,
        [
            0.6502349, 0.7424750, 0.8267239, 0.9066609, 0.9850360, 1.0647049, 1.1500879,
            1.252687,
        ],
    ),
];

const DIMENSIONS: [u32; 6] = [3, 4, 5, 6, 7, 8];

/// Tenths 0.1..=0.5 followed by odd twentieths 0.05..=0.45.
fn base_radii() -> Vec<f64> {
    (1..6u32)
        .map(|x| f64::from(x) / 10.0)
        .chain((1..11u32).step_by(2).map(|x| f64::from(x) / 20.0))
        .collect()
}

fn plan(name: &str, radii: RadiusStrategy, points: PointSpec) -> SweepPlan {
    SweepPlan {
        name: name.to_string(),
        radii,
        points,
        invoker: InvokerSpec::default(),
        artifacts: ArtifactSpec::default(),
        lookup: LookupSpec::default(),
    }
}

fn large_points() -> PointSpec {
    PointSpec::PowersOfTwo {
        min_exp: 10,
        max_exp: 20,
    }
}

/// Small per-dimension ranges (10 steps) merged with explicit large radii,
/// sorted by (dimension, radius), 10/20/30 points.
pub fn ranges() -> SweepPlan {
    let ranges = SMALL_RANGES
        .iter()
        .map(|(dimension, min, max)| RangeDescriptor::new(*dimension, *min, *max))
        .collect();
    let exact = LARGE_RADII
        .iter()
        .flat_map(|(dimension, radii)| {
            radii
                .iter()
                .map(move |radius| RadiusPoint::new(*dimension, *radius))
        })
        .collect();
    plan(
        "ranges",
        RadiusStrategy::Merged {
            steps: 10,
            ranges,
            exact,
            sort: true,
        },
        PointSpec::List {
            values: vec![10, 20, 30],
        },
    )
}

/// Dimensions 3..=8 with radii normalised so `2r` is the volume in `d - 2`
/// dimensions, `2^10..=2^20` points.
pub fn volume() -> SweepPlan {
    plan(
        "volume",
        RadiusStrategy::VolumeNormalized {
            dimensions: DIMENSIONS.to_vec(),
            radii: base_radii(),
            reference_dimension: 3,
            reduce_by: 2,
            volume_factor: 2.0,
        },
        large_points(),
    )
}

/// Dimensions 3..=8 crossed with the base radii, unconverted.
pub fn grid() -> SweepPlan {
    plan(
        "grid",
        RadiusStrategy::Grid {
            dimensions: DIMENSIONS.to_vec(),
            radii: base_radii(),
        },
        large_points(),
    )
}

/// Dimensions 3..=8 with radii matched on the 3-dimensional fragmentation statistic.
pub fn fragmentation() -> SweepPlan {
    plan(
        "fragmentation",
        RadiusStrategy::FragmentationNormalized {
            dimensions: DIMENSIONS.to_vec(),
            radii: base_radii(),
            reference_dimension: 3,
        },
        large_points(),
    )
}

/// Looks up a built-in plan by name.
pub fn preset(name: &str) -> Option<SweepPlan> {
    match name {
        "ranges" => Some(ranges()),
        "volume" => Some(volume()),
        "grid" => Some(grid()),
        "fragmentation" => Some(fragmentation()),
        _ => None,
    }
}
