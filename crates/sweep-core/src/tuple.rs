use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A (dimension, radius) pair before point counts are applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiusPoint {
    /// Ambient dimension of the benchmark scene.
    pub dimension: u32,
    /// Sphere radius used for the run.
    pub radius: f64,
}

impl RadiusPoint {
    /// Creates a new radius point.
    pub const fn new(dimension: u32, radius: f64) -> Self {
        Self { dimension, radius }
    }

    /// Total ordering by dimension, then radius.
    pub fn sweep_order(&self, other: &Self) -> Ordering {
        self.dimension
            .cmp(&other.dimension)
            .then_with(|| self.radius.total_cmp(&other.radius))
    }
}

/// A single benchmark invocation: one external process per tuple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExperimentTuple {
    /// Ambient dimension of the benchmark scene.
    pub dimension: u32,
    /// Number of points the benchmark generates.
    pub point_count: u64,
    /// Sphere radius used for the run.
    pub radius: f64,
}

impl ExperimentTuple {
    /// Creates a new tuple.
    pub const fn new(dimension: u32, point_count: u64, radius: f64) -> Self {
        Self {
            dimension,
            point_count,
            radius,
        }
    }

    /// Pairs a radius point with a point count.
    pub const fn from_point(point: RadiusPoint, point_count: u64) -> Self {
        Self::new(point.dimension, point_count, point.radius)
    }
}

impl fmt::Display for ExperimentTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.dimension,
            self.point_count,
            format_radius(self.radius)
        )
    }
}

const RADIUS_DIGITS: usize = 12;

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

/// Renders a radius with 12 significant digits, `%.12g` style.
///
/// Fixed notation keeps a `.0` suffix for integral values; exponents are
/// signed and at least two digits wide (`1e-05`, `2.5e+12`). The benchmark
/// receives exactly this text, so `0.05 + 2 * 0.005` goes out as `0.06`.
pub fn format_radius(radius: f64) -> String {
    if radius.is_nan() {
        return "nan".to_string();
    }
    if radius.is_infinite() {
        return if radius > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let scientific = format!("{:.*e}", RADIUS_DIGITS - 1, radius);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };
    if exponent < -4 || exponent >= RADIUS_DIGITS as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        );
    }
    let decimals = (RADIUS_DIGITS as i32 - 1 - exponent) as usize;
    let fixed = format!("{:.*}", decimals, radius);
    let trimmed = trim_fraction(&fixed);
    if trimmed.contains('.') {
        trimmed.to_string()
    } else {
        format!("{trimmed}.0")
    }
}
