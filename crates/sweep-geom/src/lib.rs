#![deny(missing_docs)]
//! Closed-form n-ball geometry.
//!
//! All functions are pure. A non-positive dimension is outside the domain of
//! the formulas and yields `NaN` or infinities rather than an error.

use std::f64::consts::PI;

/// Volume of the unit ball in `dimension` dimensions, `π^(d/2) / Γ(d/2 + 1)`.
pub fn unit_ball_volume(dimension: u32) -> f64 {
    let half = f64::from(dimension) / 2.0;
    PI.powf(half) / libm::tgamma(half + 1.0)
}

/// Volume of a `dimension`-ball of the given radius.
pub fn sphere_volume(dimension: u32, radius: f64) -> f64 {
    unit_ball_volume(dimension) * radius.powf(f64::from(dimension))
}

/// Radius of the `dimension`-ball enclosing `volume`. Inverse of [`sphere_volume`].
pub fn sphere_radius(dimension: u32, volume: f64) -> f64 {
    let scaled = volume / unit_ball_volume(dimension);
    scaled.powf(1.0 / f64::from(dimension))
}

/// Radius in `to_dimension` whose ball has the same volume as a ball of
/// `radius` in `from_dimension`.
pub fn equivalent_radius(from_dimension: u32, radius: f64, to_dimension: u32) -> f64 {
    sphere_radius(to_dimension, sphere_volume(from_dimension, radius))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_ball_low_dimensions() {
        assert!((unit_ball_volume(1) - 2.0).abs() < 1e-12);
        assert!((unit_ball_volume(2) - PI).abs() < 1e-12);
        assert!((unit_ball_volume(4) - PI * PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn zero_dimension_is_unguarded() {
        assert!(!sphere_radius(0, 2.0).is_finite());
    }
}
