// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Spherical orbit math and canonical orbit text.

use crate::Point3;

/// Numeric spherical camera coordinates around a target.
///
/// This is the engine's resolved readback: angles in radians, radius in
/// meters. `theta` is unbounded here; it is wrapped only for display.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Orbit {
    /// Azimuthal angle (radians).
    pub theta: f64,
    /// Polar angle from +Y (radians).
    pub phi: f64,
    /// Distance from the target (meters).
    pub radius: f64,
}

impl Orbit {
    /// Build an orbit from radians and meters.
    pub const fn new(theta: f64, phi: f64, radius: f64) -> Self {
        Self { theta, phi, radius }
    }

    /// Build an orbit from degrees and meters.
    pub fn from_degrees(theta_deg: f64, phi_deg: f64, radius: f64) -> Self {
        Self::new(theta_deg.to_radians(), phi_deg.to_radians(), radius)
    }

    /// Camera offset from the target for this orbit.
    pub fn offset(&self) -> Point3 {
        spherical_offset(self.theta, self.phi, self.radius)
    }
}

/// Cartesian offset of the camera from its target.
///
/// `x = r·cosθ·sinφ`, `y = r·cosφ`, `z = r·sinθ·sinφ`. Negative radii are
/// computed arithmetically (the camera lands on the far side of the target).
pub fn spherical_offset(theta: f64, phi: f64, radius: f64) -> Point3 {
    let s = phi.sin();
    Point3::new(
        radius * theta.cos() * s,
        radius * phi.cos(),
        radius * theta.sin() * s,
    )
}

/// World-space camera position: `target + offset(orbit)`.
///
/// Derived on demand, never stored.
pub fn current_camera_position(orbit: &Orbit, target: Point3) -> Point3 {
    target + orbit.offset()
}

/// Normalize an angle in degrees into `[0, 360)`, negative inputs included.
pub fn wrap_degrees(d: f64) -> f64 {
    ((d % 360.0) + 360.0) % 360.0
}

/// Format degrees as a wrapped `"<n>deg"` token with 3 decimals.
///
/// Rounding happens after wrapping, so a value that would print as
/// `360.000` prints as `0.000` instead.
pub fn format_degrees(d: f64) -> String {
    let rounded = (wrap_degrees(d) * 1_000.0).round() / 1_000.0;
    format!("{:.3}deg", canonical_zero(wrap_degrees(rounded)))
}

/// Format meters as a `"<n>m"` token with 6 decimals.
pub fn format_meters(m: f64) -> String {
    let rounded = (m * 1_000_000.0).round() / 1_000_000.0;
    format!("{:.6}m", canonical_zero(rounded))
}

/// Canonical orbit text: `"{theta}deg {phi}deg {radius}m"`.
///
/// Angles are wrapped to `[0, 360)` with 3 decimals, radius carries
/// 6 decimals. Parsing the output and formatting it again yields the same
/// string.
pub fn format_orbit(orbit: &Orbit) -> String {
    format!(
        "{} {} {}",
        format_degrees(orbit.theta.to_degrees()),
        format_degrees(orbit.phi.to_degrees()),
        format_meters(orbit.radius)
    )
}

fn canonical_zero(x: f64) -> f64 {
    if x == 0.0 {
        0.0
    } else {
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use core::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn offset_on_equator_along_x() {
        let p = spherical_offset(0.0, FRAC_PI_2, 2.0);
        assert_abs_diff_eq!(p.x, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn offset_at_pole_is_straight_up() {
        let p = spherical_offset(1.234, 0.0, 3.0);
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_radius_collapses_onto_target() {
        let t = Point3::new(1.0, 2.0, 3.0);
        let o = Orbit::new(0.3, 1.1, 0.0);
        assert_eq!(current_camera_position(&o, t), t);
    }

    #[test]
    fn negative_radius_passes_through() {
        let p = spherical_offset(0.0, FRAC_PI_2, -1.0);
        assert_abs_diff_eq!(p.x, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn wrap_handles_negatives() {
        assert_abs_diff_eq!(wrap_degrees(-90.0), 270.0);
        assert_abs_diff_eq!(wrap_degrees(-720.0), 0.0);
        assert_abs_diff_eq!(wrap_degrees(725.0), 5.0);
        assert_abs_diff_eq!(wrap_degrees(360.0), 0.0);
    }

    #[test]
    fn format_orbit_is_canonical() {
        let o = Orbit::new(-FRAC_PI_2, PI / 3.0, 1.5);
        assert_eq!(format_orbit(&o), "270.000deg 60.000deg 1.500000m");
    }

    #[test]
    fn format_never_prints_full_turn() {
        assert_eq!(format_degrees(359.99996), "0.000deg");
        assert_eq!(format_degrees(-0.00001), "0.000deg");
    }

    #[test]
    fn format_meters_drops_negative_zero() {
        assert_eq!(format_meters(-0.0), "0.000000m");
        assert_eq!(format_meters(-0.0000001), "0.000000m");
        assert_eq!(format_meters(-2.5), "-2.500000m");
    }
}
