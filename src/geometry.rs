//! Spherical coordinates and object transforms
//!
//! Spherical convention used throughout the crate:
//! `x = r sin(polar) cos(azimuth)`, `y = r sin(polar) sin(azimuth)`, `z = r cos(polar)`.
//! Polar angle 0 points along +Z.

use std::f64::consts::{PI, TAU};

use glam::{DAffine3, DQuat, DVec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Convert spherical coordinates to a Cartesian point
///
/// # Example
///
/// ```rust
/// use crystal_genesis::geometry::spherical_to_cartesian;
/// use glam::DVec3;
///
/// assert_eq!(spherical_to_cartesian(0.0, 0.0, 1.0), DVec3::Z);
/// ```
#[inline]
pub fn spherical_to_cartesian(azimuth: f64, polar: f64, radius: f64) -> DVec3 {
    let (sin_polar, cos_polar) = polar.sin_cos();
    let (sin_azimuth, cos_azimuth) = azimuth.sin_cos();
    DVec3::new(
        radius * sin_polar * cos_azimuth,
        radius * sin_polar * sin_azimuth,
        radius * cos_polar,
    )
}

/// Convert a Cartesian point to canonical spherical coordinates
///
/// Returns `(azimuth, polar, radius)` with azimuth in [0, 2π) and polar in [0, π].
/// The azimuth of a point on the Z axis (including the origin) is 0.
pub fn cartesian_to_spherical(point: DVec3) -> (f64, f64, f64) {
    let radius = point.length();
    if radius == 0.0 {
        return (0.0, 0.0, 0.0);
    }
    let polar = (point.z / radius).clamp(-1.0, 1.0).acos();
    let azimuth = if point.x == 0.0 && point.y == 0.0 {
        0.0
    } else {
        wrap_angle(point.y.atan2(point.x))
    };
    (azimuth, polar, radius)
}

/// Map any spherical angle pair onto the canonical ranges used by
/// [`cartesian_to_spherical`]
///
/// A polar angle in (π, 2π) describes the same direction as the mirrored
/// polar angle with the azimuth turned by π.
pub fn canonical_angles(azimuth: f64, polar: f64) -> (f64, f64) {
    let polar = wrap_angle(polar);
    if polar > PI {
        (wrap_angle(azimuth + PI), TAU - polar)
    } else {
        (wrap_angle(azimuth), polar)
    }
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Object transform: location, XYZ Euler rotation and scale
///
/// The rotation is applied X first, then Y, then Z, all about world axes.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// World position of the object origin
    pub location: DVec3,
    /// Euler angles in radians about X, Y and Z
    pub rotation: DVec3,
    /// Per-axis scale
    pub scale: DVec3,
}

impl Transform {
    /// Identity transform placed at `location`
    pub fn at(location: DVec3) -> Self {
        Self {
            location,
            ..Self::default()
        }
    }

    /// Rotation as a quaternion (Rz * Ry * Rx)
    pub fn quaternion(&self) -> DQuat {
        DQuat::from_rotation_z(self.rotation.z)
            * DQuat::from_rotation_y(self.rotation.y)
            * DQuat::from_rotation_x(self.rotation.x)
    }

    /// Object-to-world matrix
    pub fn matrix(&self) -> DAffine3 {
        DAffine3::from_scale_rotation_translation(self.scale, self.quaternion(), self.location)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            location: DVec3::ZERO,
            rotation: DVec3::ZERO,
            scale: DVec3::ONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_spherical_axes() {
        assert!((spherical_to_cartesian(0.0, FRAC_PI_2, 1.0) - DVec3::X).length() < EPS);
        assert!((spherical_to_cartesian(FRAC_PI_2, FRAC_PI_2, 1.0) - DVec3::Y).length() < EPS);
        assert!((spherical_to_cartesian(0.0, PI, 2.0) - DVec3::new(0.0, 0.0, -2.0)).length() < EPS);
    }

    #[test]
    fn test_round_trip_canonical() {
        let (azimuth, polar, radius) = (1.2, 2.0, 0.7);
        let point = spherical_to_cartesian(azimuth, polar, radius);
        let (a, p, r) = cartesian_to_spherical(point);
        assert!((a - azimuth).abs() < EPS);
        assert!((p - polar).abs() < EPS);
        assert!((r - radius).abs() < EPS);
    }

    #[test]
    fn test_round_trip_mirrored_polar() {
        let (azimuth, polar) = (0.5, 4.0);
        let point = spherical_to_cartesian(azimuth, polar, 1.0);
        let (a, p, _) = cartesian_to_spherical(point);
        let (ca, cp) = canonical_angles(azimuth, polar);
        assert!((a - ca).abs() < EPS);
        assert!((p - cp).abs() < EPS);
    }

    #[test]
    fn test_origin_to_spherical() {
        assert_eq!(cartesian_to_spherical(DVec3::ZERO), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_wrap_angle() {
        assert_eq!(wrap_angle(0.0), 0.0);
        assert!((wrap_angle(-FRAC_PI_2) - 3.0 * FRAC_PI_2).abs() < EPS);
        assert!((wrap_angle(TAU + 1.0) - 1.0).abs() < EPS);
        assert!(wrap_angle(-1e-300) < TAU);
    }

    #[test]
    fn test_transform_matrix() {
        let transform = Transform {
            location: DVec3::new(1.0, 2.0, 3.0),
            rotation: DVec3::new(0.0, 0.0, FRAC_PI_2),
            scale: DVec3::new(2.0, 1.0, 1.0),
        };
        // Scale X by 2, rotate +90 degrees about Z, then translate
        let moved = transform.matrix().transform_point3(DVec3::X);
        assert!((moved - DVec3::new(1.0, 4.0, 3.0)).length() < EPS);
    }

    #[test]
    fn test_rotation_order() {
        // X first then Z: +Y -> (X by 90) +Z -> (Z by 90) stays +Z
        let transform = Transform {
            rotation: DVec3::new(FRAC_PI_2, 0.0, FRAC_PI_2),
            ..Transform::default()
        };
        let moved = transform.quaternion() * DVec3::Y;
        assert!((moved - DVec3::Z).length() < EPS);
    }
}
