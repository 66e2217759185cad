use std::f64::consts::{FRAC_PI_2, TAU};

use crate::error::GeometryError;
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{unit, Frame, Surface, SurfaceDomain};

/// A conical surface in 3D space.
///
/// `P(u, v) = apex + v * (cos(alpha) * axis + sin(alpha) * radial(u))`, where
/// `alpha` is the half-angle and `v >= 0` is the distance from the apex along
/// the generator.
///
/// The normal is undefined at the apex (`v = 0`).
#[derive(Debug, Clone)]
pub struct Cone {
    frame: Frame,
    half_angle: f64,
}

impl Cone {
    /// Creates a new cone.
    ///
    /// # Arguments
    ///
    /// * `apex` - The apex (tip) of the cone
    /// * `axis` - Axis direction from apex outward (will be normalized)
    /// * `half_angle` - Half-angle in radians (must be in `(0, pi/2)`)
    /// * `ref_dir` - Reference direction for u=0 (must be perpendicular to axis)
    ///
    /// # Errors
    ///
    /// Returns an error if the half-angle is out of range, the axis is
    /// zero-length, or the reference direction is not perpendicular to the axis.
    pub fn new(
        apex: Point3,
        axis: Vector3,
        half_angle: f64,
        ref_dir: Vector3,
    ) -> Result<Self, GeometryError> {
        if half_angle <= TOLERANCE || half_angle >= FRAC_PI_2 - TOLERANCE {
            return Err(GeometryError::Degenerate(
                "cone half-angle must be in (0, pi/2)".into(),
            ));
        }
        Ok(Self {
            frame: Frame::new(apex, axis, ref_dir)?,
            half_angle,
        })
    }

    /// Returns the apex point.
    #[must_use]
    pub fn apex(&self) -> &Point3 {
        &self.frame.origin
    }

    /// Returns the half-angle in radians.
    #[must_use]
    pub fn half_angle(&self) -> f64 {
        self.half_angle
    }

    fn generator(&self, u: f64) -> Vector3 {
        self.frame.axis * self.half_angle.cos() + self.frame.radial(u) * self.half_angle.sin()
    }
}

impl Surface for Cone {
    fn evaluate(&self, u: f64, v: f64) -> Result<Point3, GeometryError> {
        Ok(self.frame.origin + self.generator(u) * v)
    }

    fn normal(&self, u: f64, v: f64) -> Result<Vector3, GeometryError> {
        if v.abs() < TOLERANCE {
            return Err(GeometryError::Degenerate(
                "cone normal is degenerate at apex".into(),
            ));
        }
        let du = self.frame.radial_tangent(u) * (v * self.half_angle.sin());
        let dv = self.generator(u);
        unit(du.cross(&dv))
    }

    fn domain(&self) -> SurfaceDomain {
        SurfaceDomain::new(0.0, TAU, 0.0, f64::INFINITY)
    }

    fn u_period(&self) -> Option<f64> {
        Some(TAU)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_4;

    fn z_cone_45() -> Cone {
        Cone::new(Point3::origin(), Vector3::z(), FRAC_PI_4, Vector3::x()).unwrap()
    }

    #[test]
    fn evaluate_at_apex() {
        let p = z_cone_45().evaluate(1.3, 0.0).unwrap();
        assert!((p - Point3::origin()).norm() < TOLERANCE);
    }

    #[test]
    fn evaluate_along_generator() {
        let p = z_cone_45().evaluate(0.0, 1.0).unwrap();
        let s = FRAC_PI_4.sin();
        assert!((p - Point3::new(s, 0.0, s)).norm() < 1e-9);
    }

    #[test]
    fn normal_points_away_from_axis() {
        let n = z_cone_45().normal(0.0, 2.0).unwrap();
        let s = FRAC_PI_4.sin();
        assert!((n - Vector3::new(s, 0.0, -s)).norm() < 1e-9);
    }

    #[test]
    fn normal_at_apex_is_degenerate() {
        assert!(matches!(
            z_cone_45().normal(0.5, 0.0),
            Err(GeometryError::Degenerate(_))
        ));
    }

    #[test]
    fn invalid_half_angle() {
        assert!(Cone::new(Point3::origin(), Vector3::z(), 0.0, Vector3::x()).is_err());
        assert!(Cone::new(Point3::origin(), Vector3::z(), FRAC_PI_2, Vector3::x()).is_err());
    }
}
