use std::f64::consts::TAU;

use crate::error::GeometryError;
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Frame, Surface, SurfaceDomain};

/// A cylindrical surface in 3D space.
///
/// `P(u, v) = center + radius * radial(u) + v * axis`, where
/// `radial(u) = cos(u) * ref_dir + sin(u) * (axis x ref_dir)`.
///
/// The normal points away from the axis.
#[derive(Debug, Clone)]
pub struct Cylinder {
    frame: Frame,
    radius: f64,
}

impl Cylinder {
    /// Creates a new cylinder.
    ///
    /// # Arguments
    ///
    /// * `center` - A point on the cylinder axis (v = 0)
    /// * `radius` - Radius (must be positive)
    /// * `axis` - Axis direction (will be normalized)
    /// * `ref_dir` - Reference direction for u=0 (must be perpendicular to axis)
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive, the axis is zero-length,
    /// or the reference direction is not perpendicular to the axis.
    pub fn new(
        center: Point3,
        radius: f64,
        axis: Vector3,
        ref_dir: Vector3,
    ) -> Result<Self, GeometryError> {
        if radius < TOLERANCE {
            return Err(GeometryError::Degenerate(
                "cylinder radius must be positive".into(),
            ));
        }
        Ok(Self {
            frame: Frame::new(center, axis, ref_dir)?,
            radius,
        })
    }

    /// Returns the center point on the axis.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.frame.origin
    }

    /// Returns the radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the axis direction (unit vector).
    #[must_use]
    pub fn axis(&self) -> &Vector3 {
        &self.frame.axis
    }
}

impl Surface for Cylinder {
    fn evaluate(&self, u: f64, v: f64) -> Result<Point3, GeometryError> {
        Ok(self.frame.origin + self.frame.radial(u) * self.radius + self.frame.axis * v)
    }

    fn normal(&self, u: f64, _v: f64) -> Result<Vector3, GeometryError> {
        // radial_tangent x axis == radial for a right-handed frame.
        Ok(self.frame.radial(u))
    }

    fn domain(&self) -> SurfaceDomain {
        SurfaceDomain::new(0.0, TAU, f64::NEG_INFINITY, f64::INFINITY)
    }

    fn u_period(&self) -> Option<f64> {
        Some(TAU)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn z_cylinder(radius: f64) -> Cylinder {
        Cylinder::new(Point3::origin(), radius, Vector3::z(), Vector3::x()).unwrap()
    }

    #[test]
    fn evaluate_on_reference_direction() {
        let p = z_cylinder(2.0).evaluate(0.0, 5.0).unwrap();
        assert!((p - Point3::new(2.0, 0.0, 5.0)).norm() < TOLERANCE);
    }

    #[test]
    fn evaluate_quarter_turn() {
        let p = z_cylinder(2.0).evaluate(FRAC_PI_2, 0.0).unwrap();
        assert!((p - Point3::new(0.0, 2.0, 0.0)).norm() < 1e-9);
    }

    #[test]
    fn normal_matches_partial_derivative_cross() {
        let c = z_cylinder(1.5);
        let (u, v, h) = (0.8, 0.3, 1e-6);
        let du = (c.evaluate(u + h, v).unwrap() - c.evaluate(u - h, v).unwrap()) / (2.0 * h);
        let dv = (c.evaluate(u, v + h).unwrap() - c.evaluate(u, v - h).unwrap()) / (2.0 * h);
        let expected = du.cross(&dv).normalize();
        assert!((c.normal(u, v).unwrap() - expected).norm() < 1e-6);
    }

    #[test]
    fn domain_u_is_full_circle() {
        let d = z_cylinder(1.0).domain();
        assert!(d.u_min.abs() < TOLERANCE);
        assert!((d.u_max - TAU).abs() < TOLERANCE);
        assert!(d.v_min.is_infinite() && d.v_max.is_infinite());
    }

    #[test]
    fn invalid_radius() {
        let r = Cylinder::new(Point3::origin(), 0.0, Vector3::z(), Vector3::x());
        assert!(r.is_err());
    }
}
