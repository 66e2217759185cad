use std::f64::consts::{FRAC_PI_2, TAU};

use crate::error::GeometryError;
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Frame, Surface, SurfaceDomain};

/// A spherical surface in 3D space.
///
/// `P(u, v) = center + r * (cos(v) * radial(u) + sin(v) * axis)` with
/// longitude `u` in `[0, 2*pi]` and latitude `v` in `[-pi/2, pi/2]`.
///
/// The normal is `(P - center) / r`. It stays defined at the poles even
/// though `dP/du` vanishes there.
#[derive(Debug, Clone)]
pub struct Sphere {
    frame: Frame,
    radius: f64,
}

impl Sphere {
    /// Creates a new sphere.
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
                "sphere radius must be positive".into(),
            ));
        }
        Ok(Self {
            frame: Frame::new(center, axis, ref_dir)?,
            radius,
        })
    }

    /// Returns the center of the sphere.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.frame.origin
    }

    /// Returns the radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    fn direction(&self, u: f64, v: f64) -> Vector3 {
        self.frame.radial(u) * v.cos() + self.frame.axis * v.sin()
    }
}

impl Surface for Sphere {
    fn evaluate(&self, u: f64, v: f64) -> Result<Point3, GeometryError> {
        Ok(self.frame.origin + self.direction(u, v) * self.radius)
    }

    fn normal(&self, u: f64, v: f64) -> Result<Vector3, GeometryError> {
        Ok(self.direction(u, v))
    }

    fn domain(&self) -> SurfaceDomain {
        SurfaceDomain::new(0.0, TAU, -FRAC_PI_2, FRAC_PI_2)
    }

    fn u_period(&self) -> Option<f64> {
        Some(TAU)
    }
}
