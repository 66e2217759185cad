mod cone;
mod cylinder;
mod nurbs;
mod plane;
mod sphere;

pub use cone::Cone;
pub use cylinder::Cylinder;
pub use nurbs::NurbsSurface;
pub use plane::Plane;
pub use sphere::Sphere;

use crate::error::GeometryError;
use crate::math::{Point3, Vector3, TOLERANCE};

/// Parameter domain for a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceDomain {
    /// Start of the U parameter range.
    pub u_min: f64,
    /// End of the U parameter range.
    pub u_max: f64,
    /// Start of the V parameter range.
    pub v_min: f64,
    /// End of the V parameter range.
    pub v_max: f64,
}

impl SurfaceDomain {
    /// Creates a new surface domain.
    #[must_use]
    pub fn new(u_min: f64, u_max: f64, v_min: f64, v_max: f64) -> Self {
        Self {
            u_min,
            u_max,
            v_min,
            v_max,
        }
    }

    /// Returns `true` if all four bounds are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.u_min.is_finite()
            && self.u_max.is_finite()
            && self.v_min.is_finite()
            && self.v_max.is_finite()
    }

    /// Returns `true` if both ranges are ordered (`min <= max`).
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.u_min <= self.u_max && self.v_min <= self.v_max
    }

    /// Returns `true` if `(u, v)` lies in the closed domain, within `tol`.
    #[must_use]
    pub fn contains(&self, u: f64, v: f64, tol: f64) -> bool {
        u >= self.u_min - tol && u <= self.u_max + tol && v >= self.v_min - tol && v <= self.v_max + tol
    }

    /// Returns `true` if `other` is a valid sub-rectangle of this domain,
    /// within `tol`.
    ///
    /// With a `u_period`, the U range of `other` may start anywhere and only
    /// has to fit within one period; V is always checked against the domain.
    #[must_use]
    pub fn admits(&self, other: &SurfaceDomain, u_period: Option<f64>, tol: f64) -> bool {
        let u_ok = match u_period {
            Some(period) => other.u_span() <= period + tol,
            None => other.u_min >= self.u_min - tol && other.u_max <= self.u_max + tol,
        };
        u_ok && other.v_min >= self.v_min - tol && other.v_max <= self.v_max + tol
    }

    /// Length of the U range.
    #[must_use]
    pub fn u_span(&self) -> f64 {
        self.u_max - self.u_min
    }

    /// Length of the V range.
    #[must_use]
    pub fn v_span(&self) -> f64 {
        self.v_max - self.v_min
    }
}

/// Trait for parametric surfaces in 3D space.
///
/// `normal` follows the right-hand rule on the partial derivatives,
/// `dP/du x dP/dv`, normalized. Face orientation is applied on top of this
/// by the caller.
pub trait Surface {
    /// Evaluates the surface at parameters `(u, v)`, returning the 3D point.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are out of range or evaluation fails.
    fn evaluate(&self, u: f64, v: f64) -> Result<Point3, GeometryError>;

    /// Computes the unit surface normal at parameters `(u, v)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are out of range or the normal is degenerate.
    fn normal(&self, u: f64, v: f64) -> Result<Vector3, GeometryError>;

    /// Returns the parameter domain of the surface.
    fn domain(&self) -> SurfaceDomain;

    /// Period of the U parameter for surfaces that close on themselves
    /// around an axis. `None` for open surfaces.
    fn u_period(&self) -> Option<f64> {
        None
    }
}

/// Orthonormal placement shared by the surfaces of revolution.
///
/// `binormal = axis x ref_dir` completes the right-handed frame.
#[derive(Debug, Clone)]
pub(crate) struct Frame {
    pub origin: Point3,
    pub axis: Vector3,
    pub ref_dir: Vector3,
    pub binormal: Vector3,
}

impl Frame {
    /// Normalizes `axis` and `ref_dir` and checks they are perpendicular.
    pub(crate) fn new(origin: Point3, axis: Vector3, ref_dir: Vector3) -> Result<Self, GeometryError> {
        let axis = unit(axis)?;
        let ref_dir = unit(ref_dir)?;
        if axis.dot(&ref_dir).abs() > TOLERANCE {
            return Err(GeometryError::Degenerate(
                "reference direction must be perpendicular to axis".into(),
            ));
        }
        Ok(Self {
            origin,
            axis,
            ref_dir,
            binormal: axis.cross(&ref_dir),
        })
    }

    /// Unit radial direction at angle `u` around the axis.
    pub(crate) fn radial(&self, u: f64) -> Vector3 {
        self.ref_dir * u.cos() + self.binormal * u.sin()
    }

    /// Derivative of [`Frame::radial`] with respect to `u`.
    pub(crate) fn radial_tangent(&self, u: f64) -> Vector3 {
        -self.ref_dir * u.sin() + self.binormal * u.cos()
    }
}

/// Normalizes `v`, failing on (near) zero length.
pub(crate) fn unit(v: Vector3) -> Result<Vector3, GeometryError> {
    let len = v.norm();
    if !len.is_finite() {
        return Err(GeometryError::Degenerate("non-finite vector".into()));
    }
    if len < TOLERANCE {
        return Err(GeometryError::ZeroVector);
    }
    Ok(v / len)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::f64::consts::{PI, TAU};

    #[test]
    fn domain_spans_and_containment() {
        let d = SurfaceDomain::new(0.0, 10.0, -1.0, 4.0);
        assert!((d.u_span() - 10.0).abs() < TOLERANCE);
        assert!((d.v_span() - 5.0).abs() < TOLERANCE);
        assert!(d.contains(10.0, -1.0, 0.0));
        assert!(!d.contains(10.1, 0.0, 0.0));
        assert!(d.admits(&SurfaceDomain::new(1.0, 2.0, 0.0, 4.0), None, 0.0));
        assert!(!d.admits(&SurfaceDomain::new(-1.0, 2.0, 0.0, 4.0), None, 0.0));
    }

    #[test]
    fn periodic_u_admits_any_start_within_one_period() {
        let d = SurfaceDomain::new(0.0, TAU, -1.0, 1.0);
        let period = Some(TAU);
        assert!(d.admits(&SurfaceDomain::new(-1.0, 1.0, 0.0, 1.0), period, TOLERANCE));
        assert!(d.admits(&SurfaceDomain::new(PI, 3.0 * PI, 0.0, 1.0), period, TOLERANCE));
        assert!(!d.admits(&SurfaceDomain::new(-1.0, TAU, 0.0, 1.0), period, TOLERANCE));
        // V stays bounded even when U is periodic.
        assert!(!d.admits(&SurfaceDomain::new(-1.0, 1.0, 0.0, 2.0), period, TOLERANCE));
    }

    #[test]
    fn infinite_domain_is_not_finite() {
        let d = SurfaceDomain::new(0.0, 1.0, f64::NEG_INFINITY, f64::INFINITY);
        assert!(!d.is_finite());
        assert!(d.is_ordered());
    }

    #[test]
    fn frame_rejects_skew_reference() {
        let r = Frame::new(Point3::origin(), Vector3::z(), Vector3::new(1.0, 0.0, 1.0));
        assert!(r.is_err());
    }

    #[test]
    fn frame_radial_is_unit() {
        let f = Frame::new(Point3::origin(), Vector3::z(), Vector3::x()).unwrap();
        assert!((f.radial(0.7).norm() - 1.0).abs() < 1e-12);
        assert!(f.radial(0.7).dot(&f.radial_tangent(0.7)).abs() < 1e-12);
    }

    #[test]
    fn unit_rejects_zero() {
        assert_eq!(unit(Vector3::zeros()), Err(GeometryError::ZeroVector));
    }
}
