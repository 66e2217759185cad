use crate::error::GeometryError;
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{unit, Surface, SurfaceDomain};

/// An infinite plane in 3D space.
///
/// Parametric form: `P(u, v) = origin + u * u_dir + v * v_dir`, with unit
/// directions. The normal is `u_dir x v_dir`. Faces on a plane always carry
/// finite bounds.
#[derive(Debug, Clone)]
pub struct Plane {
    origin: Point3,
    u_dir: Vector3,
    v_dir: Vector3,
    normal: Vector3,
}

impl Plane {
    /// Creates a new plane from an origin and two direction vectors.
    ///
    /// # Errors
    ///
    /// Returns an error if a direction is zero-length or the two are parallel.
    pub fn new(origin: Point3, u_dir: Vector3, v_dir: Vector3) -> Result<Self, GeometryError> {
        let u_dir = unit(u_dir)?;
        let v_dir = unit(v_dir)?;
        let normal = u_dir.cross(&v_dir);
        if normal.norm() < TOLERANCE {
            return Err(GeometryError::Degenerate(
                "plane directions are parallel".into(),
            ));
        }
        Ok(Self {
            origin,
            u_dir,
            v_dir,
            normal: normal.normalize(),
        })
    }

    /// Creates a plane from an origin and a normal vector, choosing U and V
    /// directions automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if the normal vector is zero-length.
    pub fn from_normal(origin: Point3, normal: Vector3) -> Result<Self, GeometryError> {
        let normal = unit(normal)?;
        let reference = if normal.x.abs() < 0.9 {
            Vector3::x()
        } else {
            Vector3::y()
        };
        let u_dir = normal.cross(&reference).normalize();
        let v_dir = normal.cross(&u_dir);
        Ok(Self {
            origin,
            u_dir,
            v_dir,
            normal,
        })
    }

    /// Returns the origin point of the plane.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the U direction vector.
    #[must_use]
    pub fn u_dir(&self) -> &Vector3 {
        &self.u_dir
    }

    /// Returns the V direction vector.
    #[must_use]
    pub fn v_dir(&self) -> &Vector3 {
        &self.v_dir
    }
}

impl Surface for Plane {
    fn evaluate(&self, u: f64, v: f64) -> Result<Point3, GeometryError> {
        Ok(self.origin + self.u_dir * u + self.v_dir * v)
    }

    fn normal(&self, _u: f64, _v: f64) -> Result<Vector3, GeometryError> {
        Ok(self.normal)
    }

    fn domain(&self) -> SurfaceDomain {
        SurfaceDomain::new(f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY)
    }
}
