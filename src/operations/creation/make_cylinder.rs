use std::f64::consts::TAU;

use crate::error::{OperationError, Result};
use crate::geometry::surface::{Cylinder, Plane, SurfaceDomain};
use crate::geometry::trim::{TrimLoop, TrimRegion};
use crate::math::{Point2, Point3, Vector3, TOLERANCE};
use crate::topology::{EntityStore, FaceId, FaceOrientation, FaceSurface, SolidId};

use super::{closed_solid, MakeFace};

/// Number of polygon edges approximating each circular cap boundary.
const CAP_SEGMENTS: usize = 64;

/// Creates a cylinder solid from center, radius, axis, and height.
///
/// The solid has three faces: the lateral cylindrical face, then the bottom
/// and top caps. Caps are planar squares trimmed to a disc.
pub struct MakeCylinder {
    center: Point3,
    radius: f64,
    axis: Vector3,
    height: f64,
}

impl MakeCylinder {
    /// Creates a new `MakeCylinder` operation.
    ///
    /// A negative height extends the cylinder against `axis`.
    #[must_use]
    pub fn new(center: Point3, radius: f64, axis: Vector3, height: f64) -> Self {
        Self {
            center,
            radius,
            axis,
            height,
        }
    }

    /// Executes the operation, creating the cylinder in the entity store.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius or height is near zero, or the axis
    /// direction is degenerate.
    pub fn execute(&self, store: &mut EntityStore) -> Result<SolidId> {
        if self.radius < TOLERANCE {
            return Err(
                OperationError::InvalidInput("cylinder radius must be positive".into()).into(),
            );
        }
        if self.height.abs() < TOLERANCE {
            return Err(
                OperationError::InvalidInput("cylinder height must be non-zero".into()).into(),
            );
        }
        let axis_len = self.axis.norm();
        if axis_len < TOLERANCE {
            return Err(
                OperationError::InvalidInput("cylinder axis must be non-zero".into()).into(),
            );
        }
        let axis = self.axis / axis_len * self.height.signum();
        let height = self.height.abs();

        let ref_dir = perpendicular_dir(&axis);
        let binormal = axis.cross(&ref_dir);
        let r = self.radius;

        let lateral = MakeFace::new(FaceSurface::Cylinder(Cylinder::new(
            self.center,
            r,
            axis,
            ref_dir,
        )?))
        .with_bounds(SurfaceDomain::new(0.0, TAU, 0.0, height))
        .execute(store)?;

        // Cap planes have normal ref_dir x binormal = axis, so the bottom cap
        // is reversed.
        let bottom = cap(store, self.center, ref_dir, binormal, r, FaceOrientation::Reversed)?;
        let top = cap(
            store,
            self.center + axis * height,
            ref_dir,
            binormal,
            r,
            FaceOrientation::Forward,
        )?;

        Ok(closed_solid(store, vec![lateral, bottom, top]))
    }
}

fn cap(
    store: &mut EntityStore,
    origin: Point3,
    u_dir: Vector3,
    v_dir: Vector3,
    radius: f64,
    orientation: FaceOrientation,
) -> Result<FaceId> {
    let disc = TrimLoop::circle(Point2::origin(), radius, CAP_SEGMENTS)?;
    MakeFace::new(FaceSurface::Plane(Plane::new(origin, u_dir, v_dir)?))
        .with_bounds(SurfaceDomain::new(-radius, radius, -radius, radius))
        .with_trim(TrimRegion::bounded_by(disc))
        .with_orientation(orientation)
        .execute(store)
}

/// Finds a direction perpendicular to the given unit vector.
fn perpendicular_dir(axis: &Vector3) -> Vector3 {
    let candidate = if axis.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let perp = axis.cross(&candidate);
    perp / perp.norm()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn cylinder_has_3_faces() {
        let mut store = EntityStore::new();
        let solid = MakeCylinder::new(p(0.0, 0.0, 0.0), 3.0, Vector3::z(), 6.0)
            .execute(&mut store)
            .unwrap();

        let shell = store.shell(store.solid(solid).unwrap().outer_shell).unwrap();
        assert_eq!(shell.faces.len(), 3);
        assert!(shell.is_closed);

        let caps = &shell.faces[1..];
        for &face in caps {
            let data = store.face(face).unwrap();
            assert!(matches!(data.surface, FaceSurface::Plane(_)));
            assert!(!data.trim.is_untrimmed());
        }
        assert_eq!(store.face(caps[0]).unwrap().orientation, FaceOrientation::Reversed);
        assert_eq!(store.face(caps[1]).unwrap().orientation, FaceOrientation::Forward);
    }

    #[test]
    fn lateral_face_spans_height() {
        let mut store = EntityStore::new();
        let solid = MakeCylinder::new(p(1.0, 1.0, 1.0), 2.0, Vector3::new(0.0, 0.0, 4.0), 5.0)
            .execute(&mut store)
            .unwrap();
        let shell = store.shell(store.solid(solid).unwrap().outer_shell).unwrap();
        let lateral = store.face(shell.faces[0]).unwrap();
        assert_eq!(lateral.bounds, SurfaceDomain::new(0.0, TAU, 0.0, 5.0));

        let s = lateral.surface.as_surface();
        let top = s.evaluate(0.0, 5.0).unwrap();
        assert!((top.z - 6.0).abs() < TOLERANCE);
        assert!(((top - p(1.0, 1.0, 6.0)).norm() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn negative_height_flips_axis() {
        let mut store = EntityStore::new();
        let solid = MakeCylinder::new(p(0.0, 0.0, 0.0), 1.0, Vector3::z(), -2.0)
            .execute(&mut store)
            .unwrap();
        let shell = store.shell(store.solid(solid).unwrap().outer_shell).unwrap();
        let top = store.face(shell.faces[2]).unwrap();
        let centre = top.surface.as_surface().evaluate(0.0, 0.0).unwrap();
        assert!((centre - p(0.0, 0.0, -2.0)).norm() < TOLERANCE);
    }

    #[test]
    fn zero_radius_fails() {
        let mut store = EntityStore::new();
        let result = MakeCylinder::new(p(0.0, 0.0, 0.0), 0.0, Vector3::z(), 5.0)
            .execute(&mut store);
        assert!(result.is_err());
    }

    #[test]
    fn zero_height_fails() {
        let mut store = EntityStore::new();
        let result = MakeCylinder::new(p(0.0, 0.0, 0.0), 3.0, Vector3::z(), 0.0)
            .execute(&mut store);
        assert!(result.is_err());
    }
}
