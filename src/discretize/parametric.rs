use crate::error::{DiscretizationError, GeometryError};
use crate::geometry::surface::{Surface, SurfaceDomain};
use crate::geometry::trim::TrimRegion;
use crate::math::{Point3, Vector3, BOUNDARY_TOLERANCE, TOLERANCE};
use crate::topology::{EntityStore, FaceData, FaceId, FaceOrientation};

use super::NormalOrientation;

/// A face viewed as a bounded, trimmed, oriented parametric surface.
///
/// Borrowed from the store for the duration of one pass.
pub struct ParametricSurface<'a> {
    face: FaceId,
    surface: &'a dyn Surface,
    bounds: SurfaceDomain,
    trim: &'a TrimRegion,
    flip: bool,
}

impl<'a> ParametricSurface<'a> {
    /// Adapts the face `id` from `store`.
    ///
    /// # Errors
    ///
    /// Returns [`DiscretizationError::InvalidEntity`] if the face is missing
    /// or its bounds are not a finite rectangle inside the surface domain.
    pub fn new(
        store: &'a EntityStore,
        id: FaceId,
        normals: NormalOrientation,
    ) -> Result<Self, DiscretizationError> {
        let face = store
            .face(id)
            .map_err(|e| DiscretizationError::InvalidEntity(e.to_string()))?;
        Self::from_face(id, face, normals)
    }

    /// Adapts already-fetched face data.
    ///
    /// # Errors
    ///
    /// Returns [`DiscretizationError::InvalidEntity`] if the bounds are not a
    /// finite rectangle inside the surface domain.
    pub fn from_face(
        id: FaceId,
        face: &'a FaceData,
        normals: NormalOrientation,
    ) -> Result<Self, DiscretizationError> {
        let surface = face.surface.as_surface();
        let bounds = face.bounds;
        if !bounds.is_finite() || !bounds.is_ordered() {
            return Err(DiscretizationError::InvalidEntity(format!(
                "face bounds must be finite and ordered, got {bounds:?}"
            )));
        }
        if !surface.domain().admits(&bounds, surface.u_period(), TOLERANCE) {
            return Err(DiscretizationError::InvalidEntity(format!(
                "face bounds {bounds:?} exceed surface domain {:?}",
                surface.domain()
            )));
        }

        Ok(Self {
            face: id,
            surface,
            bounds,
            trim: &face.trim,
            flip: normals == NormalOrientation::FaceOriented
                && face.orientation == FaceOrientation::Reversed,
        })
    }

    /// The adapted face.
    #[must_use]
    pub fn face(&self) -> FaceId {
        self.face
    }

    /// Parameter rectangle to sample.
    #[must_use]
    pub fn domain(&self) -> SurfaceDomain {
        self.bounds
    }

    /// Returns `true` if `(u, v)` is part of the face: inside the closed
    /// parameter rectangle and inside the trim region.
    #[must_use]
    pub fn is_inside(&self, u: f64, v: f64) -> bool {
        self.bounds.contains(u, v, BOUNDARY_TOLERANCE) && self.trim.contains(u, v)
    }

    /// Position at `(u, v)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot be evaluated there.
    pub fn position(&self, u: f64, v: f64) -> Result<Point3, GeometryError> {
        let p = self.surface.evaluate(u, v)?;
        if p.iter().all(|c| c.is_finite()) {
            Ok(p)
        } else {
            Err(GeometryError::NonFinite { u, v })
        }
    }

    /// Unit normal at `(u, v)`, pointing away from material when the face
    /// orientation is honoured.
    ///
    /// # Errors
    ///
    /// Returns an error if the normal is undefined there.
    pub fn normal(&self, u: f64, v: f64) -> Result<Vector3, GeometryError> {
        let n = self.surface.normal(u, v)?;
        let len = n.norm();
        if !len.is_finite() {
            return Err(GeometryError::NonFinite { u, v });
        }
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector);
        }
        let n = n / len;
        Ok(if self.flip { -n } else { n })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::surface::{Cone, Cylinder, Plane};
    use crate::geometry::trim::TrimLoop;
    use crate::math::Point2;
    use crate::topology::FaceSurface;
    use std::f64::consts::{FRAC_PI_4, TAU};

    fn plane_face(bounds: SurfaceDomain, orientation: FaceOrientation) -> FaceData {
        FaceData {
            surface: FaceSurface::Plane(
                Plane::new(Point3::origin(), Vector3::x(), Vector3::y()).unwrap(),
            ),
            bounds,
            trim: TrimRegion::untrimmed(),
            orientation,
        }
    }

    #[test]
    fn reversed_face_flips_normal() {
        let mut store = EntityStore::new();
        let id = store.add_face(plane_face(
            SurfaceDomain::new(0.0, 1.0, 0.0, 1.0),
            FaceOrientation::Reversed,
        ));

        let oriented = ParametricSurface::new(&store, id, NormalOrientation::FaceOriented).unwrap();
        assert!((oriented.normal(0.5, 0.5).unwrap() + Vector3::z()).norm() < 1e-12);

        let native = ParametricSurface::new(&store, id, NormalOrientation::SurfaceNative).unwrap();
        assert!((native.normal(0.5, 0.5).unwrap() - Vector3::z()).norm() < 1e-12);
    }

    #[test]
    fn unbounded_face_is_invalid() {
        let mut store = EntityStore::new();
        let id = store.add_face(plane_face(
            SurfaceDomain::new(0.0, f64::INFINITY, 0.0, 1.0),
            FaceOrientation::Forward,
        ));
        assert!(matches!(
            ParametricSurface::new(&store, id, NormalOrientation::default()),
            Err(DiscretizationError::InvalidEntity(_))
        ));
    }

    #[test]
    fn seam_crossing_cylinder_face_is_sampled() {
        let mut store = EntityStore::new();
        let id = store.add_face(FaceData {
            surface: FaceSurface::Cylinder(
                Cylinder::new(Point3::origin(), 1.0, Vector3::z(), Vector3::x()).unwrap(),
            ),
            bounds: SurfaceDomain::new(-1.0, 1.0, 0.0, 1.0),
            trim: TrimRegion::untrimmed(),
            orientation: FaceOrientation::Forward,
        });
        let s = ParametricSurface::new(&store, id, NormalOrientation::default()).unwrap();

        assert!(s.is_inside(-0.5, 0.5));
        let before_seam = s.position(-0.5, 0.5).unwrap();
        let wrapped = s.position(TAU - 0.5, 0.5).unwrap();
        assert!((before_seam - wrapped).norm() < 1e-12);
        assert!((s.normal(-0.5, 0.5).unwrap().norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn bounds_outside_open_axis_are_invalid() {
        let mut store = EntityStore::new();
        let cone = store.add_face(FaceData {
            surface: FaceSurface::Cone(
                Cone::new(Point3::origin(), Vector3::z(), FRAC_PI_4, Vector3::x()).unwrap(),
            ),
            bounds: SurfaceDomain::new(-1.0, 1.0, -1.0, 1.0),
            trim: TrimRegion::untrimmed(),
            orientation: FaceOrientation::Forward,
        });
        let too_wide = store.add_face(FaceData {
            surface: FaceSurface::Cylinder(
                Cylinder::new(Point3::origin(), 1.0, Vector3::z(), Vector3::x()).unwrap(),
            ),
            bounds: SurfaceDomain::new(-1.0, TAU, 0.0, 1.0),
            trim: TrimRegion::untrimmed(),
            orientation: FaceOrientation::Forward,
        });
        for id in [cone, too_wide] {
            assert!(matches!(
                ParametricSurface::new(&store, id, NormalOrientation::default()),
                Err(DiscretizationError::InvalidEntity(_))
            ));
        }
    }

    #[test]
    fn inside_respects_bounds_and_trim() {
        let mut face = plane_face(SurfaceDomain::new(0.0, 2.0, 0.0, 2.0), FaceOrientation::Forward);
        face.trim = TrimRegion::bounded_by(
            TrimLoop::new(vec![
                Point2::new(0.0, 0.0),
                Point2::new(2.0, 0.0),
                Point2::new(0.0, 2.0),
            ])
            .unwrap(),
        );
        let mut store = EntityStore::new();
        let id = store.add_face(face);
        let s = ParametricSurface::new(&store, id, NormalOrientation::default()).unwrap();

        assert!(s.is_inside(0.5, 0.5));
        assert!(s.is_inside(1.0, 1.0));
        assert!(!s.is_inside(1.5, 1.5));
        assert!(!s.is_inside(-0.1, 0.5));
        assert_eq!(s.face(), id);
    }
}
