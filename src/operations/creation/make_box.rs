use crate::error::{OperationError, Result};
use crate::geometry::surface::{Plane, SurfaceDomain};
use crate::math::{Point3, Vector3, TOLERANCE};
use crate::topology::{EntityStore, FaceId, FaceOrientation, FaceSurface, SolidId};

use super::{closed_solid, MakeFace};

/// Creates a box solid from two corner points.
///
/// The six faces are planar. Each pair of opposite faces shares the same
/// plane directions; the face at the lower coordinate is reversed so every
/// oriented normal points out of the box. Faces are stored bottom, top,
/// front, back, left, right.
pub struct MakeBox {
    min_corner: Point3,
    max_corner: Point3,
}

impl MakeBox {
    /// Creates a new `MakeBox` operation.
    #[must_use]
    pub fn new(min_corner: Point3, max_corner: Point3) -> Self {
        Self {
            min_corner,
            max_corner,
        }
    }

    /// Executes the operation, creating the box in the entity store.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_corner` does not exceed `min_corner` on
    /// every axis.
    pub fn execute(&self, store: &mut EntityStore) -> Result<SolidId> {
        let size = self.max_corner - self.min_corner;
        if size.iter().any(|&d| d <= TOLERANCE || !d.is_finite()) {
            return Err(OperationError::InvalidInput(format!(
                "box corners must span a positive volume, got size {size:?}"
            ))
            .into());
        }

        let o = self.min_corner;
        let (x, y, z) = (Vector3::x(), Vector3::y(), Vector3::z());
        // (origin offset, u direction, v direction, u length, v length)
        let pairs = [
            (z * size.z, x, y, size.x, size.y),
            (y * size.y, z, x, size.z, size.x),
            (x * size.x, y, z, size.y, size.z),
        ];

        let mut faces = Vec::with_capacity(6);
        for (offset, u_dir, v_dir, u_len, v_len) in pairs {
            let bounds = SurfaceDomain::new(0.0, u_len, 0.0, v_len);
            faces.push(side(store, o, u_dir, v_dir, bounds, FaceOrientation::Reversed)?);
            faces.push(side(store, o + offset, u_dir, v_dir, bounds, FaceOrientation::Forward)?);
        }

        Ok(closed_solid(store, faces))
    }
}

fn side(
    store: &mut EntityStore,
    origin: Point3,
    u_dir: Vector3,
    v_dir: Vector3,
    bounds: SurfaceDomain,
    orientation: FaceOrientation,
) -> Result<FaceId> {
    let plane = Plane::new(origin, u_dir, v_dir)?;
    MakeFace::new(FaceSurface::Plane(plane))
        .with_bounds(bounds)
        .with_orientation(orientation)
        .execute(store)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn box_has_6_faces() {
        let mut store = EntityStore::new();
        let solid = MakeBox::new(p(0.0, 0.0, 0.0), p(1.0, 2.0, 3.0))
            .execute(&mut store)
            .unwrap();

        let shell = store.shell(store.solid(solid).unwrap().outer_shell).unwrap();
        assert_eq!(shell.faces.len(), 6);
        assert!(shell.is_closed);
        // Six faces plus the solid itself.
        assert_eq!(store.entities().len(), 7);
    }

    #[test]
    fn oriented_normals_point_outward() {
        let mut store = EntityStore::new();
        let solid = MakeBox::new(p(-1.0, 0.0, 2.0), p(1.0, 4.0, 3.0))
            .execute(&mut store)
            .unwrap();
        let center = p(0.0, 2.0, 2.5);

        let shell = store.shell(store.solid(solid).unwrap().outer_shell).unwrap();
        for &face in &shell.faces {
            let data = store.face(face).unwrap();
            let s = data.surface.as_surface();
            let (u, v) = (data.bounds.u_span() / 2.0, data.bounds.v_span() / 2.0);
            let mut n = s.normal(u, v).unwrap();
            if data.orientation == FaceOrientation::Reversed {
                n = -n;
            }
            assert!((s.evaluate(u, v).unwrap() - center).dot(&n) > 0.0);
        }
    }

    #[test]
    fn face_bounds_match_box_size() {
        let mut store = EntityStore::new();
        let solid = MakeBox::new(p(0.0, 0.0, 0.0), p(1.0, 2.0, 3.0))
            .execute(&mut store)
            .unwrap();
        let shell = store.shell(store.solid(solid).unwrap().outer_shell).unwrap();
        let top = store.face(shell.faces[1]).unwrap();
        assert_eq!(top.bounds, SurfaceDomain::new(0.0, 1.0, 0.0, 2.0));
        let corner = top.surface.as_surface().evaluate(1.0, 2.0).unwrap();
        assert!((corner - p(1.0, 2.0, 3.0)).norm() < TOLERANCE);
    }

    #[test]
    fn flat_box_fails() {
        let mut store = EntityStore::new();
        let result = MakeBox::new(p(0.0, 0.0, 0.0), p(1.0, 1.0, 0.0)).execute(&mut store);
        assert!(result.is_err());
        assert!(store.entities().is_empty());
    }
}
