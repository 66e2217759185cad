use crate::error::{OperationError, Result};
use crate::geometry::surface::Sphere;
use crate::math::{Point3, Vector3, TOLERANCE};
use crate::topology::{EntityStore, FaceSurface, SolidId};

use super::{closed_solid, MakeFace};

/// Creates a sphere solid from center and radius.
///
/// The solid has a single face covering the full sphere domain, with poles
/// along +Z and -Z.
pub struct MakeSphere {
    center: Point3,
    radius: f64,
}

impl MakeSphere {
    /// Creates a new `MakeSphere` operation.
    #[must_use]
    pub fn new(center: Point3, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Executes the operation, creating the sphere in the entity store.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is near zero.
    pub fn execute(&self, store: &mut EntityStore) -> Result<SolidId> {
        if self.radius < TOLERANCE {
            return Err(
                OperationError::InvalidInput("sphere radius must be positive".into()).into(),
            );
        }

        let sphere = Sphere::new(self.center, self.radius, Vector3::z(), Vector3::x())?;
        let face = MakeFace::new(FaceSurface::Sphere(sphere)).execute(store)?;
        Ok(closed_solid(store, vec![face]))
    }
}
