use crate::error::{OperationError, Result};
use crate::geometry::surface::SurfaceDomain;
use crate::geometry::trim::TrimRegion;
use crate::math::TOLERANCE;
use crate::topology::{EntityStore, FaceData, FaceId, FaceOrientation, FaceSurface};

/// Creates a face on a surface, restricted to a parameter rectangle and an
/// optional trim region.
///
/// Without explicit bounds the face covers the whole surface domain, which
/// only works for surfaces with a finite domain.
pub struct MakeFace {
    surface: FaceSurface,
    bounds: Option<SurfaceDomain>,
    trim: TrimRegion,
    orientation: FaceOrientation,
}

impl MakeFace {
    /// Creates a new `MakeFace` operation.
    #[must_use]
    pub fn new(surface: FaceSurface) -> Self {
        Self {
            surface,
            bounds: None,
            trim: TrimRegion::untrimmed(),
            orientation: FaceOrientation::Forward,
        }
    }

    /// Sets the parameter rectangle of the face.
    #[must_use]
    pub fn with_bounds(mut self, bounds: SurfaceDomain) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Sets the trim region.
    #[must_use]
    pub fn with_trim(mut self, trim: TrimRegion) -> Self {
        self.trim = trim;
        self
    }

    /// Sets the orientation.
    #[must_use]
    pub fn with_orientation(mut self, orientation: FaceOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Marks the face as reversed relative to its surface.
    #[must_use]
    pub fn reversed(self) -> Self {
        self.with_orientation(FaceOrientation::Reversed)
    }

    /// Executes the operation, inserting the face into the store.
    ///
    /// The face is listed in the store's entity directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the bounds are infinite, empty, or leave the
    /// surface domain.
    pub fn execute(self, store: &mut EntityStore) -> Result<FaceId> {
        let surface = self.surface.as_surface();
        let domain = surface.domain();
        let bounds = self.bounds.unwrap_or(domain);

        if !bounds.is_finite() {
            return Err(OperationError::InvalidInput(format!(
                "face bounds must be finite, got {bounds:?}"
            ))
            .into());
        }
        if !bounds.is_ordered() {
            return Err(OperationError::InvalidInput(format!(
                "face bounds must satisfy min <= max, got {bounds:?}"
            ))
            .into());
        }
        if !domain.admits(&bounds, surface.u_period(), TOLERANCE) {
            return Err(OperationError::InvalidInput(format!(
                "face bounds {bounds:?} exceed surface domain {domain:?}"
            ))
            .into());
        }

        Ok(store.add_face(FaceData {
            surface: self.surface,
            bounds,
            trim: self.trim,
            orientation: self.orientation,
        }))
    }
}
