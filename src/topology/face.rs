use crate::geometry::surface::{Cone, Cylinder, NurbsSurface, Plane, Sphere, Surface, SurfaceDomain};
use crate::geometry::trim::TrimRegion;

slotmap::new_key_type! {
    /// Unique identifier for a face in the entity store.
    pub struct FaceId;
}

/// The geometric surface carrying a face.
#[derive(Debug, Clone)]
pub enum FaceSurface {
    /// A planar surface.
    Plane(Plane),
    /// A cylindrical surface.
    Cylinder(Cylinder),
    /// A conical surface.
    Cone(Cone),
    /// A spherical surface.
    Sphere(Sphere),
    /// A rational B-spline surface.
    Nurbs(NurbsSurface),
}

impl FaceSurface {
    /// Returns the carrier as a [`Surface`] trait object.
    #[must_use]
    pub fn as_surface(&self) -> &dyn Surface {
        match self {
            Self::Plane(s) => s,
            Self::Cylinder(s) => s,
            Self::Cone(s) => s,
            Self::Sphere(s) => s,
            Self::Nurbs(s) => s,
        }
    }
}

/// Orientation of a face relative to its carrier surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FaceOrientation {
    /// The surface normal already points away from material.
    #[default]
    Forward,
    /// The surface normal points into material and must be flipped.
    Reversed,
}

impl FaceOrientation {
    /// Returns the opposite orientation.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Forward => Self::Reversed,
            Self::Reversed => Self::Forward,
        }
    }
}

/// Data associated with a face.
///
/// A face is the part of its surface's parameter rectangle `bounds` that lies
/// inside `trim`.
#[derive(Debug, Clone)]
pub struct FaceData {
    /// The geometric surface on which this face lies.
    pub surface: FaceSurface,
    /// Finite parameter rectangle of the face, inside the surface domain.
    pub bounds: SurfaceDomain,
    /// Trim loops restricting the face within `bounds`.
    pub trim: TrimRegion,
    /// Whether the face normal agrees with the surface normal.
    pub orientation: FaceOrientation,
}
