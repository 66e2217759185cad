pub mod entity;
pub mod face;
pub mod shell;
pub mod solid;

pub use entity::{EntityRef, SequenceNumber};
pub use face::{FaceData, FaceId, FaceOrientation, FaceSurface};
pub use shell::{ShellData, ShellId};
pub use solid::{SolidData, SolidId};

use crate::error::TopologyError;
use slotmap::SlotMap;

/// Central arena that owns all loaded entities.
///
/// Faces, shells, and solids reference each other via typed IDs
/// (generational indices). Faces and solids are also recorded in a directory
/// list in insertion order; an entity's position in that list gives its
/// [`SequenceNumber`].
#[derive(Debug, Default)]
pub struct EntityStore {
    faces: SlotMap<FaceId, FaceData>,
    shells: SlotMap<ShellId, ShellData>,
    solids: SlotMap<SolidId, SolidData>,
    directory: Vec<EntityRef>,
}

impl EntityStore {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Face operations ---

    /// Inserts a face, lists it in the directory, and returns its ID.
    pub fn add_face(&mut self, data: FaceData) -> FaceId {
        let id = self.faces.insert(data);
        self.directory.push(EntityRef::Face(id));
        id
    }

    /// Returns a reference to the face data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn face(&self, id: FaceId) -> Result<&FaceData, TopologyError> {
        self.faces
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("face".into()))
    }

    /// Returns the orientation flag of a face.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is not found in the store.
    pub fn face_orientation(&self, id: FaceId) -> Result<FaceOrientation, TopologyError> {
        self.face(id).map(|f| f.orientation)
    }

    // --- Shell operations ---

    /// Inserts a shell and returns its ID. Shells are not selectable and do
    /// not get a directory entry.
    pub fn add_shell(&mut self, data: ShellData) -> ShellId {
        self.shells.insert(data)
    }

    /// Returns a reference to the shell data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn shell(&self, id: ShellId) -> Result<&ShellData, TopologyError> {
        self.shells
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("shell".into()))
    }

    // --- Solid operations ---

    /// Inserts a solid, lists it in the directory, and returns its ID.
    pub fn add_solid(&mut self, data: SolidData) -> SolidId {
        let id = self.solids.insert(data);
        self.directory.push(EntityRef::Solid(id));
        id
    }

    /// Returns a reference to the solid data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn solid(&self, id: SolidId) -> Result<&SolidData, TopologyError> {
        self.solids
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("solid".into()))
    }

    // --- Directory ---

    /// Selectable entities in directory order.
    #[must_use]
    pub fn entities(&self) -> &[EntityRef] {
        &self.directory
    }

    /// Finds the sequence number of `entity` by scanning the directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity was never listed.
    pub fn sequence_number(&self, entity: EntityRef) -> Result<SequenceNumber, TopologyError> {
        self.directory
            .iter()
            .position(|&e| e == entity)
            .and_then(SequenceNumber::from_index)
            .ok_or_else(|| TopologyError::EntityNotFound(format!("{entity:?} is not listed")))
    }

    /// Looks up the entity with the given sequence number.
    ///
    /// # Errors
    ///
    /// Returns an error if no directory entry has that number.
    pub fn entity(&self, seq: SequenceNumber) -> Result<EntityRef, TopologyError> {
        self.directory
            .get(seq.index())
            .copied()
            .ok_or(TopologyError::SequenceNumberNotFound(seq.get()))
    }

    /// Resolves an entity into its faces in traversal order.
    ///
    /// A face resolves to itself. A solid resolves to the faces of its outer
    /// shell followed by the faces of each void shell, in stored order.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity or any shell or face it references is
    /// missing from the store.
    pub fn resolve_faces(&self, entity: EntityRef) -> Result<Vec<FaceId>, TopologyError> {
        match entity {
            EntityRef::Face(id) => {
                self.face(id)?;
                Ok(vec![id])
            }
            EntityRef::Solid(id) => {
                let solid = self.solid(id)?;
                let mut faces = Vec::new();
                for &shell_id in std::iter::once(&solid.outer_shell).chain(&solid.inner_shells) {
                    let shell = self.shell(shell_id)?;
                    for &face_id in &shell.faces {
                        self.face(face_id)?;
                        faces.push(face_id);
                    }
                }
                Ok(faces)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::surface::{Plane, SurfaceDomain};
    use crate::geometry::trim::TrimRegion;
    use crate::math::{Point3, Vector3};

    fn square_face(orientation: FaceOrientation) -> FaceData {
        FaceData {
            surface: FaceSurface::Plane(
                Plane::new(Point3::origin(), Vector3::x(), Vector3::y()).unwrap(),
            ),
            bounds: SurfaceDomain::new(0.0, 1.0, 0.0, 1.0),
            trim: TrimRegion::untrimmed(),
            orientation,
        }
    }

    #[test]
    fn directory_assigns_odd_sequence_numbers() {
        let mut store = EntityStore::new();
        let f0 = store.add_face(square_face(FaceOrientation::Forward));
        let f1 = store.add_face(square_face(FaceOrientation::Reversed));
        let shell = store.add_shell(ShellData {
            faces: vec![f0, f1],
            is_closed: false,
        });
        let solid = store.add_solid(SolidData {
            outer_shell: shell,
            inner_shells: vec![],
        });

        assert_eq!(store.entities().len(), 3);
        assert_eq!(store.sequence_number(f0.into()).unwrap().get(), 1);
        assert_eq!(store.sequence_number(f1.into()).unwrap().get(), 3);
        assert_eq!(store.sequence_number(solid.into()).unwrap().get(), 5);

        let seq = SequenceNumber::new(5).unwrap();
        assert_eq!(store.entity(seq).unwrap(), EntityRef::Solid(solid));
    }

    #[test]
    fn unknown_sequence_number() {
        let store = EntityStore::new();
        let seq = SequenceNumber::new(9).unwrap();
        assert_eq!(store.entity(seq), Err(TopologyError::SequenceNumberNotFound(9)));
    }

    #[test]
    fn solid_resolves_outer_then_void_faces() {
        let mut store = EntityStore::new();
        let a = store.add_face(square_face(FaceOrientation::Forward));
        let b = store.add_face(square_face(FaceOrientation::Forward));
        let c = store.add_face(square_face(FaceOrientation::Reversed));
        let outer = store.add_shell(ShellData {
            faces: vec![b, a],
            is_closed: true,
        });
        let void = store.add_shell(ShellData {
            faces: vec![c],
            is_closed: true,
        });
        let solid = store.add_solid(SolidData {
            outer_shell: outer,
            inner_shells: vec![void],
        });

        assert_eq!(store.resolve_faces(solid.into()).unwrap(), vec![b, a, c]);
        assert_eq!(store.resolve_faces(a.into()).unwrap(), vec![a]);
        assert_eq!(store.face_orientation(c).unwrap(), FaceOrientation::Reversed);
    }

    #[test]
    fn empty_solid_resolves_to_no_faces() {
        let mut store = EntityStore::new();
        let shell = store.add_shell(ShellData {
            faces: vec![],
            is_closed: false,
        });
        let solid = store.add_solid(SolidData {
            outer_shell: shell,
            inner_shells: vec![],
        });
        assert!(store.resolve_faces(solid.into()).unwrap().is_empty());
    }

    #[test]
    fn face_from_another_store_is_not_found() {
        let mut other = EntityStore::new();
        let foreign = other.add_face(square_face(FaceOrientation::Forward));
        let store = EntityStore::new();
        assert!(store.resolve_faces(foreign.into()).is_err());
        assert!(store.sequence_number(foreign.into()).is_err());
    }
}
