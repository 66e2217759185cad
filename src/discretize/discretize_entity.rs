use std::ops::ControlFlow;

use tracing::{info, warn};

use crate::error::{DiscretizationError, Result};
use crate::math::{Point3, Vector3};
use crate::topology::{EntityRef, EntityStore, FaceId};

use super::{DiscretizeFace, DiscretizeOptions, Discretization, FacePass, StepParameters};

/// Progress report handed to the callback of
/// [`DiscretizeEntity::execute_with_progress`] after each face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceProgress {
    /// The face just completed.
    pub face: FaceId,
    /// Zero-based position of that face in traversal order.
    pub face_index: usize,
    /// Total number of faces in the entity.
    pub face_count: usize,
    /// Samples the face produced.
    pub samples: usize,
}

/// Discretizes a face or a whole solid into one point list and one normal list.
///
/// Faces are visited in the order the store resolves them and their samples
/// are concatenated in that order.
pub struct DiscretizeEntity {
    entity: EntityRef,
    steps: StepParameters,
    options: DiscretizeOptions,
}

impl DiscretizeEntity {
    /// Creates a new `DiscretizeEntity` operation with default options.
    #[must_use]
    pub fn new(entity: EntityRef, steps: StepParameters) -> Self {
        Self {
            entity,
            steps,
            options: DiscretizeOptions::default(),
        }
    }

    /// Replaces the options.
    #[must_use]
    pub fn with_options(mut self, options: DiscretizeOptions) -> Self {
        self.options = options;
        self
    }

    /// Executes the discretization.
    ///
    /// With the `parallel` feature, faces are sampled on the rayon pool and
    /// reassembled in traversal order.
    ///
    /// # Errors
    ///
    /// Returns [`DiscretizationError::InvalidEntity`] if the entity resolves
    /// to no faces, and [`DiscretizationError::NoValidSamples`] if nothing
    /// survives trimming and evaluation.
    pub fn execute(&self, store: &EntityStore) -> Result<Discretization> {
        let faces = self.resolve(store)?;

        #[cfg(feature = "parallel")]
        let passes = {
            use rayon::prelude::*;
            faces
                .par_iter()
                .map(|&face| self.face_pass(store, face))
                .collect::<Result<Vec<_>>>()?
        };

        #[cfg(not(feature = "parallel"))]
        let passes = faces
            .iter()
            .map(|&face| self.face_pass(store, face))
            .collect::<Result<Vec<_>>>()?;

        self.finish(passes)
    }

    /// Executes sequentially, reporting after each face.
    ///
    /// Returning [`ControlFlow::Break`] from `on_face` stops before the next
    /// face starts; a face is never interrupted halfway.
    ///
    /// # Errors
    ///
    /// Same as [`DiscretizeEntity::execute`], plus
    /// [`DiscretizationError::Cancelled`] when the callback breaks before the
    /// last face.
    pub fn execute_with_progress<F>(&self, store: &EntityStore, mut on_face: F) -> Result<Discretization>
    where
        F: FnMut(&FaceProgress) -> ControlFlow<()>,
    {
        let faces = self.resolve(store)?;
        let face_count = faces.len();
        let mut passes = Vec::with_capacity(face_count);

        for (face_index, &face) in faces.iter().enumerate() {
            let pass = self.face_pass(store, face)?;
            let progress = FaceProgress {
                face,
                face_index,
                face_count,
                samples: pass.samples.len(),
            };
            passes.push(pass);
            if on_face(&progress).is_break() && face_index + 1 < face_count {
                return Err(DiscretizationError::Cancelled {
                    completed_faces: face_index + 1,
                    face_count,
                }
                .into());
            }
        }

        self.finish(passes)
    }

    fn resolve(&self, store: &EntityStore) -> Result<Vec<FaceId>> {
        let faces = store
            .resolve_faces(self.entity)
            .map_err(|e| DiscretizationError::InvalidEntity(e.to_string()))?;
        if faces.is_empty() {
            return Err(DiscretizationError::InvalidEntity(format!(
                "{:?} has no faces",
                self.entity
            ))
            .into());
        }
        Ok(faces)
    }

    fn face_pass(&self, store: &EntityStore, face: FaceId) -> Result<FacePass> {
        let pass = DiscretizeFace::new(face, self.steps)
            .with_options(self.options)
            .execute(store)?;
        if pass.samples.is_empty() {
            if self.options.require_every_face {
                return Err(pass.stats.no_valid_samples().into());
            }
            warn!(?face, entity = ?self.entity, "face produced no samples");
        }
        Ok(pass)
    }

    fn finish(&self, passes: Vec<FacePass>) -> Result<Discretization> {
        let face_count = passes.len();
        let result = Discretization::from_passes(passes);
        if result.is_empty() {
            return Err(result.stats.no_valid_samples().into());
        }
        info!(
            entity = ?self.entity,
            faces = face_count,
            points = result.len(),
            trimmed = result.stats.trimmed,
            failed = result.stats.failed,
            "entity discretized"
        );
        Ok(result)
    }
}

/// Discretizes `entity` with steps `du` and `dv`, returning parallel point
/// and normal lists.
///
/// The steps are validated before anything else is looked at.
///
/// # Errors
///
/// Returns [`DiscretizationError::InvalidParameter`] for a non-positive step,
/// [`DiscretizationError::InvalidEntity`] for an entity without faces, and
/// [`DiscretizationError::NoValidSamples`] if every sample was trimmed away
/// or failed to evaluate.
pub fn discretize(
    entity: EntityRef,
    store: &EntityStore,
    du: f64,
    dv: f64,
) -> Result<(Vec<Point3>, Vec<Vector3>)> {
    let steps = StepParameters::new(du, dv)?;
    DiscretizeEntity::new(entity, steps)
        .execute(store)
        .map(Discretization::into_parts)
}
