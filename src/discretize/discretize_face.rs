use crate::error::Result;
use crate::topology::{EntityStore, FaceId};

use super::{DiscretizeOptions, Evaluator, FacePass, ParametricSurface, Sampler, StepParameters};

/// Samples a single face into points and normals.
pub struct DiscretizeFace {
    face: FaceId,
    steps: StepParameters,
    options: DiscretizeOptions,
}

impl DiscretizeFace {
    /// Creates a new `DiscretizeFace` operation with default options.
    #[must_use]
    pub fn new(face: FaceId, steps: StepParameters) -> Self {
        Self {
            face,
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

    /// Executes the pass.
    ///
    /// An empty pass (every pair trimmed or failed) is returned as-is; the
    /// caller decides whether that is fatal.
    ///
    /// # Errors
    ///
    /// Returns an error if the face cannot be adapted or a step is too small
    /// for the face's parameter range.
    pub fn execute(&self, store: &EntityStore) -> Result<FacePass> {
        let surface = ParametricSurface::new(store, self.face, self.options.normals)?;
        let sampler = Sampler::new(&surface.domain(), self.steps, self.options.spacing)?;
        Ok(Evaluator::new(&surface).run(&sampler))
    }
}
