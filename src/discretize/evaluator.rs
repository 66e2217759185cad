use tracing::debug;

use crate::error::GeometryError;
use crate::math::Point2;

use super::{FacePass, ParametricSurface, SamplePoint, SampleStats, Sampler};

/// Evaluates accepted parameter pairs on a face.
///
/// A sample whose position or normal cannot be computed is skipped and
/// counted; it never aborts the pass.
pub struct Evaluator<'s, 'a> {
    surface: &'s ParametricSurface<'a>,
}

impl<'s, 'a> Evaluator<'s, 'a> {
    /// Creates an evaluator for `surface`.
    #[must_use]
    pub fn new(surface: &'s ParametricSurface<'a>) -> Self {
        Self { surface }
    }

    /// Evaluates a single parameter pair.
    ///
    /// # Errors
    ///
    /// Returns the geometry error raised by the position or normal evaluation.
    pub fn sample(&self, u: f64, v: f64) -> Result<SamplePoint, GeometryError> {
        Ok(SamplePoint {
            uv: Point2::new(u, v),
            point: self.surface.position(u, v)?,
            normal: self.surface.normal(u, v)?,
        })
    }

    /// Runs a full pass over the sampler's grid.
    #[must_use]
    pub fn run(&self, sampler: &Sampler) -> FacePass {
        let mut stats = SampleStats {
            candidates: sampler.candidate_count(),
            ..SampleStats::default()
        };
        let mut samples = Vec::new();

        let mut accepted = sampler.accepted(|u, v| self.surface.is_inside(u, v));
        for (u, v) in accepted.by_ref() {
            match self.sample(u, v) {
                Ok(sample) => samples.push(sample),
                Err(err) => {
                    debug!(face = ?self.surface.face(), u, v, %err, "skipping sample");
                    stats.failed += 1;
                }
            }
        }
        stats.trimmed = accepted.rejected();

        debug!(
            face = ?self.surface.face(),
            candidates = stats.candidates,
            trimmed = stats.trimmed,
            failed = stats.failed,
            accepted = samples.len(),
            "face pass complete"
        );

        FacePass {
            face: self.surface.face(),
            samples,
            stats,
        }
    }
}
