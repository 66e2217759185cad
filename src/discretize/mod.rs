mod discretize_entity;
mod discretize_face;
mod evaluator;
mod parametric;
mod sampler;

pub use discretize_entity::{discretize, DiscretizeEntity, FaceProgress};
pub use discretize_face::DiscretizeFace;
pub use evaluator::Evaluator;
pub use parametric::ParametricSurface;
pub use sampler::{Accepted, AxisValues, Candidates, Sampler};

use std::ops::Range;

use crate::error::DiscretizationError;
use crate::math::{Point2, Point3, Vector3};
use crate::topology::FaceId;

/// Step sizes along U and V, both finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepParameters {
    du: f64,
    dv: f64,
}

impl StepParameters {
    /// Validates and wraps a pair of step sizes.
    ///
    /// # Errors
    ///
    /// Returns [`DiscretizationError::InvalidParameter`] if either step is
    /// not a finite number greater than zero.
    pub fn new(du: f64, dv: f64) -> Result<Self, DiscretizationError> {
        check_step("du", du)?;
        check_step("dv", dv)?;
        Ok(Self { du, dv })
    }

    /// Step along U.
    #[must_use]
    pub fn du(&self) -> f64 {
        self.du
    }

    /// Step along V.
    #[must_use]
    pub fn dv(&self) -> f64 {
        self.dv
    }
}

fn check_step(name: &'static str, value: f64) -> Result<(), DiscretizationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DiscretizationError::InvalidParameter { name, value })
    }
}

/// How parameter values are placed along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisSpacing {
    /// `ceil(span / step)` equal intervals; spacing never exceeds the step.
    #[default]
    Uniform,
    /// Exact multiples of the step from the start, with the last value
    /// clamped to the end of the range.
    Clamped,
}

/// Which way emitted normals point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalOrientation {
    /// Flip normals of reversed faces so they point away from material.
    #[default]
    FaceOriented,
    /// Report the carrier surface's own normal, ignoring face orientation.
    SurfaceNative,
}

/// Options controlling a discretization pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscretizeOptions {
    /// Placement of values along each axis.
    pub spacing: AxisSpacing,
    /// Normal orientation policy.
    pub normals: NormalOrientation,
    /// Fail the whole call if any single face yields no samples.
    pub require_every_face: bool,
}

/// One accepted sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    /// Parameter pair the sample was taken at.
    pub uv: Point2,
    /// Position on the surface.
    pub point: Point3,
    /// Unit normal, oriented per [`NormalOrientation`].
    pub normal: Vector3,
}

/// Counters for one or more face passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleStats {
    /// Grid pairs generated.
    pub candidates: usize,
    /// Pairs rejected by the trim test.
    pub trimmed: usize,
    /// Pairs whose evaluation failed.
    pub failed: usize,
}

impl SampleStats {
    /// Pairs that produced a sample.
    #[must_use]
    pub fn accepted(&self) -> usize {
        self.candidates - self.trimmed - self.failed
    }

    /// Adds another set of counters into this one.
    pub fn absorb(&mut self, other: &SampleStats) {
        self.candidates += other.candidates;
        self.trimmed += other.trimmed;
        self.failed += other.failed;
    }

    pub(crate) fn no_valid_samples(&self) -> DiscretizationError {
        DiscretizationError::NoValidSamples {
            candidates: self.candidates,
            trimmed: self.trimmed,
            failed: self.failed,
        }
    }
}

/// Result of sampling a single face.
#[derive(Debug, Clone, PartialEq)]
pub struct FacePass {
    /// The face that was sampled.
    pub face: FaceId,
    /// Accepted samples in generation order.
    pub samples: Vec<SamplePoint>,
    /// Pass counters.
    pub stats: SampleStats,
}

/// Aggregated result of discretizing an entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Discretization {
    /// All samples, face by face, in generation order.
    pub samples: Vec<SamplePoint>,
    /// Each face with the range of `samples` it produced.
    pub faces: Vec<(FaceId, Range<usize>)>,
    /// Counters summed over all faces.
    pub stats: SampleStats,
}

impl Discretization {
    /// Concatenates face passes in the given order.
    #[must_use]
    pub fn from_passes(passes: Vec<FacePass>) -> Self {
        let mut out = Self::default();
        for pass in passes {
            let start = out.samples.len();
            out.samples.extend(pass.samples);
            out.faces.push((pass.face, start..out.samples.len()));
            out.stats.absorb(&pass.stats);
        }
        out
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if there are no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample positions.
    pub fn points(&self) -> impl Iterator<Item = Point3> + '_ {
        self.samples.iter().map(|s| s.point)
    }

    /// Sample normals.
    pub fn normals(&self) -> impl Iterator<Item = Vector3> + '_ {
        self.samples.iter().map(|s| s.normal)
    }

    /// Splits into parallel point and normal lists.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Point3>, Vec<Vector3>) {
        self.samples.into_iter().map(|s| (s.point, s.normal)).unzip()
    }
}
