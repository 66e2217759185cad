use std::iter::FusedIterator;

use crate::error::DiscretizationError;
use crate::geometry::surface::SurfaceDomain;
use crate::math::TOLERANCE;

use super::{AxisSpacing, StepParameters};

/// Relative slack on `span / step` so exact divisions such as `10 / 0.1`
/// do not round up to an extra interval.
const RATIO_TOLERANCE: f64 = 1e-9;

/// Upper bound on intervals per axis.
const MAX_INTERVALS: f64 = 1e8;

/// Upper bound on grid pairs per face.
const MAX_CANDIDATES: usize = 100_000_000;

/// The values sampled along one parameter axis.
///
/// Both ends of the range are always included. A degenerate range yields a
/// single value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisValues {
    min: f64,
    max: f64,
    step: f64,
    intervals: usize,
    spacing: AxisSpacing,
}

impl AxisValues {
    /// Partitions `[min, max]` with the given step.
    ///
    /// # Errors
    ///
    /// Returns [`DiscretizationError::InvalidParameter`] if the step is so
    /// small relative to the range that the axis would need more than
    /// `1e8` intervals.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn new(
        name: &'static str,
        min: f64,
        max: f64,
        step: f64,
        spacing: AxisSpacing,
    ) -> Result<Self, DiscretizationError> {
        let span = max - min;
        let intervals = if span <= TOLERANCE {
            0
        } else {
            let ratio = span / step;
            let intervals = (ratio - RATIO_TOLERANCE * ratio).ceil().max(1.0);
            if !intervals.is_finite() || intervals > MAX_INTERVALS {
                return Err(DiscretizationError::InvalidParameter { name, value: step });
            }
            intervals as usize
        };
        Ok(Self {
            min,
            max,
            step,
            intervals,
            spacing,
        })
    }

    /// Number of values on this axis.
    #[must_use]
    pub fn len(&self) -> usize {
        self.intervals + 1
    }

    /// Always `false`; an axis has at least one value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The `i`-th value. The last index maps exactly to the range end.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn value(&self, i: usize) -> f64 {
        if i == 0 {
            return self.min;
        }
        if i >= self.intervals {
            return self.max;
        }
        match self.spacing {
            AxisSpacing::Uniform => {
                self.min + (self.max - self.min) * i as f64 / self.intervals as f64
            }
            AxisSpacing::Clamped => (self.min + self.step * i as f64).min(self.max),
        }
    }

    /// All values in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).map(|i| self.value(i))
    }
}

/// Generates the parameter pairs to evaluate for one face.
///
/// The full grid is the row-major cross product of the U values and the V
/// values: `(u0, v0), (u0, v1), ..., (u0, vN), (u1, v0), ...`. Iterators are
/// created fresh on every call, so the sequence can be replayed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampler {
    u: AxisValues,
    v: AxisValues,
}

impl Sampler {
    /// Creates a sampler over `domain`.
    ///
    /// # Errors
    ///
    /// Returns [`DiscretizationError::InvalidParameter`] if a step is too
    /// small for its axis, or the grid would exceed `1e8` pairs. In the
    /// latter case the step of the denser axis is reported.
    pub fn new(
        domain: &SurfaceDomain,
        steps: StepParameters,
        spacing: AxisSpacing,
    ) -> Result<Self, DiscretizationError> {
        let u = AxisValues::new("du", domain.u_min, domain.u_max, steps.du(), spacing)?;
        let v = AxisValues::new("dv", domain.v_min, domain.v_max, steps.dv(), spacing)?;
        match u.len().checked_mul(v.len()) {
            Some(total) if total <= MAX_CANDIDATES => Ok(Self { u, v }),
            _ if u.len() >= v.len() => Err(DiscretizationError::InvalidParameter {
                name: "du",
                value: steps.du(),
            }),
            _ => Err(DiscretizationError::InvalidParameter {
                name: "dv",
                value: steps.dv(),
            }),
        }
    }

    /// Values along U.
    #[must_use]
    pub fn u_values(&self) -> &AxisValues {
        &self.u
    }

    /// Values along V.
    #[must_use]
    pub fn v_values(&self) -> &AxisValues {
        &self.v
    }

    /// Number of grid pairs before trimming.
    #[must_use]
    pub fn candidate_count(&self) -> usize {
        self.u.len() * self.v.len()
    }

    /// Every grid pair in row-major order.
    #[must_use]
    pub fn candidates(&self) -> Candidates {
        Candidates {
            u: self.u,
            v: self.v,
            next: 0,
            total: self.candidate_count(),
        }
    }

    /// Grid pairs for which `inside` holds; rejected pairs are counted.
    pub fn accepted<F>(&self, inside: F) -> Accepted<F>
    where
        F: Fn(f64, f64) -> bool,
    {
        Accepted {
            candidates: self.candidates(),
            inside,
            rejected: 0,
        }
    }
}

/// Lazy iterator over the full parameter grid.
#[derive(Debug, Clone)]
pub struct Candidates {
    u: AxisValues,
    v: AxisValues,
    next: usize,
    total: usize,
}

impl Iterator for Candidates {
    type Item = (f64, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.total {
            return None;
        }
        let row = self.next / self.v.len();
        let col = self.next % self.v.len();
        self.next += 1;
        Some((self.u.value(row), self.v.value(col)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Candidates {}
impl FusedIterator for Candidates {}

/// Lazy iterator over the grid pairs that pass a trim predicate.
pub struct Accepted<F> {
    candidates: Candidates,
    inside: F,
    rejected: usize,
}

impl<F> Accepted<F> {
    /// Pairs rejected so far.
    #[must_use]
    pub fn rejected(&self) -> usize {
        self.rejected
    }
}

impl<F> Iterator for Accepted<F>
where
    F: Fn(f64, f64) -> bool,
{
    type Item = (f64, f64);

    fn next(&mut self) -> Option<Self::Item> {
        for (u, v) in self.candidates.by_ref() {
            if (self.inside)(u, v) {
                return Some((u, v));
            }
            self.rejected += 1;
        }
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sampler(domain: SurfaceDomain, du: f64, dv: f64, spacing: AxisSpacing) -> Sampler {
        Sampler::new(&domain, StepParameters::new(du, dv).unwrap(), spacing).unwrap()
    }

    #[test]
    fn even_division_counts() {
        let domain = SurfaceDomain::new(0.0, 10.0, 0.0, 5.0);
        for &(du, dv) in &[(1.0, 1.0), (2.0, 0.5), (0.1, 0.25), (5.0, 5.0), (2.5, 1.25)] {
            let s = sampler(domain, du, dv, AxisSpacing::Uniform);
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let expected = ((10.0 / du).floor() as usize + 1) * ((5.0 / dv).floor() as usize + 1);
            assert_eq!(s.candidate_count(), expected, "du={du}, dv={dv}");
            assert_eq!(s.candidates().count(), expected);
        }
    }

    #[test]
    fn boundaries_always_sampled() {
        let domain = SurfaceDomain::new(0.0, 10.0, 0.0, 5.0);
        for spacing in [AxisSpacing::Uniform, AxisSpacing::Clamped] {
            for &(du, dv) in &[(3.0, 0.7), (0.3, 4.9), (100.0, 100.0)] {
                let s = sampler(domain, du, dv, spacing);
                let us: Vec<f64> = s.u_values().iter().collect();
                let vs: Vec<f64> = s.v_values().iter().collect();
                assert_eq!(us.first().copied(), Some(0.0));
                assert_eq!(us.last().copied(), Some(10.0));
                assert_eq!(vs.first().copied(), Some(0.0));
                assert_eq!(vs.last().copied(), Some(5.0));
                assert!(us.windows(2).all(|w| w[1] > w[0]));
                assert!(us.windows(2).all(|w| w[1] - w[0] <= du + 1e-12));
            }
        }
    }

    #[test]
    fn step_larger_than_span_gives_both_ends() {
        let s = sampler(SurfaceDomain::new(0.0, 1.0, 0.0, 1.0), 7.0, 3.0, AxisSpacing::Uniform);
        let pairs: Vec<_> = s.candidates().collect();
        assert_eq!(pairs, vec![(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (1.0, 1.0)]);
    }

    #[test]
    fn row_major_order() {
        let s = sampler(SurfaceDomain::new(0.0, 1.0, 0.0, 1.0), 0.5, 0.5, AxisSpacing::Uniform);
        let pairs: Vec<_> = s.candidates().collect();
        assert_eq!(
            pairs,
            vec![
                (0.0, 0.0),
                (0.0, 0.5),
                (0.0, 1.0),
                (0.5, 0.0),
                (0.5, 0.5),
                (0.5, 1.0),
                (1.0, 0.0),
                (1.0, 0.5),
                (1.0, 1.0),
            ]
        );
    }

    #[test]
    fn clamped_spacing_keeps_step() {
        let s = sampler(SurfaceDomain::new(0.0, 10.0, 0.0, 1.0), 3.0, 1.0, AxisSpacing::Clamped);
        let us: Vec<f64> = s.u_values().iter().collect();
        assert_eq!(us, vec![0.0, 3.0, 6.0, 9.0, 10.0]);
    }

    #[test]
    fn uniform_spacing_spreads_evenly() {
        let s = sampler(SurfaceDomain::new(0.0, 10.0, 0.0, 1.0), 3.0, 1.0, AxisSpacing::Uniform);
        let us: Vec<f64> = s.u_values().iter().collect();
        assert_eq!(us, vec![0.0, 2.5, 5.0, 7.5, 10.0]);
    }

    #[test]
    fn degenerate_axis_samples_once() {
        let s = sampler(SurfaceDomain::new(2.0, 2.0, 0.0, 1.0), 0.1, 0.5, AxisSpacing::Uniform);
        assert_eq!(s.u_values().len(), 1);
        let pairs: Vec<_> = s.candidates().collect();
        assert_eq!(pairs, vec![(2.0, 0.0), (2.0, 0.5), (2.0, 1.0)]);
    }

    #[test]
    fn replay_is_identical() {
        let s = sampler(SurfaceDomain::new(-1.0, 3.0, 0.5, 2.0), 0.37, 0.11, AxisSpacing::Uniform);
        let first: Vec<_> = s.candidates().collect();
        let second: Vec<_> = s.candidates().collect();
        assert_eq!(first, second);
        assert_eq!(s.candidates().len(), first.len());
    }

    #[test]
    fn accepted_counts_rejections() {
        let s = sampler(SurfaceDomain::new(0.0, 1.0, 0.0, 1.0), 0.5, 0.5, AxisSpacing::Uniform);
        let mut accepted = s.accepted(|u, v| u + v <= 1.0);
        let kept: Vec<_> = accepted.by_ref().collect();
        assert_eq!(kept.len(), 6);
        assert_eq!(accepted.rejected(), 3);
    }

    #[test]
    fn absurdly_small_step_is_rejected() {
        let r = Sampler::new(
            &SurfaceDomain::new(0.0, 1.0, 0.0, 1.0),
            StepParameters::new(1e-12, 0.5).unwrap(),
            AxisSpacing::Uniform,
        );
        assert!(matches!(
            r,
            Err(DiscretizationError::InvalidParameter { name: "du", .. })
        ));
    }

    #[test]
    fn oversized_grid_is_rejected() {
        // Each axis alone is acceptable; their product is not.
        let domain = SurfaceDomain::new(0.0, 1.0, 0.0, 1.0);
        assert!(AxisValues::new("du", 0.0, 1.0, 1e-5, AxisSpacing::Uniform).is_ok());
        let r = Sampler::new(
            &domain,
            StepParameters::new(1e-5, 2e-5).unwrap(),
            AxisSpacing::Uniform,
        );
        assert_eq!(
            r,
            Err(DiscretizationError::InvalidParameter { name: "du", value: 1e-5 })
        );

        let fine_v = Sampler::new(
            &domain,
            StepParameters::new(1e-3, 1e-7).unwrap(),
            AxisSpacing::Uniform,
        );
        assert!(matches!(
            fine_v,
            Err(DiscretizationError::InvalidParameter { name: "dv", .. })
        ));
    }
}
