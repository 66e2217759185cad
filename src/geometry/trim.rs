//! Trim loops and regions in surface parameter space.
//!
//! A face occupies the part of its parameter bounds that lies inside the
//! outer loop (when present) and outside every hole. Loop boundaries belong
//! to the face, so samples landing exactly on a trim curve are kept.

use std::f64::consts::TAU;

use crate::error::GeometryError;
use crate::math::polygon_2d::{self, PointLocation};
use crate::math::{Point2, BOUNDARY_TOLERANCE, TOLERANCE};

/// A closed polygonal loop in `(u, v)` space.
///
/// The closing edge from the last vertex back to the first is implicit.
#[derive(Debug, Clone, PartialEq)]
pub struct TrimLoop {
    points: Vec<Point2>,
}

impl TrimLoop {
    /// Creates a loop from its vertices.
    ///
    /// A repeated closing vertex is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if a vertex is not finite, fewer than three distinct
    /// vertices remain, or the loop encloses no area.
    pub fn new(mut points: Vec<Point2>) -> Result<Self, GeometryError> {
        if points.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
            return Err(GeometryError::Degenerate("trim loop points must be finite".into()));
        }
        if points.len() > 1 && (points[0] - points[points.len() - 1]).norm() < TOLERANCE {
            points.pop();
        }
        if points.len() < 3 {
            return Err(GeometryError::Degenerate(format!(
                "trim loop requires at least 3 points, got {}",
                points.len()
            )));
        }
        if polygon_2d::signed_area(&points).abs() < TOLERANCE {
            return Err(GeometryError::Degenerate("trim loop encloses no area".into()));
        }
        Ok(Self { points })
    }

    /// Axis-aligned rectangle with corners `min` and `max`.
    ///
    /// # Errors
    ///
    /// Returns an error if the rectangle has no area.
    pub fn rectangle(min: Point2, max: Point2) -> Result<Self, GeometryError> {
        Self::new(vec![
            min,
            Point2::new(max.x, min.y),
            max,
            Point2::new(min.x, max.y),
        ])
    }

    /// Regular polygon with `segments` vertices inscribed in a circle.
    ///
    /// # Errors
    ///
    /// Returns an error if `segments < 3` or the radius is not positive.
    pub fn circle(center: Point2, radius: f64, segments: usize) -> Result<Self, GeometryError> {
        if radius < TOLERANCE {
            return Err(GeometryError::Degenerate("trim circle radius must be positive".into()));
        }
        #[allow(clippy::cast_precision_loss)]
        let points = (0..segments)
            .map(|i| {
                let angle = TAU * i as f64 / segments as f64;
                Point2::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
            })
            .collect();
        Self::new(points)
    }

    /// Returns the loop vertices.
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Classifies `(u, v)` against this loop.
    #[must_use]
    pub fn locate(&self, u: f64, v: f64) -> PointLocation {
        polygon_2d::locate_point(&Point2::new(u, v), &self.points, BOUNDARY_TOLERANCE)
    }
}

/// The usable part of a face's parameter bounds.
///
/// An empty region (no outer loop, no holes) keeps the whole rectangle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrimRegion {
    outer: Option<TrimLoop>,
    holes: Vec<TrimLoop>,
}

impl TrimRegion {
    /// A region with no trimming.
    #[must_use]
    pub fn untrimmed() -> Self {
        Self::default()
    }

    /// A region bounded by `outer`.
    #[must_use]
    pub fn bounded_by(outer: TrimLoop) -> Self {
        Self {
            outer: Some(outer),
            holes: Vec::new(),
        }
    }

    /// Adds a hole.
    #[must_use]
    pub fn with_hole(mut self, hole: TrimLoop) -> Self {
        self.holes.push(hole);
        self
    }

    /// Returns the outer loop, if any.
    #[must_use]
    pub fn outer(&self) -> Option<&TrimLoop> {
        self.outer.as_ref()
    }

    /// Returns the hole loops.
    #[must_use]
    pub fn holes(&self) -> &[TrimLoop] {
        &self.holes
    }

    /// Returns `true` if no loops restrict the face.
    #[must_use]
    pub fn is_untrimmed(&self) -> bool {
        self.outer.is_none() && self.holes.is_empty()
    }

    /// Returns `true` if `(u, v)` is part of the face.
    ///
    /// Points on the outer loop or on a hole's boundary count as inside.
    #[must_use]
    pub fn contains(&self, u: f64, v: f64) -> bool {
        if let Some(outer) = &self.outer {
            if outer.locate(u, v) == PointLocation::Outside {
                return false;
            }
        }
        self.holes
            .iter()
            .all(|hole| hole.locate(u, v) != PointLocation::Inside)
    }
}
