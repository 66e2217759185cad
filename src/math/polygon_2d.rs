use super::{Point2, TOLERANCE};

/// Position of a point relative to a closed polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointLocation {
    /// Strictly inside.
    Inside,
    /// Within the boundary tolerance of an edge.
    OnBoundary,
    /// Strictly outside.
    Outside,
}

/// Computes the signed area of a closed polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Returns the minimum distance from `p` to the segment `a`-`b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq < TOLERANCE * TOLERANCE {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).norm()
}

/// Classifies `p` against the closed polygon `points` (implicitly closed,
/// the last vertex connects back to the first).
///
/// Points within `boundary_tol` of any edge are reported as
/// [`PointLocation::OnBoundary`]; otherwise the crossing-number rule decides.
#[must_use]
pub fn locate_point(p: &Point2, points: &[Point2], boundary_tol: f64) -> PointLocation {
    let n = points.len();
    if n < 3 {
        return PointLocation::Outside;
    }

    let mut inside = false;
    for i in 0..n {
        let a = &points[i];
        let b = &points[(i + 1) % n];
        if point_to_segment_dist(p, a, b) <= boundary_tol {
            return PointLocation::OnBoundary;
        }
        // Half-open rule on y so shared vertices are counted once.
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x_cross {
                inside = !inside;
            }
        }
    }

    if inside {
        PointLocation::Inside
    } else {
        PointLocation::Outside
    }
}
