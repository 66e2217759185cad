use crate::error::GeometryError;
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{unit, Surface, SurfaceDomain};

/// A rational B-spline (NURBS) surface, the general free-form surface of
/// exchange files.
///
/// Control points form a grid of `count_u x count_v` entries stored row by
/// row (`index = i * count_v + j`, `i` along U). The parameter domain is
/// `[knots_u[p], knots_u[count_u]] x [knots_v[q], knots_v[count_v]]`.
#[derive(Debug, Clone)]
pub struct NurbsSurface {
    degree_u: usize,
    degree_v: usize,
    knots_u: Vec<f64>,
    knots_v: Vec<f64>,
    count_u: usize,
    count_v: usize,
    control_points: Vec<Point3>,
    weights: Vec<f64>,
}

impl NurbsSurface {
    /// Creates a non-rational B-spline surface (all weights 1).
    ///
    /// `control_points[i][j]` is the control point at row `i` (U) and
    /// column `j` (V).
    ///
    /// # Errors
    ///
    /// Returns an error if a degree is zero, the grid is ragged or too small
    /// for its degree, or a knot vector has the wrong length, decreases, or
    /// spans an empty domain.
    pub fn new(
        degree_u: usize,
        degree_v: usize,
        knots_u: Vec<f64>,
        knots_v: Vec<f64>,
        control_points: Vec<Vec<Point3>>,
    ) -> Result<Self, GeometryError> {
        let count_u = control_points.len();
        let count_v = control_points.first().map_or(0, Vec::len);
        if control_points.iter().any(|row| row.len() != count_v) {
            return Err(GeometryError::Degenerate(
                "control point rows have different lengths".into(),
            ));
        }
        check_knots("u", degree_u, count_u, &knots_u)?;
        check_knots("v", degree_v, count_v, &knots_v)?;

        Ok(Self {
            degree_u,
            degree_v,
            knots_u,
            knots_v,
            count_u,
            count_v,
            control_points: control_points.into_iter().flatten().collect(),
            weights: vec![1.0; count_u * count_v],
        })
    }

    /// Replaces the weights, making the surface rational.
    ///
    /// # Errors
    ///
    /// Returns an error if the weight grid does not match the control grid
    /// or any weight is not strictly positive.
    pub fn with_weights(mut self, weights: Vec<Vec<f64>>) -> Result<Self, GeometryError> {
        if weights.len() != self.count_u || weights.iter().any(|row| row.len() != self.count_v) {
            return Err(GeometryError::Degenerate(
                "weight grid does not match control point grid".into(),
            ));
        }
        if weights.iter().flatten().any(|&w| !(w > TOLERANCE && w.is_finite())) {
            return Err(GeometryError::Degenerate("weights must be positive".into()));
        }
        self.weights = weights.into_iter().flatten().collect();
        Ok(self)
    }

    /// Evaluates the point and both first partial derivatives at `(u, v)`.
    fn point_and_partials(
        &self,
        u: f64,
        v: f64,
    ) -> Result<(Point3, Vector3, Vector3), GeometryError> {
        let domain = self.domain();
        let u = clamp_parameter("u", u, domain.u_min, domain.u_max)?;
        let v = clamp_parameter("v", v, domain.v_min, domain.v_max)?;

        let span_u = find_span(&self.knots_u, self.degree_u, self.count_u, u);
        let span_v = find_span(&self.knots_v, self.degree_v, self.count_v, v);
        let (nu, dnu) = basis_with_derivative(&self.knots_u, self.degree_u, span_u, u);
        let (nv, dnv) = basis_with_derivative(&self.knots_v, self.degree_v, span_v, v);

        // Homogeneous sums: A = sum(N w P), W = sum(N w), plus their partials.
        let mut a = Vector3::zeros();
        let mut a_u = Vector3::zeros();
        let mut a_v = Vector3::zeros();
        let (mut w, mut w_u, mut w_v) = (0.0, 0.0, 0.0);

        for (k, i) in (span_u - self.degree_u..=span_u).enumerate() {
            for (l, j) in (span_v - self.degree_v..=span_v).enumerate() {
                let idx = i * self.count_v + j;
                let weight = self.weights[idx];
                let wp = self.control_points[idx].coords * weight;
                let b = nu[k] * nv[l];
                let b_u = dnu[k] * nv[l];
                let b_v = nu[k] * dnv[l];
                a += wp * b;
                a_u += wp * b_u;
                a_v += wp * b_v;
                w += weight * b;
                w_u += weight * b_u;
                w_v += weight * b_v;
            }
        }

        if w.abs() < TOLERANCE {
            return Err(GeometryError::Degenerate("rational weight sum vanishes".into()));
        }
        let s = a / w;
        let s_u = (a_u - s * w_u) / w;
        let s_v = (a_v - s * w_v) / w;

        if !(s.iter().all(|c| c.is_finite())
            && s_u.iter().all(|c| c.is_finite())
            && s_v.iter().all(|c| c.is_finite()))
        {
            return Err(GeometryError::NonFinite { u, v });
        }
        Ok((Point3::from(s), s_u, s_v))
    }
}

impl Surface for NurbsSurface {
    fn evaluate(&self, u: f64, v: f64) -> Result<Point3, GeometryError> {
        self.point_and_partials(u, v).map(|(p, _, _)| p)
    }

    fn normal(&self, u: f64, v: f64) -> Result<Vector3, GeometryError> {
        let (_, s_u, s_v) = self.point_and_partials(u, v)?;
        unit(s_u.cross(&s_v))
    }

    fn domain(&self) -> SurfaceDomain {
        SurfaceDomain::new(
            self.knots_u[self.degree_u],
            self.knots_u[self.count_u],
            self.knots_v[self.degree_v],
            self.knots_v[self.count_v],
        )
    }
}

fn check_knots(
    direction: &str,
    degree: usize,
    count: usize,
    knots: &[f64],
) -> Result<(), GeometryError> {
    if degree == 0 {
        return Err(GeometryError::Degenerate(format!(
            "{direction} degree must be at least 1"
        )));
    }
    if count <= degree {
        return Err(GeometryError::Degenerate(format!(
            "{direction} direction needs more than {degree} control points, got {count}"
        )));
    }
    if knots.len() != count + degree + 1 {
        return Err(GeometryError::Degenerate(format!(
            "{direction} knot vector must have {} entries, got {}",
            count + degree + 1,
            knots.len()
        )));
    }
    if knots.iter().any(|k| !k.is_finite()) || knots.windows(2).any(|w| w[1] < w[0]) {
        return Err(GeometryError::Degenerate(format!(
            "{direction} knot vector must be finite and non-decreasing"
        )));
    }
    if knots[count] - knots[degree] < TOLERANCE {
        return Err(GeometryError::Degenerate(format!(
            "{direction} knot vector spans an empty domain"
        )));
    }
    Ok(())
}

/// Pulls `t` onto `[min, max]` when it is within tolerance, rejects it otherwise.
fn clamp_parameter(
    parameter: &'static str,
    t: f64,
    min: f64,
    max: f64,
) -> Result<f64, GeometryError> {
    let tol = TOLERANCE * (max - min).abs().max(1.0);
    if !t.is_finite() || t < min - tol || t > max + tol {
        return Err(GeometryError::ParameterOutOfRange {
            parameter,
            value: t,
            min,
            max,
        });
    }
    Ok(t.clamp(min, max))
}

/// Index `s` of the knot span `[knots[s], knots[s + 1])` containing `t`.
///
/// The end of the domain maps to the last non-empty span.
fn find_span(knots: &[f64], degree: usize, count: usize, t: f64) -> usize {
    let last = count - 1;
    if t >= knots[last + 1] {
        let mut span = last;
        while span > degree && knots[span] >= knots[span + 1] {
            span -= 1;
        }
        return span;
    }
    if t <= knots[degree] {
        let mut span = degree;
        while span < last && knots[span + 1] <= knots[span] {
            span += 1;
        }
        return span;
    }

    let mut low = degree;
    let mut high = last + 1;
    let mut mid = (low + high) / 2;
    while t < knots[mid] || t >= knots[mid + 1] {
        if t < knots[mid] {
            high = mid;
        } else {
            low = mid;
        }
        mid = (low + high) / 2;
    }
    mid
}

/// Non-zero basis functions `N[span - degree ..= span]` at `t` and their
/// first derivatives (Cox-de Boor triangle).
fn basis_with_derivative(
    knots: &[f64],
    degree: usize,
    span: usize,
    t: f64,
) -> (Vec<f64>, Vec<f64>) {
    let p = degree;
    // Upper triangle holds basis values, lower triangle holds knot differences.
    let mut ndu = vec![vec![0.0; p + 1]; p + 1];
    let mut left = vec![0.0; p + 1];
    let mut right = vec![0.0; p + 1];
    ndu[0][0] = 1.0;

    for j in 1..=p {
        left[j] = t - knots[span + 1 - j];
        right[j] = knots[span + j] - t;
        let mut saved = 0.0;
        for r in 0..j {
            ndu[j][r] = right[r + 1] + left[j - r];
            let temp = ndu[r][j - 1] / ndu[j][r];
            ndu[r][j] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        ndu[j][j] = saved;
    }

    let values = (0..=p).map(|r| ndu[r][p]).collect();

    #[allow(clippy::cast_precision_loss)]
    let scale = p as f64;
    let derivatives = (0..=p)
        .map(|r| {
            let mut d = 0.0;
            if r >= 1 {
                d += ndu[r - 1][p - 1] / ndu[p][r - 1];
            }
            if r < p {
                d -= ndu[r][p - 1] / ndu[p][r];
            }
            d * scale
        })
        .collect();

    (values, derivatives)
}
