pub mod polygon_2d;

/// 2D point type, used for `(u, v)` parameter pairs.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Tolerance for deciding whether a UV point lies on a trim boundary.
pub const BOUNDARY_TOLERANCE: f64 = 1e-9;
