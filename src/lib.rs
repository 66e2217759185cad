pub mod discretize;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod session;
pub mod topology;

pub use discretize::discretize;
pub use error::{Result, SurfCloudError};
