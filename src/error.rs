use thiserror::Error;

/// Top-level error type for surface discretization.
#[derive(Debug, Error)]
pub enum SurfCloudError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Discretization(#[from] DiscretizationError),
}

/// Errors related to geometric computations.
///
/// During discretization these are per-sample failures: the offending
/// sample is skipped and the pass continues.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,

    #[error("surface evaluation is not finite at (u = {u}, v = {v})")]
    NonFinite { u: f64, v: f64 },
}

/// Errors related to the entity store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("no entity with sequence number {0}")]
    SequenceNumberNotFound(u32),

    #[error("invalid topology: {0}")]
    InvalidTopology(String),
}

/// Errors related to entity construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Errors reported by a discretization call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiscretizationError {
    #[error("step parameter {name} must be a positive finite number, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("{field} step is not a valid number: {text:?}")]
    InvalidNumberFormat { field: &'static str, text: String },

    #[error("entity cannot be discretized: {0}")]
    InvalidEntity(String),

    #[error(
        "no valid samples ({candidates} candidates, {trimmed} outside trim, {failed} failed evaluation)"
    )]
    NoValidSamples {
        candidates: usize,
        trimmed: usize,
        failed: usize,
    },

    #[error("discretization cancelled after {completed_faces} of {face_count} faces")]
    Cancelled {
        completed_faces: usize,
        face_count: usize,
    },
}

/// Convenience type alias for results using [`SurfCloudError`].
pub type Result<T> = std::result::Result<T, SurfCloudError>;
