use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum FlowError {
    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    #[error("unknown node '{0}'")]
    UnknownNode(String),

    #[error("no path from '{origin}' to '{destination}'")]
    NoFeasiblePaths { origin: String, destination: String },

    #[error("vehicle count must be positive and finite, got {0}")]
    InvalidVehicleCount(f64),

    #[error("{paths} paths but {flows} flows")]
    DimensionMismatch { paths: usize, flows: usize },

    #[error("optimization did not converge after {iterations} iterations (residual {residual:e})")]
    NotConverged { iterations: usize, residual: f64 },

    #[error("more than {limit} simple paths")]
    PathLimitExceeded { limit: usize },
}

pub type Result<T> = std::result::Result<T, FlowError>;
