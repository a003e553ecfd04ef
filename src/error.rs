//! Error types for crystal generation and mesh host operations

use thiserror::Error;

/// Failures reported by a [`MeshHost`](crate::host::MeshHost)
///
/// Any of these aborts the build of the individual that triggered it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
    /// No object with this id exists in the host
    #[error("object not found: {0}")]
    ObjectNotFound(String),

    /// The operation needs the object to be in another edit mode
    #[error("object {object} must be in {expected} mode")]
    WrongMode { object: String, expected: &'static str },

    /// Bisect was requested without any selected geometry
    #[error("no geometry selected on object {0}")]
    NothingSelected(String),

    /// Rotation axis index outside 0..3
    #[error("invalid rotation axis index: {0}")]
    InvalidAxis(usize),

    /// A numeric argument was rejected (non-finite, zero size, ...)
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Errors that can occur while building or describing crystals
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CrystalError {
    /// A cut plane normal had zero (or non-finite) magnitude
    #[error("degenerate cut plane for cut {cut} of object {object}")]
    DegeneratePlane { object: String, cut: usize },

    /// The mesh host rejected an operation
    #[error("host operation failed: {0}")]
    Host(#[from] HostError),

    /// Text could not be parsed as a genotype
    #[error("invalid genotype: {0}")]
    InvalidGenotype(String),

    /// Builder configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Fitness outside [0, 1]
    #[error("fitness must lie in [0, 1] (got {0})")]
    InvalidFitness(f64),
}

/// Result type alias for crystal operations
pub type Result<T> = std::result::Result<T, CrystalError>;

/// Result type alias for host operations
pub type HostResult<T> = std::result::Result<T, HostError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_error_converts() {
        let err: CrystalError = HostError::ObjectNotFound("Crystal3".into()).into();
        assert_eq!(
            err.to_string(),
            "host operation failed: object not found: Crystal3"
        );
    }

    #[test]
    fn test_degenerate_plane_message() {
        let err = CrystalError::DegeneratePlane {
            object: "Crystal0".into(),
            cut: 4,
        };
        assert_eq!(err.to_string(), "degenerate cut plane for cut 4 of object Crystal0");
    }
}
