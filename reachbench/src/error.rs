//! Error types shared by every reachbench module.

use std::fmt;

use thiserror::Error;

/// Errors raised by graph construction, generation, traversal and the
/// experiment harness. All of them are input-validation failures detected at
/// the offending call and are never retried.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReachError {
    /// The vertex count cannot describe a valid graph for the request.
    #[error("invalid vertex count {n}: {reason}")]
    InvalidSize {
        /// Requested vertex count.
        n: usize,
        /// Why the count was rejected.
        reason: &'static str,
    },
    /// Density percentage outside `0..=100`.
    #[error("density {density}% is outside 0..=100")]
    InvalidDensity {
        /// Requested density in percent.
        density: u32,
    },
    /// A vertex index was not in `0..n`.
    #[error("vertex {index} is out of range for a graph with {n} vertices")]
    IndexOutOfRange {
        /// Offending vertex index.
        index: usize,
        /// Vertex count of the graph.
        n: usize,
    },
    /// Experiment configuration failed validation.
    #[error("invalid experiment configuration: {0}")]
    InvalidConfig(String),
    /// The worker pool for a reachability batch could not be created.
    #[error("failed to build worker pool: {source}")]
    WorkerPool {
        /// Error raised by rayon.
        #[source]
        source: rayon::ThreadPoolBuildError,
    },
    /// Writing results failed.
    #[error("failed to write results: {0}")]
    Io(#[from] std::io::Error),
    /// Serialising a record failed.
    #[error("failed to serialise record: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ReachError {
    /// Returns a stable, machine-readable error code for the variant.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidSize { .. } => ErrorCode::InvalidSize,
            Self::InvalidDensity { .. } => ErrorCode::InvalidDensity,
            Self::IndexOutOfRange { .. } => ErrorCode::IndexOutOfRange,
            Self::InvalidConfig(_) => ErrorCode::InvalidConfig,
            Self::WorkerPool { .. } => ErrorCode::WorkerPool,
            Self::Io(_) => ErrorCode::Io,
            Self::Serialize(_) => ErrorCode::Serialize,
        }
    }
}

/// Machine-readable codes for [`ReachError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorCode {
    InvalidSize,
    InvalidDensity,
    IndexOutOfRange,
    InvalidConfig,
    WorkerPool,
    Io,
    Serialize,
}

impl ErrorCode {
    /// Returns the symbolic identifier used in log events.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidSize => "INVALID_SIZE",
            Self::InvalidDensity => "INVALID_DENSITY",
            Self::IndexOutOfRange => "INDEX_OUT_OF_RANGE",
            Self::InvalidConfig => "INVALID_CONFIG",
            Self::WorkerPool => "WORKER_POOL",
            Self::Io => "IO",
            Self::Serialize => "SERIALIZE",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ReachError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ReachError::InvalidSize { n: 1, reason: "x" }, "INVALID_SIZE")]
    #[case(ReachError::InvalidDensity { density: 101 }, "INVALID_DENSITY")]
    #[case(ReachError::IndexOutOfRange { index: 4, n: 4 }, "INDEX_OUT_OF_RANGE")]
    #[case(ReachError::InvalidConfig("empty".into()), "INVALID_CONFIG")]
    fn codes_are_stable(#[case] err: ReachError, #[case] expected: &str) {
        assert_eq!(err.code().as_str(), expected);
        assert_eq!(err.code().to_string(), expected);
    }

    #[test]
    fn messages_name_the_offending_value() {
        let err = ReachError::IndexOutOfRange { index: 7, n: 3 };
        assert_eq!(
            err.to_string(),
            "vertex 7 is out of range for a graph with 3 vertices"
        );
        let err = ReachError::InvalidDensity { density: 150 };
        assert_eq!(err.to_string(), "density 150% is outside 0..=100");
    }
}
