//! Error handling for WireKit core types
//!
//! Geometry construction and data model errors. The synthesis engine has its
//! own taxonomy in `wirekit-camtools`; these are the lower-level failures it
//! wraps when building planes and polylines.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
///
/// Raised when primitive geometry cannot be constructed from the supplied values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A direction vector has zero (or near-zero) length
    #[error("Zero-length vector: {context}")]
    ZeroLength {
        /// Where the vector came from.
        context: String,
    },

    /// Plane axes are parallel, so no normal can be formed
    #[error("Plane axes are parallel")]
    ParallelAxes,

    /// A coordinate is NaN or infinite
    #[error("Non-finite coordinate at index {index}")]
    NonFinite {
        /// Index of the offending point.
        index: usize,
    },

    /// A polyline needs at least two points
    #[error("Polyline needs at least 2 points, got {count}")]
    TooFewPoints {
        /// Number of points supplied.
        count: usize,
    },
}
