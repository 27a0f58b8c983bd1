//! Error types for the toolpath synthesis engine.
//!
//! Every variant is fatal to the run that raised it: the partially built
//! motion table is discarded and nothing is written. The only locally
//! recovered condition (an intersection miss during synchronisation) is
//! reported through warnings and counters instead.

use std::io;
use thiserror::Error;
use wirekit_core::GeometryError;
use wirekit_settings::SettingsError;

/// Errors that can occur while synthesising or writing a wire-cut program.
#[derive(Error, Debug)]
pub enum ToolpathError {
    /// The wire direction is zero or parallel to the cut-plane normal.
    #[error("Degenerate orientation vector: {0}")]
    DegenerateVector(String),

    /// None of the quadrant identities matched.
    #[error(
        "Could not resolve wire angle (x: {horizontal:.6}°, y: {vertical:.6}°, tolerance {tolerance}°)"
    )]
    AngleResolution {
        horizontal: f64,
        vertical: f64,
        tolerance: f64,
    },

    /// The far curve overlaps the cross-sectional plane.
    #[error("Unsupported intersection: {0}")]
    UnsupportedIntersection(String),

    /// A required configuration or job field is absent.
    #[error("Missing required input field: {0}")]
    MissingInputField(String),

    /// The requested feature is not implemented.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Invalid parameters were provided.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Input geometry could not be built.
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// Configuration could not be loaded or validated.
    #[error("Settings error: {0}")]
    Settings(SettingsError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<SettingsError> for ToolpathError {
    fn from(err: SettingsError) -> Self {
        match err.missing_key() {
            Some(key) => Self::MissingInputField(key.to_string()),
            None => Self::Settings(err),
        }
    }
}

/// Result type alias for toolpath operations.
pub type ToolpathResult<T> = Result<T, ToolpathError>;

#[cfg(test)]
mod tests {
    use super::*;
    use wirekit_settings::ConfigError;

    #[test]
    fn test_toolpath_error_display() {
        let err = ToolpathError::DegenerateVector("parallel to plane normal".to_string());
        assert_eq!(
            err.to_string(),
            "Degenerate orientation vector: parallel to plane normal"
        );

        let err = ToolpathError::MissingInputField("curve_b".to_string());
        assert_eq!(err.to_string(), "Missing required input field: curve_b");

        let err = ToolpathError::UnsupportedOperation("curve extension".to_string());
        assert_eq!(err.to_string(), "Unsupported operation: curve extension");
    }

    #[test]
    fn test_missing_settings_key_becomes_missing_field() {
        let settings_err: SettingsError = ConfigError::MissingKey("header".to_string()).into();
        let err: ToolpathError = settings_err.into();
        assert!(matches!(err, ToolpathError::MissingInputField(ref key) if key == "header"));

        let settings_err = SettingsError::invalid("tolerance", "must be > 0");
        let err: ToolpathError = settings_err.into();
        assert!(matches!(err, ToolpathError::Settings(_)));
    }

    #[test]
    fn test_geometry_error_conversion() {
        let err: ToolpathError = GeometryError::TooFewPoints { count: 0 }.into();
        assert!(matches!(err, ToolpathError::Geometry(_)));
    }
}
