//! Error types shared by all spectral crates.

use thiserror::Error;

/// Result type alias using SpectralError.
pub type SpectralResult<T> = Result<T, SpectralError>;

/// Primary error type for spectral data operations.
///
/// All errors are fail-fast: they surface to the immediate caller with no
/// retry, no partial-success state, and no silent coercion.
#[derive(Debug, Error)]
pub enum SpectralError {
    // === File format errors ===
    #[error("The file type should be {expected} not {found}")]
    FileType { expected: String, found: String },

    // === Model construction / parse errors ===
    #[error("Invalid value for '{field}': {message}")]
    Validation { field: String, message: String },

    // === Geotransform errors ===
    #[error("Geotransform is not invertible: xres*yres - row_rotation*col_rotation == 0")]
    DegenerateTransform,

    #[error("{value} is beyond the {bound_name} bound: {bound}")]
    OutOfBounds {
        value: f64,
        bound_name: &'static str,
        bound: f64,
    },

    // === Array stacking / raster errors ===
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    // === Infrastructure errors ===
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SpectralError {
    /// Shorthand for a validation error on a named field.
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        SpectralError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

// A JSON document that fails to parse into a record is a structural
// validation failure, not an infrastructure failure.
impl From<serde_json::Error> for SpectralError {
    fn from(err: serde_json::Error) -> Self {
        SpectralError::Validation {
            field: "json".to_string(),
            message: err.to_string(),
        }
    }
}
