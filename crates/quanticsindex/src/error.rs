//! Error types for quanticsindex

use thiserror::Error;

/// Result type for quanticsindex operations
pub type Result<T> = std::result::Result<T, QuanticsIndexError>;

/// Errors that can occur during quantics index conversions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuanticsIndexError {
    /// Sequences that must have matching (or divisible) lengths do not
    #[error("Shape mismatch: {message}")]
    ShapeMismatch { message: String },

    /// Digit value outside its admissible range
    #[error("Digit {value} at position {position} out of range [1, {max}]")]
    DigitOutOfRange { position: usize, value: i64, max: i64 },

    /// Index outside [1, base^nbits]
    #[error("Index {value} for dimension {dim} out of range [1, {max}]")]
    IndexOutOfRange { dim: usize, value: i64, max: i64 },

    /// Unknown unfolding scheme name
    #[error("Unsupported unfolding scheme '{0}', expected 'interleaved' or 'fused'")]
    UnsupportedScheme(String),

    /// Base must be at least 2
    #[error("Base must be at least 2, got {0}")]
    InvalidBase(usize),

    /// base^r would overflow i64
    #[error("Resolution {r} with base {base} is too large (base^R would overflow i64)")]
    ResolutionTooLarge { r: usize, base: usize },

    /// Quantics vector has wrong length
    #[error("Quantics vector must have length {expected}, got {actual}")]
    WrongQuanticsLength { expected: usize, actual: usize },

    /// Wrong number of indices
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Site index out of bounds
    #[error("Site index {site} out of bounds [0, {max})")]
    SiteIndexOutOfBounds { site: usize, max: usize },
}

impl QuanticsIndexError {
    pub(crate) fn shape(message: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            message: message.into(),
        }
    }

    /// Returns true for errors caused by a digit or index outside its range.
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            Self::DigitOutOfRange { .. }
                | Self::IndexOutOfRange { .. }
                | Self::SiteIndexOutOfBounds { .. }
        )
    }

    /// Returns true for errors caused by inconsistent sequence lengths or counts.
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(
            self,
            Self::ShapeMismatch { .. }
                | Self::WrongQuanticsLength { .. }
                | Self::DimensionMismatch { .. }
        )
    }
}
