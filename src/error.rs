//! Error types of the interpolation core.
//!
//! Query points outside the source domain are not errors: they come back as
//! NaN values so that a batch never aborts halfway through.

use thiserror::Error;

pub type InterpResult<T> = Result<T, InterpError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterpError {
    /// The source points do not span a 2-D region.
    #[error("cannot triangulate {unique_points} unique points: {reason}")]
    DegenerateGeometry { unique_points: usize, reason: String },

    /// A field or value array does not match the geometry it is used with.
    #[error("dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        expected: usize,
        actual: usize,
        context: String,
    },

    /// A source coordinate is NaN or infinite.
    #[error("source point {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },
}

impl InterpError {
    pub(crate) fn dimension_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::DimensionMismatch {
            expected,
            actual,
            context: context.to_string(),
        }
    }
}
