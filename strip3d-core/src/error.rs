/// Error types for strip generation and control-point handling
use thiserror::Error;

/// Result type for mesh generation.
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Errors raised while generating strip geometry.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    /// A generator parameter is outside its domain.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name as it appears on the params struct.
        name: &'static str,
        /// What is wrong with the value.
        reason: String,
    },

    /// No perpendicular could be built at this sample, even with the fallback axis.
    #[error("degenerate frame at t = {t}: tangent is zero or parallel to both reference axes")]
    DegenerateFrame {
        /// Curve parameter of the failing sample.
        t: f32,
    },
}

impl GeometryError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Errors raised by the control-point store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ControlPointError {
    #[error("unknown control point id {0}")]
    UnknownId(usize),
}

/// Errors raised while reading a control-point file.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PointsError {
    /// A line could not be read as `x y z`.
    #[error("line {line}: expected `x y z`, got {content:?}")]
    Parse {
        /// 1-based line number.
        line: usize,
        content: String,
    },

    #[error("a path needs at least {min} control points, got {actual}")]
    TooFewPoints { min: usize, actual: usize },
}
