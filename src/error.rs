use thiserror::Error;

use crate::models::{CategoricalField, ErrorResponse, FeatureSlot};

/// Rejections raised before any derivation or inference runs
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Screen size cannot be zero.")]
    ZeroScreenSize,

    #[error("{field} value '{value}' is not one of the supported options")]
    OutOfEnumeration { field: &'static str, value: String },

    #[error("{field} '{label}' is not known to the model")]
    UnknownLabel { field: CategoricalField, label: String },

    #[error("Constraint violation: {0}")]
    Constraints(String),
}

/// Failures while deriving features or invoking the model
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComputationError {
    #[error("invalid resolution '{input}': {reason}")]
    MalformedResolution { input: String, reason: String },

    #[error("pixel density is not finite for {horizontal_px}x{vertical_px} at {screen_size_inches} in")]
    NonFinitePpi {
        horizontal_px: u32,
        vertical_px: u32,
        screen_size_inches: f64,
    },

    #[error("slot {slot} expected a {expected} value")]
    SlotType { slot: FeatureSlot, expected: &'static str },

    #[error("encoded input has {actual} columns, model expects {expected}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("found unknown category '{label}' in {field}")]
    UnknownCategory { field: CategoricalField, label: String },

    #[error("model evaluation failed: {0}")]
    Model(String),

    #[error("log-price {0} does not map to a representable price")]
    PriceOutOfRange(f64),
}

impl ComputationError {
    /// Whether the failure was caused by the submitted values rather than the model
    pub fn is_input_caused(&self) -> bool {
        matches!(
            self,
            ComputationError::MalformedResolution { .. }
                | ComputationError::NonFinitePpi { .. }
                | ComputationError::UnknownCategory { .. }
        )
    }
}

/// Terminal outcome of a failed appraisal
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValuationError {
    #[error("Invalid Configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("Computation Error: {0}")]
    Computation(#[from] ComputationError),
}

/// Error category shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ValidationError,
    ComputationError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ValidationError => "validation_error",
            ErrorKind::ComputationError => "computation_error",
        }
    }
}

impl ValuationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValuationError::Validation(_) => ErrorKind::ValidationError,
            ValuationError::Computation(_) => ErrorKind::ComputationError,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ValuationError::Validation(_) => 400,
            ValuationError::Computation(e) if e.is_input_caused() => 422,
            ValuationError::Computation(_) => 500,
        }
    }

    /// User-facing report carrying the kind and the underlying message
    pub fn report(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.kind().as_str().to_string(),
            message: self.to_string(),
            status_code: self.status_code(),
        }
    }
}
