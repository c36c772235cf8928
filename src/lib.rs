//! Laptop Valuation - price prediction service for laptop configurations
//!
//! Turns a user's hardware selection into a model-ready feature vector,
//! runs it through a pre-trained log-price model and returns a whole
//! currency amount.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{calculate_ppi, parse_resolution, PricePredictor, ValidationPolicy, Valuator};
pub use error::{ComputationError, ValidationError, ValuationError};
pub use models::{FeatureVector, PredictionResult, RawSpecSelection, Valuation};
pub use services::ModelArtifact;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        assert_eq!(parse_resolution("1366x768").unwrap(), (1366, 768));
        assert!(calculate_ppi(1366, 768, 15.6) > 100.0);
    }
}
