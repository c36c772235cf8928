// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    CategoricalField, DerivedFeatures, FeatureSlot, FeatureValue, FeatureVector, PredictionResult,
    RawSpecSelection, Valuation, FEATURE_COUNT, FEATURE_ORDER,
};
pub use requests::ValuationRequest;
pub use responses::{ErrorResponse, HealthResponse, NumericRange, OptionsResponse, ValuationResponse};
