use std::sync::Arc;

use crate::core::{
    features::{build_feature_vector, derive_features},
    invoker::{InferenceInvoker, PricePredictor},
    validator::{validate_selection, ValidationPolicy},
};
use crate::error::ValuationError;
use crate::models::{RawSpecSelection, Valuation};

/// Main appraisal orchestrator
///
/// # Pipeline Stages
/// 1. Input validation
/// 2. Resolution parsing and PPI derivation
/// 3. Feature vector assembly
/// 4. Model inference and inverse-log transform
///
/// Stateless between calls; safe to share across workers.
#[derive(Debug, Clone)]
pub struct Valuator {
    invoker: InferenceInvoker,
    policy: ValidationPolicy,
}

impl Valuator {
    pub fn new(model: Arc<dyn PricePredictor>, policy: ValidationPolicy) -> Self {
        Self {
            invoker: InferenceInvoker::new(model),
            policy,
        }
    }

    pub fn with_minimal_validation(model: Arc<dyn PricePredictor>) -> Self {
        Self::new(model, ValidationPolicy::Minimal)
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    pub fn model(&self) -> &dyn PricePredictor {
        self.invoker.model()
    }

    /// Appraise one laptop configuration
    ///
    /// Validation failures short-circuit before the model is touched.
    pub fn appraise(&self, selection: &RawSpecSelection) -> Result<Valuation, ValuationError> {
        // Stage 1: Validation
        validate_selection(selection, self.policy, self.invoker.model())?;

        // Stage 2: Derived features
        let derived = derive_features(selection)?;

        // Stage 3: Feature vector
        let features = build_feature_vector(selection, &derived);

        // Stage 4: Inference
        let prediction = self.invoker.invoke(&features)?;

        Ok(Valuation {
            derived,
            features,
            prediction,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ComputationError, ValidationError};
    use crate::models::{CategoricalField, FeatureVector};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns a fixed log-price and counts how often it was asked
    struct CountingModel {
        log_price: f64,
        calls: AtomicUsize,
    }

    impl PricePredictor for CountingModel {
        fn predict(&self, features: &FeatureVector) -> Result<f64, ComputationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(features.len(), 12);
            Ok(self.log_price)
        }

        fn category_domain(&self, _field: CategoricalField) -> Option<&[String]> {
            None
        }
    }

    fn create_model(log_price: f64) -> Arc<CountingModel> {
        Arc::new(CountingModel {
            log_price,
            calls: AtomicUsize::new(0),
        })
    }

    fn create_selection() -> RawSpecSelection {
        RawSpecSelection {
            manufacturer: "Apple".to_string(),
            form_factor: "Ultrabook".to_string(),
            platform: "Mac".to_string(),
            screen_size_inches: 13.3,
            resolution: "2560x1600".to_string(),
            gpu_brand: "Intel".to_string(),
            touchscreen: "No".to_string(),
            ips_panel: "Yes".to_string(),
            cpu_brand: "Intel Core i5".to_string(),
            ram_gb: 8,
            hdd_gb: 0,
            ssd_gb: 256,
            weight_kg: 1.37,
        }
    }

    #[test]
    fn test_appraise_basic() {
        let model = create_model(10.0);
        let valuator = Valuator::with_minimal_validation(model.clone());

        let valuation = valuator.appraise(&create_selection()).unwrap();

        assert_eq!(valuation.prediction.price, 22026);
        assert_eq!(valuation.derived.ips_numeric, 1);
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_zero_screen_never_reaches_model() {
        let model = create_model(10.0);
        let valuator = Valuator::with_minimal_validation(model.clone());
        let mut selection = create_selection();
        selection.screen_size_inches = 0.0;

        let err = valuator.appraise(&selection).unwrap_err();

        assert_eq!(err, ValuationError::Validation(ValidationError::ZeroScreenSize));
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_malformed_resolution_is_computation_error() {
        let model = create_model(10.0);
        let valuator = Valuator::with_minimal_validation(model.clone());
        let mut selection = create_selection();
        selection.resolution = "abcxdef".to_string();

        let err = valuator.appraise(&selection).unwrap_err();

        assert!(matches!(err, ValuationError::Computation(ComputationError::MalformedResolution { .. })));
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_repeated_appraisals_agree() {
        let valuator = Valuator::with_minimal_validation(create_model(11.3));
        let selection = create_selection();

        let first = valuator.appraise(&selection).unwrap();
        let second = valuator.appraise(&selection).unwrap();

        assert_eq!(first, second);
    }
}
