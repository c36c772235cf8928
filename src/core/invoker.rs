use std::sync::Arc;

use crate::error::ComputationError;
use crate::models::{CategoricalField, FeatureVector, PredictionResult};

/// A loaded price model
///
/// Implementations own categorical encoding and return the price on a
/// natural-log scale. They are shared read-only across requests.
pub trait PricePredictor: Send + Sync {
    /// Predict the log-price for one feature vector
    fn predict(&self, features: &FeatureVector) -> Result<f64, ComputationError>;

    /// Labels the model was trained on for a categorical field
    fn category_domain(&self, field: CategoricalField) -> Option<&[String]>;

    /// Human-readable model identifier
    fn name(&self) -> &str {
        "price-model"
    }
}

/// Convert a log-price into a whole currency amount: `round(exp(log_price))`
#[inline]
pub fn price_from_log(log_price: f64) -> Result<u64, ComputationError> {
    let price = log_price.exp().round();
    if !price.is_finite() || price >= u64::MAX as f64 {
        return Err(ComputationError::PriceOutOfRange(log_price));
    }
    Ok(price as u64)
}

/// Calls the model and applies the inverse-log transform
///
/// Holds no state between calls beyond the shared model handle.
#[derive(Clone)]
pub struct InferenceInvoker {
    model: Arc<dyn PricePredictor>,
}

impl InferenceInvoker {
    pub fn new(model: Arc<dyn PricePredictor>) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &dyn PricePredictor {
        self.model.as_ref()
    }

    pub fn invoke(&self, features: &FeatureVector) -> Result<PredictionResult, ComputationError> {
        let log_price = self.model.predict(features)?;
        let price = price_from_log(log_price)?;
        Ok(PredictionResult { log_price, price })
    }
}

impl std::fmt::Debug for InferenceInvoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceInvoker")
            .field("model", &self.model.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FeatureValue;

    struct ConstantModel(f64);

    impl PricePredictor for ConstantModel {
        fn predict(&self, _features: &FeatureVector) -> Result<f64, ComputationError> {
            Ok(self.0)
        }

        fn category_domain(&self, _field: CategoricalField) -> Option<&[String]> {
            None
        }
    }

    struct FailingModel;

    impl PricePredictor for FailingModel {
        fn predict(&self, _features: &FeatureVector) -> Result<f64, ComputationError> {
            Err(ComputationError::Model("artifact is corrupt".to_string()))
        }

        fn category_domain(&self, _field: CategoricalField) -> Option<&[String]> {
            None
        }
    }

    fn create_vector() -> FeatureVector {
        FeatureVector(std::array::from_fn(|i| FeatureValue::Number(i as f64)))
    }

    #[test]
    fn test_price_from_log_ten() {
        assert_eq!(price_from_log(10.0).unwrap(), 22026);
    }

    #[test]
    fn test_price_rounds_rather_than_truncates() {
        // exp(ln(2.6)) = 2.6
        assert_eq!(price_from_log(2.6f64.ln()).unwrap(), 3);
    }

    #[test]
    fn test_very_negative_log_price_is_zero() {
        assert_eq!(price_from_log(-50.0).unwrap(), 0);
    }

    #[test]
    fn test_non_finite_prices_rejected() {
        assert!(price_from_log(f64::NAN).is_err());
        assert!(price_from_log(1000.0).is_err());
    }

    #[test]
    fn test_invoke_is_idempotent() {
        let invoker = InferenceInvoker::new(Arc::new(ConstantModel(10.0)));
        let vector = create_vector();

        let first = invoker.invoke(&vector).unwrap();
        let second = invoker.invoke(&vector).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.price, 22026);
        assert_eq!(first.log_price, 10.0);
    }

    #[test]
    fn test_model_failure_surfaces_message() {
        let invoker = InferenceInvoker::new(Arc::new(FailingModel));
        let err = invoker.invoke(&create_vector()).unwrap_err();
        assert!(err.to_string().contains("artifact is corrupt"));
    }
}
