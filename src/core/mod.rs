// Core pipeline exports
pub mod features;
pub mod invoker;
pub mod ppi;
pub mod resolution;
pub mod validator;
pub mod valuator;

pub use features::{build_feature_vector, derive_features, yes_no_flag};
pub use invoker::{price_from_log, InferenceInvoker, PricePredictor};
pub use ppi::{calculate_ppi, checked_ppi};
pub use resolution::{parse_resolution, SUPPORTED_RESOLUTIONS};
pub use self::validator::{validate_selection, ValidationPolicy};
pub use valuator::Valuator;
