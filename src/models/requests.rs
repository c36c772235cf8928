use serde::{Deserialize, Serialize};
use crate::models::domain::RawSpecSelection;

/// Request to appraise a laptop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationRequest {
    #[serde(flatten)]
    pub selection: RawSpecSelection,
    /// Echo the assembled feature vector in the response
    #[serde(default)]
    #[serde(alias = "include_features", rename = "includeFeatures")]
    pub include_features: bool,
}
