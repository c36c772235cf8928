use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use crate::models::domain::{DerivedFeatures, FeatureVector};

/// Response for the valuation endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationResponse {
    #[serde(rename = "requestId")]
    pub request_id: String,
    pub price: u64,
    #[serde(rename = "formattedPrice")]
    pub formatted_price: String,
    #[serde(rename = "logPrice")]
    pub log_price: f64,
    pub derived: DerivedFeatures,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub features: Option<FeatureVector>,
}

/// Selection choices for building the input form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsResponse {
    #[serde(rename = "categoryDomains")]
    pub category_domains: BTreeMap<String, Vec<String>>,
    pub resolutions: Vec<String>,
    #[serde(rename = "ramGb")]
    pub ram_gb: Vec<u32>,
    #[serde(rename = "hddGb")]
    pub hdd_gb: Vec<u32>,
    #[serde(rename = "ssdGb")]
    pub ssd_gb: Vec<u32>,
    #[serde(rename = "yesNo")]
    pub yes_no: Vec<String>,
    #[serde(rename = "screenSizeInches")]
    pub screen_size_inches: NumericRange,
    #[serde(rename = "weightKg")]
    pub weight_kg: NumericRange,
}

/// Bounds, default and step of a numeric input
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub model: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
