use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Laptop configuration as selected by the user
///
/// Every field comes from a closed enumeration or a bounded range on the
/// form. Categorical fields are kept as opaque labels; the model layer owns
/// their encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct RawSpecSelection {
    #[validate(length(min = 1))]
    pub manufacturer: String,
    #[serde(rename = "formFactor", alias = "form_factor")]
    #[validate(length(min = 1))]
    pub form_factor: String,
    #[validate(length(min = 1))]
    pub platform: String,
    #[serde(rename = "screenSizeInches", alias = "screen_size_inches")]
    #[validate(range(exclusive_min = 10.0, max = 20.0))]
    pub screen_size_inches: f64,
    pub resolution: String,
    #[serde(rename = "gpuBrand", alias = "gpu_brand")]
    #[validate(length(min = 1))]
    pub gpu_brand: String,
    /// "Yes" or "No"
    pub touchscreen: String,
    /// "Yes" or "No"
    #[serde(rename = "ipsPanel", alias = "ips_panel")]
    pub ips_panel: String,
    #[serde(rename = "cpuBrand", alias = "cpu_brand")]
    #[validate(length(min = 1))]
    pub cpu_brand: String,
    #[serde(rename = "ramGb", alias = "ram_gb")]
    pub ram_gb: u32,
    #[serde(rename = "hddGb", alias = "hdd_gb")]
    pub hdd_gb: u32,
    #[serde(rename = "ssdGb", alias = "ssd_gb")]
    pub ssd_gb: u32,
    #[serde(rename = "weightKg", alias = "weight_kg")]
    #[validate(range(min = 0.5, max = 5.0))]
    pub weight_kg: f64,
}

/// Features computed from a selection rather than entered by the user
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedFeatures {
    #[serde(rename = "touchNumeric")]
    pub touch_numeric: u8,
    #[serde(rename = "ipsNumeric")]
    pub ips_numeric: u8,
    #[serde(rename = "horizontalPx")]
    pub horizontal_px: u32,
    #[serde(rename = "verticalPx")]
    pub vertical_px: u32,
    pub ppi: f64,
}

/// Categorical slots of the feature vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CategoricalField {
    Manufacturer,
    FormFactor,
    CpuBrand,
    GpuBrand,
    Platform,
}

impl CategoricalField {
    pub const ALL: [CategoricalField; 5] = [
        CategoricalField::Manufacturer,
        CategoricalField::FormFactor,
        CategoricalField::CpuBrand,
        CategoricalField::GpuBrand,
        CategoricalField::Platform,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoricalField::Manufacturer => "manufacturer",
            CategoricalField::FormFactor => "formFactor",
            CategoricalField::CpuBrand => "cpuBrand",
            CategoricalField::GpuBrand => "gpuBrand",
            CategoricalField::Platform => "platform",
        }
    }

    /// Label selected for this field
    pub fn label<'a>(&self, selection: &'a RawSpecSelection) -> &'a str {
        match self {
            CategoricalField::Manufacturer => &selection.manufacturer,
            CategoricalField::FormFactor => &selection.form_factor,
            CategoricalField::CpuBrand => &selection.cpu_brand,
            CategoricalField::GpuBrand => &selection.gpu_brand,
            CategoricalField::Platform => &selection.platform,
        }
    }
}

impl fmt::Display for CategoricalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One slot of the model input, in the order the artifact was trained on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeatureSlot {
    Manufacturer,
    FormFactor,
    RamGb,
    WeightKg,
    Touchscreen,
    Ips,
    Ppi,
    CpuBrand,
    HddGb,
    SsdGb,
    GpuBrand,
    Platform,
}

/// Number of slots in a feature vector
pub const FEATURE_COUNT: usize = 12;

/// Slot order shared with the model artifact. Reordering this silently
/// produces wrong prices.
pub const FEATURE_ORDER: [FeatureSlot; FEATURE_COUNT] = [
    FeatureSlot::Manufacturer,
    FeatureSlot::FormFactor,
    FeatureSlot::RamGb,
    FeatureSlot::WeightKg,
    FeatureSlot::Touchscreen,
    FeatureSlot::Ips,
    FeatureSlot::Ppi,
    FeatureSlot::CpuBrand,
    FeatureSlot::HddGb,
    FeatureSlot::SsdGb,
    FeatureSlot::GpuBrand,
    FeatureSlot::Platform,
];

impl FeatureSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureSlot::Manufacturer => "manufacturer",
            FeatureSlot::FormFactor => "formFactor",
            FeatureSlot::RamGb => "ramGb",
            FeatureSlot::WeightKg => "weightKg",
            FeatureSlot::Touchscreen => "touchscreen",
            FeatureSlot::Ips => "ips",
            FeatureSlot::Ppi => "ppi",
            FeatureSlot::CpuBrand => "cpuBrand",
            FeatureSlot::HddGb => "hddGb",
            FeatureSlot::SsdGb => "ssdGb",
            FeatureSlot::GpuBrand => "gpuBrand",
            FeatureSlot::Platform => "platform",
        }
    }

    /// The categorical field behind this slot, if it holds a label
    pub fn categorical(&self) -> Option<CategoricalField> {
        match self {
            FeatureSlot::Manufacturer => Some(CategoricalField::Manufacturer),
            FeatureSlot::FormFactor => Some(CategoricalField::FormFactor),
            FeatureSlot::CpuBrand => Some(CategoricalField::CpuBrand),
            FeatureSlot::GpuBrand => Some(CategoricalField::GpuBrand),
            FeatureSlot::Platform => Some(CategoricalField::Platform),
            _ => None,
        }
    }
}

impl fmt::Display for FeatureSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value held in a feature slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Category(String),
    Number(f64),
}

impl FeatureValue {
    pub fn as_category(&self) -> Option<&str> {
        match self {
            FeatureValue::Category(label) => Some(label),
            FeatureValue::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FeatureValue::Number(value) => Some(*value),
            FeatureValue::Category(_) => None,
        }
    }
}

/// Ordered model input
///
/// The fixed-size array keeps the slot count at exactly [`FEATURE_COUNT`];
/// slot `i` always corresponds to `FEATURE_ORDER[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector(pub [FeatureValue; FEATURE_COUNT]);

impl FeatureVector {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn get(&self, slot: FeatureSlot) -> &FeatureValue {
        let index = FEATURE_ORDER
            .iter()
            .position(|s| *s == slot)
            .unwrap_or_default();
        &self.0[index]
    }

    /// Slots paired with their values, in model order
    pub fn iter(&self) -> impl Iterator<Item = (FeatureSlot, &FeatureValue)> {
        FEATURE_ORDER.iter().copied().zip(self.0.iter())
    }
}

/// Model output for one request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    #[serde(rename = "logPrice")]
    pub log_price: f64,
    pub price: u64,
}

/// Everything produced by one appraisal
#[derive(Debug, Clone, PartialEq)]
pub struct Valuation {
    pub derived: DerivedFeatures,
    pub features: FeatureVector,
    pub prediction: PredictionResult,
}
