use crate::core::{ppi::checked_ppi, resolution::parse_resolution};
use crate::error::ComputationError;
use crate::models::{DerivedFeatures, FeatureValue, FeatureVector, RawSpecSelection};

/// Encode a yes/no selection: exactly "Yes" maps to 1, anything else to 0
#[inline]
pub fn yes_no_flag(value: &str) -> u8 {
    if value == "Yes" { 1 } else { 0 }
}

/// Compute the derived features of a selection
///
/// Expects a validated selection (non-zero screen size).
pub fn derive_features(selection: &RawSpecSelection) -> Result<DerivedFeatures, ComputationError> {
    let (horizontal_px, vertical_px) = parse_resolution(&selection.resolution)?;
    let ppi = checked_ppi(horizontal_px, vertical_px, selection.screen_size_inches)?;

    Ok(DerivedFeatures {
        touch_numeric: yes_no_flag(&selection.touchscreen),
        ips_numeric: yes_no_flag(&selection.ips_panel),
        horizontal_px,
        vertical_px,
        ppi,
    })
}

/// Assemble the model input in training order
///
/// Categorical fields pass through as labels.
pub fn build_feature_vector(selection: &RawSpecSelection, derived: &DerivedFeatures) -> FeatureVector {
    fn category(label: &str) -> FeatureValue {
        FeatureValue::Category(label.to_string())
    }
    let number = FeatureValue::Number;

    FeatureVector([
        category(&selection.manufacturer),
        category(&selection.form_factor),
        number(selection.ram_gb as f64),
        number(selection.weight_kg),
        number(derived.touch_numeric as f64),
        number(derived.ips_numeric as f64),
        number(derived.ppi),
        category(&selection.cpu_brand),
        number(selection.hdd_gb as f64),
        number(selection.ssd_gb as f64),
        category(&selection.gpu_brand),
        category(&selection.platform),
    ])
}
