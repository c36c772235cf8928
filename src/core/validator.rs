use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::{invoker::PricePredictor, resolution::SUPPORTED_RESOLUTIONS};
use crate::error::ValidationError;
use crate::models::{CategoricalField, RawSpecSelection};

pub const RAM_OPTIONS_GB: [u32; 9] = [2, 4, 6, 8, 12, 16, 24, 32, 64];
pub const HDD_OPTIONS_GB: [u32; 6] = [0, 128, 256, 512, 1024, 2048];
pub const SSD_OPTIONS_GB: [u32; 9] = [0, 8, 16, 32, 64, 128, 256, 512, 1024];
pub const YES_NO: [&str; 2] = ["No", "Yes"];

pub const SCREEN_SIZE_MIN_INCHES: f64 = 10.0;
pub const SCREEN_SIZE_MAX_INCHES: f64 = 20.0;
pub const SCREEN_SIZE_DEFAULT_INCHES: f64 = 15.6;
pub const WEIGHT_MIN_KG: f64 = 0.5;
pub const WEIGHT_MAX_KG: f64 = 5.0;
pub const WEIGHT_DEFAULT_KG: f64 = 1.5;

/// How much the core trusts the caller's selections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    /// Only a zero screen size is rejected; the form is trusted for the rest
    #[default]
    Minimal,
    /// Also reject anything outside the form's enumerations and ranges
    Strict,
}

/// Check a selection before any derivation or inference
///
/// The zero screen size check always runs first.
pub fn validate_selection(
    selection: &RawSpecSelection,
    policy: ValidationPolicy,
    model: &dyn PricePredictor,
) -> Result<(), ValidationError> {
    if selection.screen_size_inches == 0.0 {
        return Err(ValidationError::ZeroScreenSize);
    }

    match policy {
        ValidationPolicy::Minimal => Ok(()),
        ValidationPolicy::Strict => validate_strict(selection, model),
    }
}

fn validate_strict(selection: &RawSpecSelection, model: &dyn PricePredictor) -> Result<(), ValidationError> {
    selection
        .validate()
        .map_err(|errors| ValidationError::Constraints(errors.to_string()))?;

    check_member("resolution", &selection.resolution, &SUPPORTED_RESOLUTIONS)?;
    check_member("touchscreen", &selection.touchscreen, &YES_NO)?;
    check_member("ipsPanel", &selection.ips_panel, &YES_NO)?;
    check_member("ramGb", &selection.ram_gb, &RAM_OPTIONS_GB)?;
    check_member("hddGb", &selection.hdd_gb, &HDD_OPTIONS_GB)?;
    check_member("ssdGb", &selection.ssd_gb, &SSD_OPTIONS_GB)?;

    for field in CategoricalField::ALL {
        let label = field.label(selection);
        // A model without a published domain accepts any label
        if let Some(domain) = model.category_domain(field) {
            if !domain.iter().any(|known| known == label) {
                return Err(ValidationError::UnknownLabel {
                    field,
                    label: label.to_string(),
                });
            }
        }
    }

    Ok(())
}

fn check_member<T, U>(field: &'static str, value: &T, allowed: &[U]) -> Result<(), ValidationError>
where
    T: PartialEq<U> + std::fmt::Display + ?Sized,
{
    if allowed.iter().any(|option| value == option) {
        Ok(())
    } else {
        Err(ValidationError::OutOfEnumeration {
            field,
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ComputationError;
    use crate::models::FeatureVector;

    struct DomainModel {
        manufacturers: Vec<String>,
    }

    impl PricePredictor for DomainModel {
        fn predict(&self, _features: &FeatureVector) -> Result<f64, ComputationError> {
            Ok(0.0)
        }

        fn category_domain(&self, field: CategoricalField) -> Option<&[String]> {
            match field {
                CategoricalField::Manufacturer => Some(&self.manufacturers),
                _ => None,
            }
        }
    }

    fn create_model() -> DomainModel {
        DomainModel {
            manufacturers: vec!["Dell".to_string(), "HP".to_string()],
        }
    }

    fn create_selection() -> RawSpecSelection {
        RawSpecSelection {
            manufacturer: "Dell".to_string(),
            form_factor: "Notebook".to_string(),
            platform: "Windows".to_string(),
            screen_size_inches: 15.6,
            resolution: "1920x1080".to_string(),
            gpu_brand: "Intel".to_string(),
            touchscreen: "No".to_string(),
            ips_panel: "Yes".to_string(),
            cpu_brand: "Intel Core i5".to_string(),
            ram_gb: 8,
            hdd_gb: 0,
            ssd_gb: 256,
            weight_kg: 1.5,
        }
    }

    #[test]
    fn test_zero_screen_rejected_under_both_policies() {
        let mut selection = create_selection();
        selection.screen_size_inches = 0.0;

        for policy in [ValidationPolicy::Minimal, ValidationPolicy::Strict] {
            assert_eq!(
                validate_selection(&selection, policy, &create_model()),
                Err(ValidationError::ZeroScreenSize)
            );
        }
    }

    #[test]
    fn test_minimal_trusts_everything_else() {
        let mut selection = create_selection();
        selection.resolution = "abcxdef".to_string();
        selection.ram_gb = 3;
        selection.manufacturer = "Unknown".to_string();
        selection.screen_size_inches = -4.0;

        assert!(validate_selection(&selection, ValidationPolicy::Minimal, &create_model()).is_ok());
    }

    #[test]
    fn test_strict_accepts_form_values() {
        assert!(validate_selection(&create_selection(), ValidationPolicy::Strict, &create_model()).is_ok());
    }

    #[test]
    fn test_strict_rejects_off_list_resolution() {
        let mut selection = create_selection();
        selection.resolution = "1280x800".to_string();

        let err = validate_selection(&selection, ValidationPolicy::Strict, &create_model()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutOfEnumeration {
                field: "resolution",
                value: "1280x800".to_string()
            }
        );
    }

    #[test]
    fn test_strict_rejects_off_list_memory() {
        let mut selection = create_selection();
        selection.ram_gb = 3;

        let err = validate_selection(&selection, ValidationPolicy::Strict, &create_model()).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfEnumeration { field: "ramGb", .. }));
    }

    #[test]
    fn test_strict_rejects_ranges() {
        let mut selection = create_selection();
        selection.weight_kg = 7.0;
        let err = validate_selection(&selection, ValidationPolicy::Strict, &create_model()).unwrap_err();
        assert!(matches!(err, ValidationError::Constraints(_)));

        let mut selection = create_selection();
        selection.screen_size_inches = 10.0;
        let err = validate_selection(&selection, ValidationPolicy::Strict, &create_model()).unwrap_err();
        assert!(matches!(err, ValidationError::Constraints(_)));
    }

    #[test]
    fn test_strict_rejects_unknown_label() {
        let mut selection = create_selection();
        selection.manufacturer = "Framework".to_string();

        let err = validate_selection(&selection, ValidationPolicy::Strict, &create_model()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownLabel {
                field: CategoricalField::Manufacturer,
                label: "Framework".to_string()
            }
        );
    }

    #[test]
    fn test_policy_deserializes_lowercase() {
        let policy: ValidationPolicy = serde_json::from_str("\"strict\"").unwrap();
        assert_eq!(policy, ValidationPolicy::Strict);
    }
}
