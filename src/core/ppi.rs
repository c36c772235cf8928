use crate::error::ComputationError;

/// Pixels per inch along the diagonal
///
/// `screen_size_inches` must be non-zero; the validator rejects zero before
/// this runs.
#[inline]
pub fn calculate_ppi(horizontal_px: u32, vertical_px: u32, screen_size_inches: f64) -> f64 {
    let h = horizontal_px as f64;
    let v = vertical_px as f64;
    (h.powi(2) + v.powi(2)).sqrt() / screen_size_inches
}

/// [`calculate_ppi`] that refuses to hand a non-finite density to the model
pub fn checked_ppi(
    horizontal_px: u32,
    vertical_px: u32,
    screen_size_inches: f64,
) -> Result<f64, ComputationError> {
    let ppi = calculate_ppi(horizontal_px, vertical_px, screen_size_inches);
    if ppi.is_finite() {
        Ok(ppi)
    } else {
        Err(ComputationError::NonFinitePpi {
            horizontal_px,
            vertical_px,
            screen_size_inches,
        })
    }
}
