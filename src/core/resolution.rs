use crate::error::ComputationError;

/// Display resolutions offered on the form
pub const SUPPORTED_RESOLUTIONS: [&str; 8] = [
    "1920x1080",
    "1366x768",
    "1600x900",
    "3840x2160",
    "3200x1800",
    "2880x1800",
    "2560x1600",
    "2560x1440",
];

/// Split a `"<width>x<height>"` string into pixel counts
///
/// Allow-list membership is not checked here. Anything after a second `x`
/// is ignored, and surrounding whitespace on each half is tolerated.
pub fn parse_resolution(resolution: &str) -> Result<(u32, u32), ComputationError> {
    let malformed = |reason: String| ComputationError::MalformedResolution {
        input: resolution.to_string(),
        reason,
    };

    let mut parts = resolution.split('x');
    let horizontal = parts.next().unwrap_or_default();
    let vertical = parts
        .next()
        .ok_or_else(|| malformed("missing 'x' separator".to_string()))?;

    let horizontal_px = horizontal
        .trim()
        .parse::<u32>()
        .map_err(|e| malformed(format!("width: {}", e)))?;
    let vertical_px = vertical
        .trim()
        .parse::<u32>()
        .map_err(|e| malformed(format!("height: {}", e)))?;

    Ok((horizontal_px, vertical_px))
}
