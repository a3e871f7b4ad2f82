//! Playtime to tile-area weighting.

use mosaic_types::config::LayoutConfig;

/// Soften raw playtime into an area weight: `(hours + offset) ^ exponent`.
///
/// The offset keeps zero-hour entries at a small positive weight. The
/// exponent (below 1) compresses the range so a single 2000-hour game does
/// not flatten everything else to minimum size.
pub fn area_weight(hours: f64, config: &LayoutConfig) -> f64 {
    (hours.max(0.0) + config.weight_offset).powf(config.weight_exponent)
}

/// Weights for a slice of playtimes, in the same order.
pub fn area_weights(hours: &[f64], config: &LayoutConfig) -> Vec<f64> {
    hours.iter().map(|&h| area_weight(h, config)).collect()
}
