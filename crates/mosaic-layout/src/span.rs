//! Span assignment: turning area weights into square cell footprints.

use serde::{Deserialize, Serialize};

use mosaic_types::config::LayoutConfig;

/// Footprint of a tile, in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub width: u32,
    pub height: u32,
}

impl Span {
    pub const UNIT: Self = Self {
        width: 1,
        height: 1,
    };

    pub fn square(side: u32) -> Self {
        Self {
            width: side,
            height: side,
        }
    }

    /// Longest side.
    pub fn side(&self) -> u32 {
        self.width.max(self.height)
    }

    pub fn cells(&self) -> u32 {
        self.width * self.height
    }
}

/// Indices of `weights` sorted heaviest first. Equal weights keep their
/// input order, so the result is fully deterministic.
pub fn weight_order(weights: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..weights.len()).collect();
    order.sort_by(|&a, &b| weights[b].total_cmp(&weights[a]).then(a.cmp(&b)));
    order
}

/// Assign a square span to every weight, returned in input order.
///
/// Each side is `round(sqrt(w / max_w * max_span^2))` clamped to
/// `[1, max_span]`. The `top_k_boost_count` heaviest items then grow by
/// `boost_increment`, still capped at `max_span`.
pub fn assign_spans(weights: &[f64], max_span: u32, config: &LayoutConfig) -> Vec<Span> {
    let max_span = max_span.max(1);
    let max_weight = weights.iter().copied().fold(0.0f64, f64::max);
    if !(max_weight.is_finite() && max_weight > 0.0) {
        return vec![Span::UNIT; weights.len()];
    }

    let max_area = f64::from(max_span) * f64::from(max_span);
    let mut sides: Vec<u32> = weights
        .iter()
        .map(|&w| {
            let relative = w / max_weight;
            ((relative * max_area).sqrt().round() as u32).clamp(1, max_span)
        })
        .collect();

    if config.top_k_boost_count > 0 && config.boost_increment > 0 {
        for &i in weight_order(weights).iter().take(config.top_k_boost_count) {
            sides[i] = sides[i].saturating_add(config.boost_increment).min(max_span);
        }
    }

    sides.into_iter().map(Span::square).collect()
}
