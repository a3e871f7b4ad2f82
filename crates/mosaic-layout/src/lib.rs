//! PLAYMOSAIC grid layout engine.
//!
//! Turns a game library into a mosaic plan: every game gets a square tile
//! whose area tracks its (softened) playtime, and the grid's column count is
//! tuned so the packed mosaic roughly fills the viewport height.
//!
//! The engine is a pure function of its inputs. It does no I/O, keeps no
//! state between calls, and always finishes within the configured iteration
//! budget, so callers can rerun it on every resize.
//!
//! ```
//! use mosaic_layout::layout;
//! use mosaic_types::item::{Item, Viewport};
//!
//! let items = vec![Item::new("A", 100.0), Item::new("B", 1.0)];
//! let plan = layout(&items, Viewport::new(1200.0, 800.0)).unwrap();
//! assert_eq!(plan.len(), 2);
//! ```

pub mod pack;
pub mod plan;
pub mod search;
pub mod span;
pub mod weight;

pub use pack::Placement;
pub use plan::{LayoutPlan, ScoredItem};
pub use search::SearchOutcome;
pub use span::Span;

use mosaic_types::config::{LayoutConfig, PresentationOrder};
use mosaic_types::error::Result;
use mosaic_types::item::{Item, Viewport};

/// Layout engine bound to one configuration.
#[derive(Debug, Clone, Default)]
pub struct MosaicLayout {
    config: LayoutConfig,
}

impl MosaicLayout {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lay out `items` for `viewport`.
    ///
    /// Items with a negative or non-finite playtime are skipped (logged and
    /// listed in [`LayoutPlan::skipped`]) unless the config asks for them to
    /// be rejected, in which case the first one aborts the layout.
    pub fn compute(&self, items: &[Item], viewport: Viewport) -> Result<LayoutPlan> {
        let config = &self.config;
        config.validate()?;
        viewport.validate()?;

        let mut accepted: Vec<&Item> = Vec::with_capacity(items.len());
        let mut skipped = Vec::new();
        for item in items {
            if item.has_valid_weight() {
                accepted.push(item);
            } else if config.reject_invalid_weights {
                item.check_weight()?;
            } else {
                log::warn!(
                    "Skipping '{}': unusable playtime {}",
                    item.identifier,
                    item.hours
                );
                skipped.push(item.identifier.clone());
            }
        }

        if accepted.is_empty() {
            let columns = config.min_columns;
            let cell = search::cell_size(viewport.width, columns, config.gutter);
            let mut plan = LayoutPlan::empty(columns, cell, viewport, config);
            plan.skipped = skipped;
            return Ok(plan);
        }

        let hours: Vec<f64> = accepted.iter().map(|i| i.hours).collect();
        let weights = weight::area_weights(&hours, config);
        let order: Vec<usize> = match config.order {
            PresentationOrder::ByWeight => span::weight_order(&weights),
            PresentationOrder::Input => (0..weights.len()).collect(),
        };
        let ordered: Vec<f64> = order.iter().map(|&i| weights[i]).collect();

        let result = search::search_columns(&ordered, &viewport, config);
        let estimate = result.estimate;

        let items = order
            .iter()
            .zip(&estimate.spans)
            .zip(&estimate.packing.placements)
            .map(|((&i, &span), &placement)| ScoredItem {
                identifier: accepted[i].identifier.clone(),
                hours: accepted[i].hours,
                area_weight: weights[i],
                span,
                placement,
            })
            .collect();

        log::debug!(
            "Laid out {} items ({} skipped) in {} cols x {} rows, {:.1}px tall ({:?} after {})",
            order.len(),
            skipped.len(),
            estimate.columns,
            estimate.packing.rows,
            estimate.height,
            result.outcome,
            result.iterations,
        );

        Ok(LayoutPlan {
            columns: estimate.columns,
            cell_size: estimate.cell_size,
            gutter: config.gutter,
            rows: estimate.packing.rows,
            estimated_height: estimate.height,
            viewport,
            outcome: result.outcome,
            iterations: result.iterations,
            items,
            skipped,
        })
    }
}

/// Lay out `items` with the default configuration.
pub fn layout(items: &[Item], viewport: Viewport) -> Result<LayoutPlan> {
    MosaicLayout::default().compute(items, viewport)
}
