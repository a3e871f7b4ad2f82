//! Layout plan: the engine's output, handed to the presentation layer.

use serde::{Deserialize, Serialize};

use mosaic_types::config::LayoutConfig;
use mosaic_types::item::Viewport;

use crate::pack::Placement;
use crate::search::{Fit, SearchOutcome, classify, extent};
use crate::span::Span;

/// One laid-out tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem {
    /// Key of the source [`Item`](mosaic_types::item::Item).
    pub identifier: String,
    pub hours: f64,
    pub area_weight: f64,
    pub span: Span,
    pub placement: Placement,
}

/// Global grid parameters plus every tile, in presentation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutPlan {
    pub columns: u32,
    /// Side of one square cell in pixels (row height and column width).
    pub cell_size: f64,
    pub gutter: f64,
    /// Grid rows the packed tiles occupy.
    pub rows: u32,
    pub estimated_height: f64,
    pub viewport: Viewport,
    pub outcome: SearchOutcome,
    /// Layout estimates the column search performed.
    pub iterations: u32,
    pub items: Vec<ScoredItem>,
    /// Identifiers dropped because their playtime was unusable.
    pub skipped: Vec<String>,
}

impl LayoutPlan {
    /// Plan for a library with nothing to show.
    pub fn empty(columns: u32, cell_size: f64, viewport: Viewport, config: &LayoutConfig) -> Self {
        Self {
            columns,
            cell_size,
            gutter: config.gutter,
            rows: 0,
            estimated_height: 0.0,
            viewport,
            outcome: SearchOutcome::Converged,
            iterations: 0,
            items: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn converged(&self) -> bool {
        self.outcome == SearchOutcome::Converged
    }

    /// Look up a tile by its source identifier.
    pub fn get(&self, identifier: &str) -> Option<&ScoredItem> {
        self.items.iter().find(|i| i.identifier == identifier)
    }

    /// Pixel width of all columns and inner gutters.
    pub fn grid_width(&self) -> f64 {
        extent(self.columns, self.cell_size, self.gutter)
    }

    /// Pixel rectangle `(x, y, w, h)` of a tile inside the grid.
    pub fn tile_rect(&self, item: &ScoredItem) -> (f64, f64, f64, f64) {
        let stride = self.cell_size + self.gutter;
        (
            f64::from(item.placement.column) * stride,
            f64::from(item.placement.row) * stride,
            extent(item.span.width, self.cell_size, self.gutter),
            extent(item.span.height, self.cell_size, self.gutter),
        )
    }

    /// Whether the estimated height sits inside the configured tolerance band.
    pub fn within_tolerance(&self, config: &LayoutConfig) -> bool {
        classify(self.estimated_height, self.viewport.height, config) == Fit::Within
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(id: &str, side: u32, column: u32, row: u32) -> ScoredItem {
        ScoredItem {
            identifier: id.into(),
            hours: 1.0,
            area_weight: 1.0,
            span: Span::square(side),
            placement: Placement { column, row },
        }
    }

    fn sample() -> LayoutPlan {
        let cfg = LayoutConfig::default();
        let mut plan = LayoutPlan::empty(3, 100.0, Viewport::new(316.0, 208.0), &cfg);
        plan.rows = 2;
        plan.estimated_height = 208.0;
        plan.iterations = 1;
        plan.items = vec![tile("a", 2, 0, 0), tile("b", 1, 2, 0), tile("c", 1, 2, 1)];
        plan
    }

    #[test]
    fn empty_plan_has_no_rows() {
        let cfg = LayoutConfig::default();
        let plan = LayoutPlan::empty(1, 50.0, Viewport::default(), &cfg);
        assert!(plan.is_empty());
        assert_eq!(plan.len(), 0);
        assert_eq!(plan.rows, 0);
        assert_eq!(plan.estimated_height, 0.0);
        assert!(plan.converged());
    }

    #[test]
    fn lookup_by_identifier() {
        let plan = sample();
        assert_eq!(plan.get("b").map(|t| t.span), Some(Span::UNIT));
        assert!(plan.get("zzz").is_none());
    }

    #[test]
    fn grid_width_includes_gutters() {
        // 3 * 100 + 2 * 8
        assert_eq!(sample().grid_width(), 316.0);
    }

    #[test]
    fn tile_rect_spans_gutters() {
        let plan = sample();
        assert_eq!(plan.tile_rect(&plan.items[0]), (0.0, 0.0, 208.0, 208.0));
        assert_eq!(plan.tile_rect(&plan.items[2]), (216.0, 108.0, 100.0, 100.0));
    }

    #[test]
    fn tolerance_check() {
        let cfg = LayoutConfig::default();
        let mut plan = sample();
        assert!(plan.within_tolerance(&cfg));
        plan.estimated_height = 400.0;
        assert!(!plan.within_tolerance(&cfg));
    }

    #[test]
    fn serializes_outcome_snake_case() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains("\"outcome\":\"converged\""));
        assert!(json.contains("\"identifier\":\"a\""));
    }
}
