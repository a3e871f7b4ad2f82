//! Height-aware column-count search.
//!
//! A bounded local search: start from the column count implied by the
//! desired card width, estimate the packed height, and step one column at a
//! time toward the viewport height. This is a heuristic. It does not look
//! for the best column count, only for one whose estimate lands inside the
//! tolerance band. It gives up when the iteration budget runs out, a bound
//! pins it, or it steps back onto a column count it already tried, and then
//! keeps the best estimate it saw (see [`preferable`]).

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use mosaic_types::config::LayoutConfig;
use mosaic_types::item::Viewport;

use crate::pack::{Packing, pack};
use crate::span::{Span, assign_spans};

/// Cells never shrink below one pixel, whatever the gutter does.
const MIN_CELL_SIZE: f64 = 1.0;

/// How the search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOutcome {
    /// The estimate landed inside the tolerance band.
    Converged,
    /// Budget exhausted, pinned at a column bound, or oscillating between
    /// column counts; the best estimate seen is kept.
    Accepted,
}

/// Where an estimated height falls relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fit {
    /// Taller than the overflow tolerance allows.
    Overflow,
    Within,
    /// Leaves more empty space than the slack tolerance allows.
    Slack,
}

/// One evaluated column count.
#[derive(Debug, Clone, PartialEq)]
pub struct GridEstimate {
    pub columns: u32,
    pub cell_size: f64,
    /// Span limit used for this estimate (see [`fit_spans`]).
    pub span_cap: u32,
    /// Spans in presentation order.
    pub spans: Vec<Span>,
    pub packing: Packing,
    pub height: f64,
}

/// Final state of a search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub estimate: GridEstimate,
    pub outcome: SearchOutcome,
    /// Number of estimates computed, at most `max_iterations`.
    pub iterations: u32,
}

/// Inclusive column-count range for `item_count` items.
///
/// More columns than items only adds empty tracks, so the item count caps
/// the range alongside the configured hard cap.
pub fn column_bounds(item_count: usize, config: &LayoutConfig) -> (u32, u32) {
    let lower = config.min_columns.max(1);
    let count = u32::try_from(item_count).unwrap_or(u32::MAX);
    let upper = count.min(config.max_columns).max(lower);
    (lower, upper)
}

/// Column count implied by the desired card width, clamped to the bounds.
pub fn initial_columns(viewport_width: f64, item_count: usize, config: &LayoutConfig) -> u32 {
    let (lower, upper) = column_bounds(item_count, config);
    let guess = (viewport_width / config.desired_card_width).round();
    // Float-to-int casts saturate, so huge or NaN guesses still clamp.
    (guess as u32).clamp(lower, upper)
}

/// Side of one square cell once gutters are taken out of the width.
pub fn cell_size(viewport_width: f64, columns: u32, gutter: f64) -> f64 {
    let columns = columns.max(1);
    let gutters = f64::from(columns - 1) * gutter;
    ((viewport_width - gutters) / f64::from(columns)).max(MIN_CELL_SIZE)
}

/// Pixel length of `cells` consecutive cells with gutters between them.
pub fn extent(cells: u32, cell: f64, gutter: f64) -> f64 {
    if cells == 0 {
        return 0.0;
    }
    f64::from(cells) * cell + f64::from(cells - 1) * gutter
}

/// Whole cell rows (with their gutters) that fit in the viewport height.
pub fn rows_in_view(viewport_height: f64, cell: f64, gutter: f64) -> u32 {
    (((viewport_height + gutter) / (cell + gutter)).floor() as u32).max(1)
}

/// Assign spans under the largest cap that suits this column count.
///
/// The cap never exceeds the grid width or the rows the viewport can show,
/// and is lowered until the total tile area fits in the visible cells.
/// Returns the cap together with the spans it produced.
pub fn fit_spans(
    weights: &[f64],
    columns: u32,
    viewport: &Viewport,
    cell: f64,
    config: &LayoutConfig,
) -> (u32, Vec<Span>) {
    let visible_rows = rows_in_view(viewport.height, cell, config.gutter);
    let upper = config.max_span.min(columns).min(visible_rows).max(1);
    let budget = u64::from(columns) * u64::from(visible_rows);

    for cap in (2..=upper).rev() {
        let spans = assign_spans(weights, cap, config);
        let area: u64 = spans.iter().map(|s| u64::from(s.cells())).sum();
        if area <= budget {
            return (cap, spans);
        }
    }
    (1, assign_spans(weights, 1, config))
}

/// Classify an estimated height against the tolerance band.
pub fn classify(height: f64, viewport_height: f64, config: &LayoutConfig) -> Fit {
    if height > viewport_height * (1.0 + config.overflow_tolerance) {
        Fit::Overflow
    } else if height < viewport_height * (1.0 - config.slack_tolerance) {
        Fit::Slack
    } else {
        Fit::Within
    }
}

/// Assign spans and simulate packing at a fixed column count.
///
/// `weights` must already be in presentation order.
pub fn estimate(
    weights: &[f64],
    columns: u32,
    viewport: &Viewport,
    config: &LayoutConfig,
) -> GridEstimate {
    let cell = cell_size(viewport.width, columns, config.gutter);
    let (cap, spans) = fit_spans(weights, columns, viewport, cell, config);
    let packing = pack(&spans, columns, config.packing);
    let height = extent(packing.rows, cell, config.gutter);

    GridEstimate {
        columns,
        cell_size: cell,
        span_cap: cap,
        spans,
        packing,
        height,
    }
}

/// Whether `candidate` is a better fallback than `incumbent`.
///
/// An estimate that stays within the overflow tolerance beats one that
/// overflows; otherwise the height closer to the viewport wins. Ties keep the
/// incumbent.
pub fn preferable(
    candidate: &GridEstimate,
    incumbent: &GridEstimate,
    viewport_height: f64,
    config: &LayoutConfig,
) -> bool {
    let key = |e: &GridEstimate| {
        (
            classify(e.height, viewport_height, config) == Fit::Overflow,
            (e.height - viewport_height).abs(),
        )
    };
    let (cand_over, cand_dist) = key(candidate);
    let (inc_over, inc_dist) = key(incumbent);
    match cand_over.cmp(&inc_over) {
        Ordering::Less => true,
        Ordering::Greater => false,
        Ordering::Equal => cand_dist < inc_dist,
    }
}

/// Search for a column count whose packed height fits the viewport.
pub fn search_columns(weights: &[f64], viewport: &Viewport, config: &LayoutConfig) -> SearchResult {
    let (lower, upper) = column_bounds(weights.len(), config);
    let budget = config.max_iterations.max(1);
    let mut columns = initial_columns(viewport.width, weights.len(), config);
    let mut iterations = 0;
    let mut tried: Vec<u32> = Vec::with_capacity(budget as usize);
    let mut kept: Option<GridEstimate> = None;

    loop {
        let current = estimate(weights, columns, viewport, config);
        iterations += 1;
        tried.push(columns);

        let fit = classify(current.height, viewport.height, config);
        log::debug!(
            "column search #{iterations}: {columns} cols, cell {:.1}px, cap {}, {} rows, {:.1}px ({fit:?})",
            current.cell_size,
            current.span_cap,
            current.packing.rows,
            current.height,
        );

        let next = match fit {
            Fit::Within => {
                return SearchResult {
                    estimate: current,
                    outcome: SearchOutcome::Converged,
                    iterations,
                };
            },
            Fit::Overflow => columns.saturating_add(1).min(upper),
            Fit::Slack => columns.saturating_sub(1).max(lower),
        };

        let best = match kept.take() {
            Some(prev) if !preferable(&current, &prev, viewport.height, config) => prev,
            _ => current,
        };

        // A revisited count would only replay an earlier estimate.
        if iterations >= budget || next == columns || tried.contains(&next) {
            log::debug!(
                "column search stopped unconverged at {columns} cols after {iterations} estimates, keeping {} cols",
                best.columns
            );
            return SearchResult {
                estimate: best,
                outcome: SearchOutcome::Accepted,
                iterations,
            };
        }
        kept = Some(best);
        columns = next;
    }
}
