//! Printable forms of a [`LayoutPlan`]: a text summary with an ASCII
//! preview, a CSS grid stylesheet, and JSON.

use mosaic_layout::{LayoutPlan, SearchOutcome};

/// Tile labels for the ASCII preview; reused cyclically past 62 tiles.
const LABELS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Preview rows printed before the rest is elided.
const MAX_PREVIEW_ROWS: u32 = 48;

const CSS_CONTAINER: &str = ".mosaic";

fn label(index: usize) -> char {
    char::from(LABELS[index % LABELS.len()])
}

/// Format a pixel length with at most two decimals and no trailing zeros.
fn px(value: f64) -> String {
    let s = format!("{value:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    format!("{s}px")
}

/// Summary, tile table and ASCII preview.
pub fn render_text(plan: &LayoutPlan) -> String {
    let outcome = match plan.outcome {
        SearchOutcome::Converged => "converged",
        SearchOutcome::Accepted => "accepted",
    };
    let mut lines = Vec::new();
    lines.push(format!(
        "Mosaic: {} games, {} columns x {} rows, cell {:.1}px, grid {:.0}x{:.0}px of {:.0}x{:.0}px ({outcome} after {} estimates)",
        plan.len(),
        plan.columns,
        plan.rows,
        plan.cell_size,
        plan.grid_width(),
        plan.estimated_height,
        plan.viewport.width,
        plan.viewport.height,
        plan.iterations,
    ));
    if !plan.skipped.is_empty() {
        lines.push(format!(
            "Skipped {} with unusable playtime: {}",
            plan.skipped.len(),
            plan.skipped.join(", ")
        ));
    }
    if plan.is_empty() {
        return lines.join("\n");
    }

    lines.push(String::new());
    lines.push("  tile  span   at         px (x,y size)      hours  game".to_string());
    for (i, item) in plan.items.iter().enumerate() {
        let span = format!("{}x{}", item.span.width, item.span.height);
        let at = format!("({},{})", item.placement.column, item.placement.row);
        let (x, y, w, _) = plan.tile_rect(item);
        let rect = format!("{x:.0},{y:.0} {w:.0}");
        lines.push(format!(
            "  {:<4}  {span:<5}  {at:<9}  {rect:<17}  {:>6.1}  {}",
            label(i),
            item.hours,
            item.identifier
        ));
    }

    lines.push(String::new());
    lines.extend(preview(plan));
    lines.join("\n")
}

/// Character map of the grid, one line per row, `.` for gaps.
fn preview(plan: &LayoutPlan) -> Vec<String> {
    let columns = plan.columns as usize;
    let shown = plan.rows.min(MAX_PREVIEW_ROWS) as usize;
    let mut cells = vec!['.'; columns * shown];

    for (i, item) in plan.items.iter().enumerate() {
        let col0 = item.placement.column as usize;
        let row0 = item.placement.row as usize;
        let col1 = (col0 + item.span.width as usize).min(columns);
        let row1 = (row0 + item.span.height as usize).min(shown);
        for row in row0..row1 {
            for col in col0..col1 {
                cells[row * columns + col] = label(i);
            }
        }
    }

    let mut lines: Vec<String> = cells
        .chunks(columns.max(1))
        .map(|row| row.iter().collect())
        .collect();
    if plan.rows > MAX_PREVIEW_ROWS {
        lines.push(format!("... {} more rows", plan.rows - MAX_PREVIEW_ROWS));
    }
    lines
}

/// CSS grid rules placing every tile explicitly, keyed by `data-id`.
pub fn render_css(plan: &LayoutPlan) -> String {
    let mut lines = vec![
        format!("{CSS_CONTAINER} {{"),
        "  display: grid;".to_string(),
        format!("  width: {};", px(plan.grid_width())),
        format!(
            "  grid-template-columns: repeat({}, {});",
            plan.columns,
            px(plan.cell_size)
        ),
        format!("  grid-auto-rows: {};", px(plan.cell_size)),
        format!("  gap: {};", px(plan.gutter)),
        "}".to_string(),
    ];

    for item in &plan.items {
        // Grid lines are 1-based.
        lines.push(format!(
            "{CSS_CONTAINER} > [data-id=\"{}\"] {{ grid-column: {} / span {}; grid-row: {} / span {}; }}",
            css_escape(&item.identifier),
            item.placement.column + 1,
            item.span.width,
            item.placement.row + 1,
            item.span.height,
        ));
    }
    lines.join("\n")
}

fn css_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '"' | '\\' => {
                out.push('\\');
                out.push(ch);
            },
            '\n' => out.push_str("\\a "),
            _ => out.push(ch),
        }
    }
    out
}

pub fn render_json(plan: &LayoutPlan) -> serde_json::Result<String> {
    serde_json::to_string_pretty(plan)
}
