//! Layout configuration.
//!
//! Every field has a default, so a config file only needs to name the values
//! it overrides:
//!
//! ```toml
//! [layout]
//! max_span = 8
//! packing = "dense"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MosaicError, Result};

/// How the packing simulation chooses a slot for each tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackingMode {
    /// First free footprint from the top-left (`grid-auto-flow: row dense`).
    /// Backfills holes left by large tiles.
    Dense,
    /// Forward-only cursor that wraps to the next row when the current one
    /// lacks room (`grid-auto-flow: row`).
    #[default]
    Sparse,
}

/// Order in which tiles are handed to the packer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationOrder {
    /// Heaviest first, ties broken by input position.
    #[default]
    ByWeight,
    /// As supplied by the caller.
    Input,
}

/// Tuning knobs for the grid layout engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Target tile width in pixels used to seed the column search.
    pub desired_card_width: f64,
    /// Largest span side, in cells.
    pub max_span: u32,
    /// How many of the heaviest items get a span boost.
    pub top_k_boost_count: usize,
    /// Cells added to each boosted span side.
    pub boost_increment: u32,
    /// Fraction of the viewport height the grid may overshoot.
    pub overflow_tolerance: f64,
    /// Fraction of the viewport height that may stay empty.
    pub slack_tolerance: f64,
    /// Upper bound on layout estimates per search.
    pub max_iterations: u32,
    pub min_columns: u32,
    /// Hard cap on columns, independent of item count.
    pub max_columns: u32,
    /// Spacing between cells in pixels.
    pub gutter: f64,
    /// Added to hours before softening so zero playtime keeps a weight.
    pub weight_offset: f64,
    /// Softening exponent applied to playtime.
    pub weight_exponent: f64,
    pub packing: PackingMode,
    pub order: PresentationOrder,
    /// Fail the whole layout on a bad weight instead of skipping the item.
    pub reject_invalid_weights: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            desired_card_width: 180.0,
            max_span: 12,
            top_k_boost_count: 3,
            boost_increment: 1,
            overflow_tolerance: 0.05,
            slack_tolerance: 0.25,
            max_iterations: 10,
            min_columns: 1,
            max_columns: 64,
            gutter: 8.0,
            weight_offset: 0.1,
            weight_exponent: 0.62,
            packing: PackingMode::Sparse,
            order: PresentationOrder::ByWeight,
            reject_invalid_weights: false,
        }
    }
}

impl LayoutConfig {
    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: String| Err(MosaicError::Config(msg));

        if !(self.desired_card_width.is_finite() && self.desired_card_width > 0.0) {
            return fail(format!(
                "desired_card_width must be positive, got {}",
                self.desired_card_width
            ));
        }
        if self.max_span == 0 {
            return fail("max_span must be at least 1".into());
        }
        if !(self.overflow_tolerance.is_finite() && self.overflow_tolerance >= 0.0) {
            return fail(format!(
                "overflow_tolerance must be non-negative, got {}",
                self.overflow_tolerance
            ));
        }
        if !(0.0..1.0).contains(&self.slack_tolerance) {
            return fail(format!(
                "slack_tolerance must be in [0, 1), got {}",
                self.slack_tolerance
            ));
        }
        if self.max_iterations == 0 {
            return fail("max_iterations must be at least 1".into());
        }
        if self.min_columns == 0 {
            return fail("min_columns must be at least 1".into());
        }
        if self.max_columns < self.min_columns {
            return fail(format!(
                "max_columns ({}) is below min_columns ({})",
                self.max_columns, self.min_columns
            ));
        }
        if !(self.gutter.is_finite() && self.gutter >= 0.0) {
            return fail(format!("gutter must be non-negative, got {}", self.gutter));
        }
        if !(self.weight_offset.is_finite() && self.weight_offset > 0.0) {
            return fail(format!(
                "weight_offset must be positive, got {}",
                self.weight_offset
            ));
        }
        if !(self.weight_exponent > 0.0 && self.weight_exponent <= 1.0) {
            return fail(format!(
                "weight_exponent must be in (0, 1], got {}",
                self.weight_exponent
            ));
        }
        Ok(())
    }

    /// Parse a config file body. The layout settings live under `[layout]`;
    /// a file without that table yields the defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        #[derive(Deserialize)]
        struct ConfigFile {
            #[serde(default)]
            layout: LayoutConfig,
        }

        let file: ConfigFile = toml::from_str(toml_str)
            .map_err(|e| MosaicError::Config(format!("mosaic.toml: {e}")))?;
        file.layout.validate()?;
        Ok(file.layout)
    }

    /// Read and parse a config file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let body = std::fs::read_to_string(path)
            .map_err(|e| MosaicError::Config(format!("{}: {e}", path.display())))?;
        let config = Self::from_toml(&body)?;
        log::debug!("Loaded layout config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_are_sensible() {
        let cfg = LayoutConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.max_span, 12);
        assert_eq!(cfg.top_k_boost_count, 3);
        assert_eq!(cfg.boost_increment, 1);
        assert_eq!(cfg.max_iterations, 10);
        assert_eq!(cfg.min_columns, 1);
        assert!((cfg.weight_offset - 0.1).abs() < f64::EPSILON);
        assert!((cfg.weight_exponent - 0.62).abs() < f64::EPSILON);
        assert_eq!(cfg.packing, PackingMode::Sparse);
        assert_eq!(cfg.order, PresentationOrder::ByWeight);
        assert!(!cfg.reject_invalid_weights);
    }

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(LayoutConfig::from_toml("").unwrap(), LayoutConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg = LayoutConfig::from_toml(
            r#"
[layout]
max_span = 6
packing = "dense"
order = "input"
"#,
        )
        .unwrap();
        assert_eq!(cfg.max_span, 6);
        assert_eq!(cfg.packing, PackingMode::Dense);
        assert_eq!(cfg.order, PresentationOrder::Input);
        assert_eq!(cfg.max_iterations, LayoutConfig::default().max_iterations);
    }

    #[test]
    fn unknown_field_is_config_error() {
        let err = LayoutConfig::from_toml("[layout]\nmax_spam = 3\n").unwrap_err();
        assert!(matches!(err, MosaicError::Config(_)));
        assert!(format!("{err}").contains("max_spam"));
    }

    #[test]
    fn invalid_values_rejected() {
        let cases = [
            "[layout]\nmax_span = 0\n",
            "[layout]\nmax_iterations = 0\n",
            "[layout]\nslack_tolerance = 1.0\n",
            "[layout]\ndesired_card_width = 0.0\n",
            "[layout]\nmin_columns = 4\nmax_columns = 2\n",
            "[layout]\nweight_exponent = 1.5\n",
            "[layout]\nweight_offset = 0.0\n",
            "[layout]\ngutter = -1.0\n",
        ];
        for case in cases {
            assert!(
                matches!(LayoutConfig::from_toml(case), Err(MosaicError::Config(_))),
                "expected config error for {case:?}"
            );
        }
    }

    #[test]
    fn load_missing_file_is_config_error() {
        let err = LayoutConfig::load(Path::new("/nonexistent/mosaic.toml")).unwrap_err();
        assert!(matches!(err, MosaicError::Config(_)));
        assert!(format!("{err}").contains("/nonexistent/mosaic.toml"));
    }

    #[test]
    fn load_reads_layout_table_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mosaic.toml");
        std::fs::write(&path, "[layout]\ngutter = 4.0\n").unwrap();
        assert_eq!(LayoutConfig::load(&path).unwrap().gutter, 4.0);
    }

    #[test]
    fn load_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mosaic.toml");
        std::fs::write(&path, "[layout\nmax_span = ").unwrap();
        let err = LayoutConfig::load(&path).unwrap_err();
        assert!(matches!(err, MosaicError::Config(_)), "{err:?}");
        assert!(format!("{err}").starts_with("config error: mosaic.toml:"));
    }
}
