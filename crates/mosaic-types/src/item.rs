//! Library items and the target viewport.

use serde::{Deserialize, Serialize};

use crate::error::{MosaicError, Result};

/// One game in the user's library.
///
/// `hours` is the raw weight. The upstream fetch layer is expected to have
/// dropped sub-threshold playtime already, but nothing here enforces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Opaque key (app id, slug, whatever the caller resolved).
    pub identifier: String,
    /// Hours played.
    #[serde(rename = "hoursPlayed", alias = "hours")]
    pub hours: f64,
}

impl Item {
    pub fn new(identifier: impl Into<String>, hours: f64) -> Self {
        Self {
            identifier: identifier.into(),
            hours,
        }
    }

    /// Negative, NaN and infinite playtimes cannot be laid out.
    pub fn has_valid_weight(&self) -> bool {
        self.hours.is_finite() && self.hours >= 0.0
    }

    /// Return [`MosaicError::InvalidWeight`] when the playtime is unusable.
    pub fn check_weight(&self) -> Result<()> {
        if self.has_valid_weight() {
            Ok(())
        } else {
            Err(MosaicError::InvalidWeight {
                identifier: self.identifier.clone(),
                hours: self.hours,
            })
        }
    }
}

/// Pixel dimensions of the area the mosaic is laid out into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both sides must be finite and strictly positive.
    pub fn validate(&self) -> Result<()> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(MosaicError::InvalidViewport {
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Parse a `WIDTHxHEIGHT` string such as `1200x800`.
    pub fn parse(s: &str) -> Option<Self> {
        let (w, h) = s.trim().split_once(['x', 'X'])?;
        let width = w.trim().parse().ok()?;
        let height = h.trim().parse().ok()?;
        Some(Self { width, height })
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}
