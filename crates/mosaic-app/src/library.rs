//! Loading a game library from disk.
//!
//! Two formats are accepted: a JSON array of
//! `{ "identifier": ..., "hoursPlayed": ... }` objects, or a TOML file with
//! one `[[game]]` table per entry.

use std::path::Path;

use serde::Deserialize;

use mosaic_types::error::{MosaicError, Result};
use mosaic_types::item::Item;

/// Parse a JSON library (array of items).
pub fn parse_library_json(json: &str) -> Result<Vec<Item>> {
    serde_json::from_str(json).map_err(|e| MosaicError::Library(format!("JSON library: {e}")))
}

/// Parse a TOML library (`[[game]]` tables).
pub fn parse_library_toml(toml_str: &str) -> Result<Vec<Item>> {
    #[derive(Deserialize)]
    struct LibraryFile {
        #[serde(default)]
        game: Vec<Item>,
    }

    let file: LibraryFile = toml::from_str(toml_str)
        .map_err(|e| MosaicError::Library(format!("TOML library: {e}")))?;
    Ok(file.game)
}

/// Read a library file, picking the parser from the extension
/// (`.toml` for TOML, anything else is treated as JSON).
pub fn load_library(path: &Path) -> Result<Vec<Item>> {
    let body = std::fs::read_to_string(path)
        .map_err(|e| MosaicError::Library(format!("{}: {e}", path.display())))?;
    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let parsed = if is_toml {
        parse_library_toml(&body)
    } else {
        parse_library_json(&body)
    };
    parsed.map_err(|e| match e {
        MosaicError::Library(msg) => MosaicError::Library(format!("{}: {msg}", path.display())),
        other => other,
    })
}

/// Drop games played for less than `min_hours`.
///
/// Entries with unusable playtimes are kept so the layout engine's
/// invalid-weight policy sees them.
pub fn filter_min_hours(mut items: Vec<Item>, min_hours: f64) -> Vec<Item> {
    items.retain(|i| !i.has_valid_weight() || i.hours >= min_hours);
    items
}
