use anyhow::{Context, Result};
use std::path::Path;

use crate::domain::UpdateSet;

/// Parse generated polygon JSON into an update set
///
/// Expects an object keyed by territory id. Keys the patcher does not use
/// (bounding boxes, areas, ...) are ignored.
pub fn parse_updates(json: &str) -> Result<UpdateSet> {
    serde_json::from_str(json).context("Failed to parse polygon JSON")
}

/// Load the update set written by the polygon generator
pub fn load_updates(path: &Path) -> Result<UpdateSet> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read polygon file: {}", path.display()))?;
    parse_updates(&contents).with_context(|| format!("Invalid polygon file: {}", path.display()))
}
