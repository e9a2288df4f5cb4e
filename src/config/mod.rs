use serde::Deserialize;
use std::path::PathBuf;

use crate::geometry::bounds::{DEFAULT_VIEW_HEIGHT, DEFAULT_VIEW_WIDTH};
use crate::patcher::DEFAULT_OUTLINE_KEY;

pub const DEFAULT_UPDATES_PATH: &str = "scripts/generated-polygons.json";
pub const DEFAULT_DOCUMENT_PATH: &str = "src/data/territories.js";

fn default_updates() -> PathBuf {
    PathBuf::from(DEFAULT_UPDATES_PATH)
}
fn default_document() -> PathBuf {
    PathBuf::from(DEFAULT_DOCUMENT_PATH)
}
fn default_outline_key() -> String {
    DEFAULT_OUTLINE_KEY.to_string()
}
fn default_verbose() -> bool {
    false
}

#[derive(Debug, Deserialize)]
pub struct FileConfig {
    /// Polygon JSON written by the geometry generator
    #[serde(default = "default_updates")]
    pub updates: PathBuf,
    /// Territory data file to patch
    #[serde(default = "default_document")]
    pub document: PathBuf,
    #[serde(default = "default_outline_key")]
    pub outline_key: String,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
    #[serde(default)]
    pub view_box: ViewBoxConfig,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            updates: default_updates(),
            document: default_document(),
            outline_key: default_outline_key(),
            verbose: default_verbose(),
            view_box: ViewBoxConfig::default(),
        }
    }
}

fn default_view_width() -> f64 {
    DEFAULT_VIEW_WIDTH
}

fn default_view_height() -> f64 {
    DEFAULT_VIEW_HEIGHT
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct ViewBoxConfig {
    #[serde(default = "default_view_width")]
    pub width: f64,
    #[serde(default = "default_view_height")]
    pub height: f64,
}

impl Default for ViewBoxConfig {
    fn default() -> Self {
        Self {
            width: default_view_width(),
            height: default_view_height(),
        }
    }
}

impl FileConfig {
    /// Search the standard locations and return the first config that parses
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("terrapatch.toml"));
    paths.push(PathBuf::from(".terrapatch.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("terrapatch").join("config.toml"));
        paths.push(config_dir.join("terrapatch.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".terrapatch.toml"));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();

        assert_eq!(config.updates, PathBuf::from(DEFAULT_UPDATES_PATH));
        assert_eq!(config.document, PathBuf::from(DEFAULT_DOCUMENT_PATH));
        assert_eq!(config.outline_key, "outline");
        assert!(!config.verbose);
        assert_eq!(config.view_box.width, 1400.0);
        assert_eq!(config.view_box.height, 920.0);
    }

    #[test]
    fn test_partial_config() {
        let config: FileConfig = toml::from_str(
            r#"
            document = "data/map.js"
            outline_key = "polygon"

            [view_box]
            height = 1000.0
            "#,
        )
        .unwrap();

        assert_eq!(config.document, PathBuf::from("data/map.js"));
        assert_eq!(config.updates, PathBuf::from(DEFAULT_UPDATES_PATH));
        assert_eq!(config.outline_key, "polygon");
        assert_eq!(config.view_box.width, 1400.0);
        assert_eq!(config.view_box.height, 1000.0);
    }

    #[test]
    fn test_config_paths_start_in_working_dir() {
        let paths = get_config_paths();
        assert_eq!(paths[0], PathBuf::from("terrapatch.toml"));
        assert_eq!(paths[1], PathBuf::from(".terrapatch.toml"));
    }
}
