//! On-disk configuration.
//!
//! A config file is JSON in one of two shapes:
//!
//! ```json
//! { "displayDate": true, "displayFilename": true }
//! ```
//!
//! or a `package.json`-style manifest carrying the same object under a
//! `"herald"` key. Unknown keys are ignored.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::config::InstanceConfig;
use crate::error::{HeraldError, HeraldResult};

/// Dedicated config file name searched for in each directory.
pub const CONFIG_FILE_NAME: &str = "herald.json";

/// Manifest file that may embed the config under [`MANIFEST_KEY`].
pub const MANIFEST_FILE_NAME: &str = "package.json";

/// Key holding the config inside a manifest.
pub const MANIFEST_KEY: &str = "herald";

/// Load a config layer from `path`.
pub fn load(path: impl AsRef<Path>) -> HeraldResult<InstanceConfig> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&text).map_err(|source| HeraldError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;

    let section = match value.get(MANIFEST_KEY) {
        Some(section) => section.clone(),
        None => value,
    };
    serde_json::from_value(section).map_err(|source| HeraldError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Find the nearest config file at or above `start`.
///
/// In each directory `herald.json` wins over a `package.json` with a
/// `herald` key. When the walk finds nothing, `<config_dir>/herald/config.json`
/// is used if it exists.
pub fn discover(start: impl AsRef<Path>) -> Option<PathBuf> {
    for dir in start.as_ref().ancestors() {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        let manifest = dir.join(MANIFEST_FILE_NAME);
        if manifest.is_file() && manifest_has_section(&manifest) {
            return Some(manifest);
        }
    }

    user_config_path().filter(|p| p.is_file())
}

/// Discover and load, treating "nothing found" as an empty layer.
pub fn load_discovered(start: impl AsRef<Path>) -> HeraldResult<InstanceConfig> {
    match discover(start) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config file");
            load(path)
        }
        None => Ok(InstanceConfig::EMPTY),
    }
}

/// `<config_dir>/herald/config.json`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("herald").join("config.json"))
}

fn manifest_has_section(path: &Path) -> bool {
    fs::read_to_string(path)
        .ok()
        .and_then(|text| serde_json::from_str::<Value>(&text).ok())
        .map(|value| value.get(MANIFEST_KEY).is_some())
        .unwrap_or(false)
}
