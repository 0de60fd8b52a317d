use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const CONFIG_FILE: &str = "flatten-icons.json";

const DEFAULT_ICON_DIR: &str = "ios/Runner/Assets.xcassets/AppIcon.appiconset";
const DEFAULT_PATTERN: &str = "Icon-App-*.png";

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub icon_dir: PathBuf,
    pub pattern: String,
    /// RGB color the icons are flattened onto.
    pub background: [u8; 3],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            icon_dir: PathBuf::from(DEFAULT_ICON_DIR),
            pattern: DEFAULT_PATTERN.to_string(),
            background: [255, 255, 255],
        }
    }
}

/// Loads the config at `path`, or the defaults when no such file exists.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::debug!("no config at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)?;
    let config: Config = serde_json::from_str(&content)?;
    tracing::debug!(?config, "loaded config from {}", path.display());
    Ok(config)
}
