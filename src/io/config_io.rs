use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::AppConfig;

/// File name looked up in the working directory when no --config is given.
pub const CONFIG_FILE: &str = "punchlist.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Load configuration. An explicit `path` must be readable; with no path,
/// `./punchlist.toml` is used when present and built-in defaults otherwise.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let p = PathBuf::from(CONFIG_FILE);
            if !p.exists() {
                return Ok(AppConfig::default());
            }
            p
        }
    };
    let text = fs::read_to_string(&path).map_err(|e| ConfigError::Read {
        path: path.clone(),
        source: e,
    })?;
    Ok(toml::from_str(&text)?)
}
