use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "TWODO_DATA_DIR";
/// Config file name inside the data directory
pub const CONFIG_FILE: &str = "config.toml";

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config.toml: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Resolve the data directory.
///
/// Order: explicit override, `TWODO_DATA_DIR`, `$XDG_DATA_HOME/twodo`,
/// `$HOME/.local/share/twodo`.
pub fn data_dir(override_dir: Option<&str>) -> PathBuf {
    let env_dir = std::env::var(DATA_DIR_ENV).ok().filter(|s| !s.is_empty());
    let xdg = std::env::var("XDG_DATA_HOME").ok().filter(|s| !s.is_empty());
    let home = std::env::var("HOME").ok();
    resolve_data_dir(override_dir, env_dir.as_deref(), xdg.as_deref(), home.as_deref())
}

fn resolve_data_dir(
    override_dir: Option<&str>,
    env_dir: Option<&str>,
    xdg_data_home: Option<&str>,
    home: Option<&str>,
) -> PathBuf {
    if let Some(dir) = override_dir.or(env_dir) {
        return PathBuf::from(dir);
    }
    if let Some(xdg) = xdg_data_home {
        return PathBuf::from(xdg).join("twodo");
    }
    PathBuf::from(home.unwrap_or("/"))
        .join(".local")
        .join("share")
        .join("twodo")
}

/// Read config.toml from the data directory. A missing file yields defaults.
pub fn read_config(data_dir: &Path) -> Result<Config, ConfigError> {
    let path = data_dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(Config::default());
    }
    let text = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    let config: Config = toml::from_str(&text)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}
