//! Persisted dashboard preferences.

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Whether the dashboard has been opened before on this machine.
    pub visited: bool,
    /// Backend base URL remembered from a previous session.
    pub api_url: Option<String>,
}

impl Config {
    /// Create Config with the given flags.
    pub fn new(visited: bool, api_url: Option<String>) -> Self {
        Config { visited, api_url }
    }

    /// Loads configuration from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Loads the configuration, or the defaults when the file is missing or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("Ignoring unreadable config at {}: {}", path.display(), e);
                }
                Config::default()
            }
        }
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if writing to file fails or serialization fails.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Removes the configuration file. A missing file is not an error.
    pub fn clear(path: &Path) -> Result<(), std::io::Error> {
        match fs::remove_file(path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

/// Path of the config file, `~/.ledger-dashboard/config.json`.
pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
    let home = home::home_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine the home directory",
        )
    })?;
    Ok(home.join(".ledger-dashboard").join("config.json"))
}
