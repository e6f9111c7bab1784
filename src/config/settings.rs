//! Application settings and paths.
//!
//! Settings live in an optional JSON file under the XDG config directory
//! (`~/.config/portsweep/settings.json` on Linux). Port range and timeout
//! defaults are not settings; they are fixed constants in `config::scan`.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application directory paths following the XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/portsweep)
    pub config_dir: PathBuf,
}

impl Paths {
    /// Locate the platform directories. `None` when no home directory is known.
    pub fn discover() -> Option<Self> {
        ProjectDirs::from("", "", "portsweep").map(|project| Self {
            config_dir: project.config_dir().to_path_buf(),
        })
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

/// Application-wide settings. Every field is optional in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppSettings {
    /// Worker-pool size used when `--concurrency` is not given.
    pub concurrency: Option<usize>,
    /// Draw the progress bar in verbose mode even when stderr is not a terminal.
    pub progress: bool,
}

impl AppSettings {
    /// Load settings from an explicit file, or from the default location.
    ///
    /// A missing default file yields defaults; a missing explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> ConfigResult<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => match Paths::discover() {
                Some(paths) => Self::load_optional(&paths.settings_file()),
                None => {
                    debug!("no home directory, using default settings");
                    Ok(Self::default())
                }
            },
        }
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::parse(path, &content)
    }

    fn load_optional(path: &Path) -> ConfigResult<Self> {
        match fs::read_to_string(path) {
            Ok(content) => Self::parse(path, &content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "settings file not found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::ReadFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }),
        }
    }

    fn parse(path: &Path, content: &str) -> ConfigResult<Self> {
        let settings = serde_json::from_str(content).map_err(|e| ConfigError::InvalidFormat {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }
}
