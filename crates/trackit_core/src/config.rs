//! User preferences loaded from a JSON file.
//!
//! # Invariants
//! - A missing preferences file yields `UserPrefs::default()`.
//! - Missing keys fall back to their defaults, so older files keep loading.

use crate::logging::default_log_level;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

/// Default location of the preferences file, relative to the working directory.
pub const DEFAULT_PREFS_PATH: &str = "preferences.json";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "malformed preferences file: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Host-level settings: where data and logs live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPrefs {
    /// Track JSON file.
    pub track_file_path: PathBuf,
    /// One of trace|debug|info|warn|error.
    pub log_level: String,
    /// Log directory; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl Default for UserPrefs {
    fn default() -> Self {
        Self {
            track_file_path: PathBuf::from("data").join("trackit.json"),
            log_level: default_log_level().to_string(),
            log_dir: Some(PathBuf::from("logs")),
        }
    }
}

impl UserPrefs {
    /// Loads preferences from `path`, or defaults when the file is absent.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            info!("event=prefs_load module=config status=missing using=defaults");
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        match serde_json::from_str::<Self>(&text) {
            Ok(prefs) => {
                info!("event=prefs_load module=config status=ok");
                Ok(prefs)
            }
            Err(err) => {
                warn!("event=prefs_load module=config status=error error={err}");
                Err(err.into())
            }
        }
    }

    /// Writes preferences as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::UserPrefs;
    use std::path::PathBuf;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = UserPrefs::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(prefs, UserPrefs::default());
    }

    #[test]
    fn partial_file_fills_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, r#"{ "track_file_path": "custom/track.json" }"#).unwrap();

        let prefs = UserPrefs::load(&path).unwrap();
        assert_eq!(prefs.track_file_path, PathBuf::from("custom/track.json"));
        assert_eq!(prefs.log_level, UserPrefs::default().log_level);
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");
        let prefs = UserPrefs {
            track_file_path: PathBuf::from("elsewhere.json"),
            log_level: "warn".to_string(),
            log_dir: None,
        };

        prefs.save(&path).unwrap();
        assert_eq!(UserPrefs::load(&path).unwrap(), prefs);
    }
}
