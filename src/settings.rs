//! Game settings and paths
//!
//! Read from a JSON file next to the game. Every field has a default, so a
//! partial file only overrides what it names and a missing file is fine.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::highscores::DEFAULT_HIGH_SCORE_PATH;
use crate::tuning::Tuning;

/// Settings file looked up when none is given on the command line
pub const DEFAULT_SETTINGS_PATH: &str = "trex-runner.json";
/// Log output (the terminal itself is taken by the game)
pub const DEFAULT_LOG_PATH: &str = "trex-runner.log";

/// Why a settings file could not be used
#[derive(Debug)]
pub enum SettingsError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "unreadable: {}", e),
            SettingsError::Json(e) => write!(f, "malformed: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {}

impl From<io::Error> for SettingsError {
    fn from(e: io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Json(e)
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Simulation balance
    pub tuning: Tuning,
    /// Fixed RNG seed; None picks one from the clock
    pub seed: Option<u64>,
    /// Where the best score is kept
    pub high_score_path: PathBuf,
    /// Where log records go
    pub log_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tuning: Tuning::default(),
            seed: None,
            high_score_path: PathBuf::from(DEFAULT_HIGH_SCORE_PATH),
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
        }
    }
}

impl Settings {
    /// Parse settings JSON, sanitizing the tuning values
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.tuning = settings.tuning.sanitized();
        Ok(settings)
    }

    /// Read settings from `path` as written, without repairing or logging
    /// anything. `Ok(None)` means there is no settings file.
    pub fn read(path: &Path) -> Result<Option<Self>, SettingsError> {
        match fs::read_to_string(path) {
            Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Settle the outcome of `read`: log where the settings came from and
    /// sanitize them, falling back to defaults on any problem. Call once a
    /// logger is installed.
    pub fn resolve(read: Result<Option<Self>, SettingsError>, path: &Path) -> Self {
        match read {
            Ok(Some(mut settings)) => {
                log::info!("Loaded settings from {}", path.display());
                settings.tuning = settings.tuning.sanitized();
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring settings in {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Log file named by a settings read, before it is resolved
    pub fn log_path_of(read: &Result<Option<Self>, SettingsError>) -> PathBuf {
        match read {
            Ok(Some(settings)) => settings.log_path.clone(),
            _ => PathBuf::from(DEFAULT_LOG_PATH),
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Configured seed, or one derived from the current time
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}
