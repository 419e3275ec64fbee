//! High score persistence
//!
//! The best score is a single non-negative integer stored as plain decimal
//! text. A missing record is not an error: it means no run has been saved
//! yet, and loads as 0. A malformed record is treated the same way.

use std::fs;
use std::io;
use std::path::PathBuf;

/// Default file name, relative to the working directory
pub const DEFAULT_HIGH_SCORE_PATH: &str = "high_score.txt";

/// Storage backend for the best score
pub trait HighScoreStore {
    /// Stored best score, or 0 when there is none
    fn load(&mut self) -> u64;

    /// Overwrite the stored best score
    fn save(&mut self, score: u64) -> io::Result<()>;
}

/// Parse a stored record (surrounding whitespace allowed)
pub fn parse_high_score(text: &str) -> Option<u64> {
    text.trim().parse().ok()
}

/// High score kept in a text file
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Sibling file the record is written to before being renamed into place
    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&mut self) -> u64 {
        match fs::read_to_string(&self.path) {
            Ok(text) => match parse_high_score(&text) {
                Some(score) => {
                    log::info!("Loaded high score {} from {}", score, self.path.display());
                    score
                }
                None => {
                    log::warn!(
                        "Ignoring malformed high score record in {}",
                        self.path.display()
                    );
                    0
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No high score found, starting fresh");
                0
            }
            Err(e) => {
                log::warn!("Could not read {}: {}", self.path.display(), e);
                0
            }
        }
    }

    fn save(&mut self, score: u64) -> io::Result<()> {
        let tmp = self.tmp_path();
        fs::write(&tmp, score.to_string())?;
        fs::rename(&tmp, &self.path)?;
        log::info!("High score {} saved to {}", score, self.path.display());
        Ok(())
    }
}

/// In-memory store for headless runs and tests; records every save
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    value: Option<u64>,
    saves: Vec<u64>,
    fail_saves: bool,
}

impl MemoryHighScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing record
    pub fn with_score(score: u64) -> Self {
        Self {
            value: Some(score),
            ..Default::default()
        }
    }

    /// A store whose saves always fail
    pub fn failing() -> Self {
        Self {
            fail_saves: true,
            ..Default::default()
        }
    }

    /// Every successfully saved value, oldest first
    pub fn saves(&self) -> &[u64] {
        &self.saves
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&mut self) -> u64 {
        self.value.unwrap_or(0)
    }

    fn save(&mut self, score: u64) -> io::Result<()> {
        if self.fail_saves {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only store"));
        }
        self.value = Some(score);
        self.saves.push(score);
        Ok(())
    }
}
