//! Best score persistence
//!
//! The game only ever stores one number. Stores report failures as
//! `StoreError`; callers log them and keep playing.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::best_score::BestScore;
use crate::error::StoreError;

/// Application name used for the platform config directory
pub const APP_NAME: &str = "wrist-flap";
/// File name of the best score record
pub const BEST_SCORE_FILE: &str = "best_score.json";

/// Where the best score lives
pub trait ScoreStore {
    /// Stored best score, 0 when nothing has been saved yet
    fn load_best(&self) -> Result<u32, StoreError>;

    fn save_best(&mut self, score: u32) -> Result<(), StoreError>;
}

impl<T: ScoreStore + ?Sized> ScoreStore for Box<T> {
    fn load_best(&self) -> Result<u32, StoreError> {
        (**self).load_best()
    }

    fn save_best(&mut self, score: u32) -> Result<(), StoreError> {
        (**self).save_best(score)
    }
}

/// In-process store for tests and throwaway runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: BestScore,
    /// Number of successful saves
    pub saves: u32,
}

impl MemoryStore {
    pub fn new(best_score: u32) -> Self {
        Self {
            best: BestScore::new(best_score),
            saves: 0,
        }
    }
}

impl ScoreStore for MemoryStore {
    fn load_best(&self) -> Result<u32, StoreError> {
        Ok(self.best.score)
    }

    fn save_best(&mut self, score: u32) -> Result<(), StoreError> {
        self.best = BestScore::new(score);
        self.saves += 1;
        Ok(())
    }
}

/// `BestScore` as a JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the platform config directory
    ///
    /// The directory is created if needed.
    pub fn in_config_dir() -> Result<Self, StoreError> {
        let project_dirs = ProjectDirs::from("", "", APP_NAME).ok_or(StoreError::NoConfigDir)?;
        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;
        Ok(Self::new(config_dir.join(BEST_SCORE_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonFileStore {
    fn load_best(&self) -> Result<u32, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No best score at {}, starting fresh", self.path.display());
                return Ok(0);
            }
            Err(e) => return Err(e.into()),
        };
        let record: BestScore = serde_json::from_str(&json)?;
        log::info!("Loaded best score {}", record.score);
        Ok(record.score)
    }

    fn save_best(&mut self, score: u32) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&BestScore::new(score))?;

        // Write then rename so a crash never leaves a half-written record
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        log::info!("Best score {} saved to {}", score, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn temp_path() -> PathBuf {
        static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);
        let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!(
            "wrist-flap-test-{}-{}",
            std::process::id(),
            id
        ));
        let _ = fs::remove_dir_all(&dir);
        dir.join(BEST_SCORE_FILE)
    }

    #[test]
    fn test_missing_file_loads_zero() {
        let store = JsonFileStore::new(temp_path());
        assert_eq!(store.load_best().unwrap(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path();
        let mut store = JsonFileStore::new(&path);
        store.save_best(17).unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.load_best().unwrap(), 17);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = temp_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load_best(), Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn test_memory_store_counts_saves() {
        let mut store = MemoryStore::new(3);
        assert_eq!(store.load_best().unwrap(), 3);
        store.save_best(9).unwrap();
        assert_eq!(store.load_best().unwrap(), 9);
        assert_eq!(store.saves, 1);
    }

    #[test]
    fn test_boxed_store() {
        let mut store: Box<dyn ScoreStore> = Box::new(MemoryStore::new(1));
        store.save_best(2).unwrap();
        assert_eq!(store.load_best().unwrap(), 2);
    }
}
