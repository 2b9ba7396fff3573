//! Streak persistence (`streak.json` in the data directory)

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use thiserror::Error;

use super::models::StreakData;
use crate::persist::{read_json, write_json, PersistError};

#[derive(Error, Debug)]
pub enum StreakStorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<PersistError> for StreakStorageError {
    fn from(err: PersistError) -> Self {
        match err {
            PersistError::Io(e) => StreakStorageError::Io(e),
            PersistError::Json(e) => StreakStorageError::Json(e),
        }
    }
}

type Result<T> = std::result::Result<T, StreakStorageError>;

/// Storage for the study streak
pub struct StreakStorage {
    data_dir: PathBuf,
}

impl StreakStorage {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    fn streak_file(&self) -> PathBuf {
        self.data_dir.join("streak.json")
    }

    /// Load the streak as seen on `today`
    pub fn load(&self, today: NaiveDate) -> Result<StreakData> {
        let data: Option<StreakData> = read_json(&self.streak_file())?;
        Ok(data.map(|d| d.refreshed(today)).unwrap_or_default())
    }

    pub fn save(&self, data: &StreakData) -> Result<()> {
        write_json(&self.streak_file(), data)?;
        Ok(())
    }

    /// Record a study session for the local calendar day
    pub fn record_today(&self) -> Result<StreakData> {
        self.record_on(Local::now().date_naive())
    }

    pub fn record_on(&self, today: NaiveDate) -> Result<StreakData> {
        let mut data = self.load(today)?;
        if data.record_study(today) {
            self.save(&data)?;
            log::info!("Study streak is now {} days", data.current_streak);
        }
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_storage() -> (StreakStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = StreakStorage::new(temp_dir.path().to_path_buf());
        (storage, temp_dir)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, d).unwrap()
    }

    #[test]
    fn test_missing_file_is_empty_streak() {
        let (storage, _temp) = create_test_storage();
        assert_eq!(storage.load(day(1)).unwrap(), StreakData::default());
    }

    #[test]
    fn test_record_and_reload() {
        let (storage, _temp) = create_test_storage();
        storage.record_on(day(1)).unwrap();
        storage.record_on(day(2)).unwrap();

        let data = storage.load(day(2)).unwrap();
        assert_eq!(data.current_streak, 2);
        assert_eq!(data.last_study_date, Some(day(2)));

        // Skipping a day breaks the streak on load but keeps the record
        let later = storage.load(day(10)).unwrap();
        assert_eq!(later.current_streak, 0);
        assert_eq!(later.longest_streak, 2);
        assert_eq!(later.total_days_studied, 2);
    }

    #[test]
    fn test_save_creates_data_dir_and_rejects_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().join("fresh");
        let storage = StreakStorage::new(data_dir.clone());

        storage.record_on(day(3)).unwrap();
        assert!(data_dir.join("streak.json").exists());
        assert!(!data_dir.join("streak.json.tmp").exists());

        std::fs::write(data_dir.join("streak.json"), "{ broken").unwrap();
        assert!(matches!(
            storage.load(day(3)),
            Err(StreakStorageError::Json(_))
        ));
    }
}
