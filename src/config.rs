use std::{env, path::PathBuf};

use chrono::FixedOffset;

use crate::services::clock::SystemClock;
use crate::services::queries::DEFAULT_RECENT_DAYS;
use crate::store::{FileStore, StoreError};

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub key_prefix: String,

    /// Local time zone used for midnight boundaries.
    pub utc_offset: FixedOffset,
    pub recent_days: i64,

    pub log_filter: String,
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./mindease-data"),
            key_prefix: "mindease".into(),
            utc_offset: *chrono::Local::now().offset(),
            recent_days: DEFAULT_RECENT_DAYS,
            log_filter: "mindease_engine=info".into(),
            log_json: false,
        }
    }
}

impl Config {
    /// `.env` first, then the process environment.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            data_dir: env::var("MINDEASE_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            key_prefix: env::var("MINDEASE_KEY_PREFIX")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.key_prefix),
            utc_offset: env::var("MINDEASE_UTC_OFFSET_MINUTES")
                .ok()
                .and_then(|s| s.parse::<i32>().ok())
                .and_then(|minutes| FixedOffset::east_opt(minutes * 60))
                .unwrap_or(defaults.utc_offset),
            recent_days: env::var("MINDEASE_RECENT_DAYS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.recent_days),
            log_filter: env::var("MINDEASE_LOG").unwrap_or(defaults.log_filter),
            log_json: env::var("MINDEASE_LOG_JSON")
                .unwrap_or_else(|_| "false".into())
                .parse()
                .unwrap_or(false),
        }
    }

    pub fn clock(&self) -> SystemClock {
        SystemClock::new(self.utc_offset)
    }

    pub fn open_file_store(&self) -> Result<FileStore, StoreError> {
        FileStore::open(&self.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::clock::Clock;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.key_prefix, "mindease");
        assert_eq!(config.recent_days, 7);
        assert!(!config.log_json);
    }

    #[test]
    fn test_clock_uses_configured_offset() {
        let config = Config {
            utc_offset: FixedOffset::east_opt(330 * 60).unwrap(),
            ..Config::default()
        };
        assert_eq!(config.clock().offset().local_minus_utc(), 330 * 60);
    }

    #[test]
    fn test_open_file_store_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            data_dir: dir.path().join("nested").join("data"),
            ..Config::default()
        };
        let store = config.open_file_store().unwrap();
        assert!(store.root().is_dir());
    }
}
