//! Persisted snapshot of the last successful weather check, plus the
//! staleness policy that decides when a fresh lookup is needed.
//!
//! The cache is advisory: a missing or corrupt file just means "no prior
//! snapshot" and forces a re-fetch on the next run, so `load` never fails.
//! Writes are plain truncate-and-write; concurrent runs racing on the file
//! are last-writer-wins.

use anyhow::{Context, Result, anyhow};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// File name under the user's home directory.
const CACHE_FILE_NAME: &str = ".current_conditions";

/// The one persisted record: last check time plus everything needed to
/// re-render the output line without a network call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Snapshot {
    /// Unix epoch seconds of the successful check this snapshot came from.
    /// `0` means no prior snapshot exists.
    #[serde(default)]
    pub last: i64,
    #[serde(default)]
    pub station: String,
    /// Free-text condition as reported by the provider.
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub moon_emoji: String,
    /// Integer-rounded Fahrenheit, already formatted for display.
    #[serde(default)]
    pub temp: String,
}

/// Reads and writes the snapshot file.
#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    /// Store backed by an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store backed by `<home>/.current_conditions`.
    pub fn default_path() -> Result<Self> {
        let dirs =
            BaseDirs::new().ok_or_else(|| anyhow!("Could not determine home directory"))?;
        Ok(Self::at(dirs.home_dir().join(CACHE_FILE_NAME)))
    }

    /// Load the snapshot. Missing, unreadable, or malformed files all yield
    /// the zero snapshot (`last == 0`) rather than an error.
    pub fn load(&self) -> Snapshot {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(err) => {
                tracing::debug!(path = %self.path.display(), %err, "no usable cache file");
                return Snapshot::default();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::debug!(path = %self.path.display(), %err, "malformed cache file, ignoring");
                Snapshot::default()
            }
        }
    }

    /// Write the snapshot, replacing any previous content. Unlike `load`,
    /// a failure here propagates.
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let json =
            serde_json::to_string(snapshot).context("Failed to serialize cache snapshot")?;

        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write cache file: {}", self.path.display()))?;

        Ok(())
    }
}

/// Staleness policy: a snapshot taken at `last` (epoch seconds) is stale
/// once `now` is strictly past `last + wait_minutes * 60`. Equality is
/// still fresh. A zero `last` is not special-cased here; the pipeline
/// treats "no prior snapshot" as an unconditional refresh before ever
/// consulting this formula.
pub fn is_stale(last: i64, wait_minutes: i64, now: i64) -> bool {
    now > last + wait_minutes * 60
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Snapshot {
        Snapshot {
            last: 1_700_000_000,
            station: "KWASEATT187".into(),
            condition: "Light Rain".into(),
            emoji: "☔".into(),
            moon_emoji: "🌝".into(),
            temp: "52".into(),
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CacheStore::at(dir.path().join(".current_conditions"));

        store.save(&sample()).expect("save must succeed");
        assert_eq!(store.load(), sample());
    }

    #[test]
    fn load_missing_file_is_zero_snapshot() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CacheStore::at(dir.path().join("does_not_exist"));

        let snapshot = store.load();
        assert_eq!(snapshot, Snapshot::default());
        assert_eq!(snapshot.last, 0);
    }

    #[test]
    fn load_malformed_file_is_zero_snapshot() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(".current_conditions");
        std::fs::write(&path, "{ not json").expect("write");

        assert_eq!(CacheStore::at(path).load(), Snapshot::default());
    }

    #[test]
    fn load_fills_missing_fields_and_ignores_unknown_ones() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(".current_conditions");
        std::fs::write(&path, r#"{"last": 42, "emoji": "🌞", "extra": true}"#).expect("write");

        let snapshot = CacheStore::at(path).load();
        assert_eq!(snapshot.last, 42);
        assert_eq!(snapshot.emoji, "🌞");
        assert_eq!(snapshot.moon_emoji, "");
        assert_eq!(snapshot.temp, "");
    }

    #[test]
    fn save_to_unwritable_path_errors() {
        let store = CacheStore::at("/definitely/missing/dir/.current_conditions");
        let err = store.save(&sample()).unwrap_err();
        assert!(err.to_string().contains("Failed to write cache file"));
    }

    #[test]
    fn stale_after_window_passes() {
        let last = 1_000_000;
        assert!(is_stale(last, 10, last + 601));
        assert!(is_stale(last, 0, last + 1));
    }

    #[test]
    fn fresh_within_window_and_at_boundary() {
        let last = 1_000_000;
        assert!(!is_stale(last, 10, last + 300));
        // Exactly at the boundary counts as fresh.
        assert!(!is_stale(last, 10, last + 600));
    }
}
