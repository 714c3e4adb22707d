//! Persistence bridge: one JSON document holding the tracked city list.
//!
//! Reads are tolerant (absent or corrupt storage yields an empty list) and
//! writes are best-effort: a failed write must never break the application,
//! so it is logged and swallowed.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::city::City;

/// Storage slot for the serialized city list.
#[derive(Debug, Clone)]
pub struct CityStorage {
    path: PathBuf,
}

impl CityStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the stored list. Absent or unreadable storage is an empty
    /// list, never an error.
    pub fn load(&self) -> Vec<City> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "failed to read stored city list");
                return Vec::new();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(cities) => cities,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "stored city list is corrupt, starting empty");
                Vec::new()
            }
        }
    }

    /// Write the full list, fire-and-forget. Failures are logged and
    /// swallowed.
    pub fn save(&self, cities: &[City]) {
        if let Err(err) = self.try_save(cities) {
            tracing::warn!(path = %self.path.display(), error = %err, "failed to persist city list");
        }
    }

    fn try_save(&self, cities: &[City]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("Failed to create storage directory")?;
        }

        let contents =
            serde_json::to_string_pretty(cities).context("Failed to serialize city list")?;

        fs::write(&self.path, contents).context("Failed to write city list")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use tempfile::tempdir;

    fn city(name: &str, country: &str) -> City {
        City {
            id: City::derive_id(name, country),
            name: name.to_string(),
            country: country.to_string(),
            weather: None,
        }
    }

    #[test]
    fn load_missing_file_yields_empty_list() {
        let dir = tempdir().unwrap();
        let storage = CityStorage::new(dir.path().join("cities.json"));
        assert!(storage.load().is_empty());
    }

    #[test]
    fn save_then_load_roundtrips() {
        let dir = tempdir().unwrap();
        let storage = CityStorage::new(dir.path().join("cities.json"));

        storage.save(&[city("Kyiv", "UA"), city("Lviv", "UA")]);

        let loaded = storage.load();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id, "Kyiv-UA");
        assert_eq!(loaded[1].id, "Lviv-UA");
    }

    #[test]
    fn load_corrupt_file_yields_empty_list() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cities.json");
        fs::write(&path, "{ not valid json").unwrap();

        let storage = CityStorage::new(path);
        assert!(storage.load().is_empty());
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("cities.json");

        let storage = CityStorage::new(&path);
        storage.save(&[city("Kyiv", "UA")]);

        assert_eq!(storage.load().len(), 1);
    }

    #[test]
    fn save_failure_is_swallowed() {
        let dir = tempdir().unwrap();
        // The slot path is a directory, so the write must fail - quietly.
        let storage = CityStorage::new(dir.path());
        storage.save(&[city("Kyiv", "UA")]);
    }

    #[test]
    fn save_overwrites_previous_contents() {
        let dir = tempdir().unwrap();
        let storage = CityStorage::new(dir.path().join("cities.json"));

        storage.save(&[city("Kyiv", "UA"), city("Lviv", "UA")]);
        storage.save(&[city("Odesa", "UA")]);

        let loaded = storage.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "Odesa-UA");
    }
}
