use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::RwLock,
};

use crate::catalog::{
    Catalog, DEFAULT_EVENT_NAMES, DEFAULT_PALETTE, DEFAULT_REACHABLE_COLORS,
    DEFAULT_REACHABLE_EVENT_NAMES,
};
use crate::log_warn;

const ENABLE_LOGS: bool = true;

pub const SETTINGS_PATH_ENV: &str = "SCHEDULE_SETTINGS";
pub const DEFAULT_SETTINGS_FILE: &str = "schedule-settings.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorSettings {
    /// Fixed seed for reproducible agendas; entropy when absent.
    pub seed: Option<u64>,
    pub event_names: Vec<String>,
    pub reachable_event_names: usize,
    /// `#RRGGBB` or `#AARRGGBB` entries.
    pub palette: Vec<String>,
    pub reachable_colors: usize,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            seed: None,
            event_names: DEFAULT_EVENT_NAMES.iter().map(|s| s.to_string()).collect(),
            reachable_event_names: DEFAULT_REACHABLE_EVENT_NAMES,
            palette: DEFAULT_PALETTE.iter().map(|s| s.to_string()).collect(),
            reachable_colors: DEFAULT_REACHABLE_COLORS,
        }
    }
}

impl GeneratorSettings {
    pub fn catalog(&self) -> Result<Catalog> {
        Catalog::from_hex_palette(
            self.event_names.clone(),
            self.reachable_event_names,
            self.palette.as_slice(),
            self.reachable_colors,
        )
        .context("Invalid catalog in generator settings")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct UserSettings {
    generator: GeneratorSettings,
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                log_warn!(
                    "Ignoring malformed settings in {}: {}",
                    path.display(),
                    err
                );
                UserSettings::default()
            })
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    /// Settings file named by `SCHEDULE_SETTINGS`, else `schedule-settings.json`.
    pub fn from_env() -> Result<Self> {
        let path = std::env::var_os(SETTINGS_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE));
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn generator(&self) -> GeneratorSettings {
        self.data.read().unwrap().generator.clone()
    }

    pub fn update_generator(&self, settings: GeneratorSettings) -> Result<()> {
        // A rejected catalog is never written.
        settings.catalog()?;

        let mut guard = self.data.write().unwrap();
        guard.generator = settings;
        self.persist(&guard)
    }

    pub fn reload(&self) -> Result<()> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings from {}", self.path.display()))?;
        let data: UserSettings = serde_json::from_str(&contents)?;
        let mut guard = self.data.write().unwrap();
        *guard = data;
        Ok(())
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json")).unwrap();

        let generator = store.generator();
        assert_eq!(generator, GeneratorSettings::default());
        assert_eq!(generator.catalog().unwrap(), Catalog::default());
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        let store = SettingsStore::new(path).unwrap();
        assert_eq!(store.generator(), GeneratorSettings::default());
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "generator": { "seed": 11 } }"#).unwrap();

        let generator = SettingsStore::new(path).unwrap().generator();
        assert_eq!(generator.seed, Some(11));
        assert_eq!(generator.event_names.len(), 10);
        assert_eq!(generator.reachable_colors, 14);
    }

    #[test]
    fn updates_persist_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let store = SettingsStore::new(path.clone()).unwrap();

        let updated = GeneratorSettings {
            seed: Some(99),
            event_names: vec!["Standup".into(), "Review".into()],
            reachable_event_names: 1,
            palette: vec!["#336699".into()],
            reachable_colors: 1,
        };
        store.update_generator(updated.clone()).unwrap();

        let reopened = SettingsStore::new(path).unwrap();
        assert_eq!(reopened.generator(), updated);

        reopened.reload().unwrap();
        assert_eq!(reopened.generator().seed, Some(99));
    }

    #[test]
    fn invalid_catalog_is_not_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let store = SettingsStore::new(path.clone()).unwrap();

        let empty_palette = GeneratorSettings {
            palette: Vec::new(),
            reachable_colors: 0,
            ..GeneratorSettings::default()
        };
        assert!(store.update_generator(empty_palette).is_err());
        assert!(!path.exists());
    }
}
