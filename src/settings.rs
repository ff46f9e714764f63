//! Game settings and preferences
//!
//! Persisted as JSON through the same `Storage` as the leaderboard.

use serde::{Deserialize, Serialize};

use crate::consts::FALLBACK_INTERVAL_MS;
use crate::highscores::{DEFAULT_INITIALS, normalize_initials};
use crate::persistence::Storage;
use crate::sim::clamp_level;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Level selected when the game starts (1..=3)
    pub starting_level: u8,
    /// Initials offered when a run ends
    pub initials: String,
    /// Fixed RNG seed; a fresh seed is drawn per run when absent
    pub seed: Option<u64>,
    /// Tick interval for hosts without frame callbacks
    pub tick_interval_ms: f64,
    /// Logical surface size (None = engine default)
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            starting_level: 1,
            initials: DEFAULT_INITIALS.to_string(),
            seed: None,
            tick_interval_ms: FALLBACK_INTERVAL_MS,
            width: None,
            height: None,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "circus_settings";

    /// Clamp every field into its valid range
    pub fn sanitized(mut self) -> Self {
        self.starting_level = clamp_level(self.starting_level as i64);
        self.initials = normalize_initials(&self.initials);
        if !self.tick_interval_ms.is_finite() || self.tick_interval_ms <= 0.0 {
            self.tick_interval_ms = FALLBACK_INTERVAL_MS;
        }
        self
    }

    /// Load settings, falling back to defaults on missing or corrupt data
    pub fn load(storage: &impl Storage) -> Self {
        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings.sanitized();
                }
                Err(e) => log::warn!("ignoring corrupt settings: {e}"),
            },
            Ok(None) => {}
            Err(e) => log::warn!("could not read settings: {e}"),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings
    pub fn save(&self, storage: &impl Storage) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => match storage.set_item(Self::STORAGE_KEY, &json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("could not save settings: {e}"),
            },
            Err(e) => log::warn!("could not encode settings: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    #[test]
    fn test_missing_settings_are_default() {
        let storage = MemoryStorage::new();
        assert_eq!(Settings::load(&storage), Settings::default());
    }

    #[test]
    fn test_roundtrip() {
        let storage = MemoryStorage::new();
        let settings = Settings {
            starting_level: 3,
            initials: "ACE".into(),
            seed: Some(9),
            ..Settings::default()
        };
        settings.save(&storage);
        assert_eq!(Settings::load(&storage), settings);
    }

    #[test]
    fn test_partial_and_out_of_range_values() {
        let storage = MemoryStorage::new();
        storage
            .set_item(
                Settings::STORAGE_KEY,
                r#"{"starting_level": 9, "initials": "zorro", "tick_interval_ms": -1}"#,
            )
            .unwrap();
        let settings = Settings::load(&storage);
        assert_eq!(settings.starting_level, 3);
        assert_eq!(settings.initials, "ZOR");
        assert_eq!(settings.tick_interval_ms, FALLBACK_INTERVAL_MS);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_corrupt_settings_are_default() {
        let storage = MemoryStorage::new();
        storage.set_item(Settings::STORAGE_KEY, "][").unwrap();
        assert_eq!(Settings::load(&storage), Settings::default());
    }
}
