//! Display settings and preferences
//!
//! Persisted as JSON separately from the best score.

use serde::{Deserialize, Serialize};

use crate::persistence::KeyValueStore;
use crate::platform::SettingToggle;

/// Display preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Halo around the player marker
    pub glow: bool,
    /// Show FPS counter
    pub show_fps: bool,

    // === Accessibility ===
    /// Reduced motion (no glow, no pulsing)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            glow: true,
            show_fps: false,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "lane_dodge_settings";

    /// Effective glow (respects reduced_motion)
    pub fn effective_glow(&self) -> bool {
        self.glow && !self.reduced_motion
    }

    /// Effective pulse animation (respects reduced_motion)
    pub fn effective_pulse(&self) -> bool {
        !self.reduced_motion
    }

    /// Flip one preference
    pub fn toggle(&mut self, which: SettingToggle) {
        match which {
            SettingToggle::Glow => self.glow = !self.glow,
            SettingToggle::Fps => self.show_fps = !self.show_fps,
            SettingToggle::ReducedMotion => self.reduced_motion = !self.reduced_motion,
        }
    }

    /// Load settings, falling back to defaults
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        if let Some(json) = store.get(Self::STORAGE_KEY) {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring unreadable settings: {e}"),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) {
        if let Ok(json) = serde_json::to_string(self) {
            if store.set(Self::STORAGE_KEY, &json) {
                log::info!("Settings saved");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_reduced_motion_overrides_glow() {
        let mut settings = Settings::default();
        assert!(settings.effective_glow());
        assert!(settings.effective_pulse());
        settings.reduced_motion = true;
        assert!(!settings.effective_glow());
        assert!(!settings.effective_pulse());
    }

    #[test]
    fn test_toggle() {
        let mut settings = Settings::default();
        settings.toggle(SettingToggle::Fps);
        settings.toggle(SettingToggle::Glow);
        assert!(settings.show_fps);
        assert!(!settings.glow);
        settings.toggle(SettingToggle::Glow);
        assert!(settings.glow);
    }

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStore::new();
        let settings = Settings {
            glow: false,
            show_fps: true,
            reduced_motion: false,
        };
        settings.save(&mut store);
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_partial_and_corrupt_json() {
        let mut store = MemoryStore::new();
        store.set(Settings::STORAGE_KEY, r#"{"show_fps":true}"#);
        let settings = Settings::load(&store);
        assert!(settings.show_fps);
        assert!(settings.glow);

        store.set(Settings::STORAGE_KEY, "{broken");
        assert_eq!(Settings::load(&store), Settings::default());
    }
}
