//! User preferences
//!
//! Persisted as JSON in LocalStorage. Unknown or missing fields fall back to
//! their defaults so older saves keep loading.

use serde::{Deserialize, Serialize};

use crate::consts::STARTING_LIVES;
use crate::storage;

/// Master volume change per hotkey press
pub const VOLUME_STEP: f32 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute when the window loses focus
    pub mute_on_blur: bool,

    // === HUD ===
    pub show_fps: bool,

    // === Gameplay ===
    /// Pause the shooter when the tab is hidden or loses focus
    pub auto_pause_on_blur: bool,
    /// Lives at the start of a shooter run
    pub starting_lives: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            mute_on_blur: true,
            show_fps: false,
            auto_pause_on_blur: true,
            starting_lives: STARTING_LIVES,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "webgl_demos_settings";

    /// Clamp out-of-range values from hand-edited storage
    pub fn sanitized(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.starting_lives = self.starting_lives.clamp(1, 9);
        self
    }

    /// Volume applied to sound effects
    pub fn effective_volume(&self) -> f32 {
        self.master_volume * self.sfx_volume
    }

    /// Change master volume by `delta`; returns whether it moved
    pub fn adjust_master_volume(&mut self, delta: f32) -> bool {
        let before = self.master_volume;
        self.master_volume = (self.master_volume + delta).clamp(0.0, 1.0);
        self.master_volume != before
    }

    /// Apply a settings hotkey (`F` FPS counter, `-`/`+` volume).
    /// Returns true if anything changed and should be saved.
    pub fn apply_key(&mut self, key: &str) -> bool {
        match key {
            "f" | "F" => {
                self.show_fps = !self.show_fps;
                true
            }
            "-" | "_" => self.adjust_master_volume(-VOLUME_STEP),
            "=" | "+" => self.adjust_master_volume(VOLUME_STEP),
            _ => false,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    pub fn load() -> Self {
        match storage::load_json::<Self>(Self::STORAGE_KEY) {
            Some(settings) => {
                log::info!("Loaded settings from LocalStorage");
                settings.sanitized()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        storage::save_json(Self::STORAGE_KEY, self);
        log::info!("Settings saved");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.starting_lives, 3);
        assert!(s.auto_pause_on_blur);
        assert!((s.effective_volume() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_json_roundtrip() {
        let s = Settings {
            show_fps: true,
            starting_lives: 5,
            ..Settings::default()
        };
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), s);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let s = Settings::from_json(r#"{"show_fps": true}"#).unwrap();
        assert!(s.show_fps);
        assert_eq!(s.master_volume, 0.8);
        assert_eq!(s.starting_lives, 3);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let s = Settings::from_json(r#"{"master_volume": 3.0, "sfx_volume": -1.0, "starting_lives": 0}"#)
            .unwrap();
        assert_eq!(s.master_volume, 1.0);
        assert_eq!(s.sfx_volume, 0.0);
        assert_eq!(s.starting_lives, 1);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Settings::from_json("{not json").is_err());
    }

    #[test]
    fn test_native_load_is_default() {
        assert_eq!(Settings::load(), Settings::default());
    }

    #[test]
    fn test_fps_hotkey_toggles() {
        let mut s = Settings::default();
        assert!(s.apply_key("f"));
        assert!(s.show_fps);
        assert!(s.apply_key("F"));
        assert!(!s.show_fps);
    }

    #[test]
    fn test_volume_hotkeys_step_and_clamp() {
        let mut s = Settings::default();
        assert!(s.apply_key("-"));
        assert!((s.master_volume - 0.7).abs() < 1e-5);

        for _ in 0..20 {
            s.apply_key("+");
        }
        assert_eq!(s.master_volume, 1.0);
        // Already at the top: nothing to save
        assert!(!s.apply_key("="));

        for _ in 0..20 {
            s.apply_key("-");
        }
        assert_eq!(s.master_volume, 0.0);
        assert_eq!(s.effective_volume(), 0.0);
    }

    #[test]
    fn test_gameplay_keys_leave_settings_alone() {
        let mut s = Settings::default();
        for key in ["a", "d", " ", "ArrowLeft", "p", "i", "Escape"] {
            assert!(!s.apply_key(key), "{key} changed settings");
        }
        assert_eq!(s, Settings::default());
    }
}
