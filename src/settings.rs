//! Simulation settings and preferences
//!
//! Stored in the browser so the form and audio controls come back the way
//! they were left.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::KindCounts;

/// User-facing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    // === Population ===
    pub rock_count: u32,
    pub paper_count: u32,
    pub scissors_count: u32,

    // === Motion ===
    /// Speed slider value; entities move at half this many pixels per frame
    pub speed: f32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rock_count: DEFAULT_COUNT,
            paper_count: DEFAULT_COUNT,
            scissors_count: DEFAULT_COUNT,

            speed: DEFAULT_SPEED,

            master_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Initial population counts
    pub fn counts(&self) -> KindCounts {
        KindCounts::new(self.rock_count, self.paper_count, self.scissors_count)
    }

    /// Pull every value back into its valid range
    pub fn clamp(&mut self) {
        self.rock_count = self.rock_count.min(MAX_COUNT);
        self.paper_count = self.paper_count.min(MAX_COUNT);
        self.scissors_count = self.scissors_count.min(MAX_COUNT);
        self.speed = clamp_speed(self.speed);
        self.master_volume = if self.master_volume.is_finite() {
            self.master_volume.clamp(0.0, 1.0)
        } else {
            1.0
        };
    }

    /// Set the master volume from the slider, ignoring junk input
    pub fn set_master_volume(&mut self, raw: &str) -> Option<f32> {
        let volume = raw.trim().parse::<f32>().ok().filter(|v| v.is_finite())?;
        self.master_volume = volume.clamp(0.0, 1.0);
        Some(self.master_volume)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "rps_arena_settings";

    /// Read stored settings, clamped, or fall back to the defaults
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(mut settings) = serde_json::from_str::<Settings>(&json) {
                    settings.clamp();
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("No stored settings, using defaults");
        Self::default()
    }

    /// Store the current form and audio values
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::debug!("Settings saved");
            }
        }
    }

    /// The headless runner always starts from the defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {}
}

/// Clamp a speed value into the slider range (non-finite falls back to default)
pub fn clamp_speed(speed: f32) -> f32 {
    if speed.is_finite() {
        speed.clamp(MIN_SPEED, MAX_SPEED)
    } else {
        DEFAULT_SPEED
    }
}

/// Parse a count input; anything that is not a non-negative integer becomes 0
pub fn parse_count(raw: &str) -> u32 {
    match raw.trim().parse::<i64>() {
        Ok(n) if n >= 0 => n.min(MAX_COUNT as i64) as u32,
        _ => {
            log::warn!("Invalid count {raw:?}, using 0");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_counts() {
        let settings = Settings::default();
        assert_eq!(
            settings.counts(),
            KindCounts::new(DEFAULT_COUNT, DEFAULT_COUNT, DEFAULT_COUNT)
        );
    }

    #[test]
    fn test_clamp() {
        let mut settings = Settings {
            rock_count: MAX_COUNT + 1,
            speed: 50.0,
            master_volume: f32::NAN,
            ..Default::default()
        };
        settings.clamp();
        assert_eq!(settings.rock_count, MAX_COUNT);
        assert_eq!(settings.speed, MAX_SPEED);
        assert_eq!(settings.master_volume, 1.0);
    }

    #[test]
    fn test_set_master_volume() {
        let mut settings = Settings::default();
        assert_eq!(settings.set_master_volume("0.25"), Some(0.25));
        assert_eq!(settings.master_volume, 0.25);
        assert_eq!(settings.set_master_volume("3"), Some(1.0));
        assert_eq!(settings.set_master_volume("loud"), None);
        assert_eq!(settings.set_master_volume("NaN"), None);
        assert_eq!(settings.master_volume, 1.0);
    }

    #[test]
    fn test_audio_preferences_survive_json() {
        let settings = Settings {
            master_volume: 0.4,
            muted: true,
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.master_volume, 0.4);
        assert!(back.muted);
    }

    #[test]
    fn test_clamp_speed() {
        assert_eq!(clamp_speed(0.0), MIN_SPEED);
        assert_eq!(clamp_speed(6.5), 6.5);
        assert_eq!(clamp_speed(f32::INFINITY), DEFAULT_SPEED);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("12"), 12);
        assert_eq!(parse_count(" 3 "), 3);
        assert_eq!(parse_count("-4"), 0);
        assert_eq!(parse_count("abc"), 0);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("99999"), MAX_COUNT);
    }
}
