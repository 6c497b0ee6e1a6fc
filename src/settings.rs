//! Simulation configuration and audio preferences
//!
//! Both load from JSON; missing fields fall back to the defaults in `consts`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Immutable configuration handed to the simulation at construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Vertical acceleration (negative, units/s²)
    pub gravity: f32,
    pub screen_width: f32,
    pub screen_height: f32,
    /// Smallest vertical gap between successive platforms
    pub min_platform_step: f32,
    /// Cap for the growing maximum gap
    pub max_platform_step: f32,
    /// Shrinks the landing band from the top of a platform
    pub top_padding: f32,
    /// Number of platform slots
    pub platform_pool_size: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            min_platform_step: MIN_PLATFORM_STEP,
            max_platform_step: MAX_PLATFORM_STEP,
            top_padding: PLATFORM_TOP_PADDING,
            platform_pool_size: NUM_PLATFORMS,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        log::info!(
            "Loaded config: {}x{}, {} platforms",
            config.screen_width,
            config.screen_height,
            config.platform_pool_size
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.platform_pool_size == 0 {
            return Err(ConfigError::Invalid("platform_pool_size must be at least 1"));
        }
        if !(self.screen_width > 0.0 && self.screen_height > 0.0) {
            return Err(ConfigError::Invalid("screen dimensions must be positive"));
        }
        if !(self.gravity < 0.0) {
            return Err(ConfigError::Invalid("gravity must be negative"));
        }
        if !(self.min_platform_step >= 0.0 && self.min_platform_step <= self.max_platform_step) {
            return Err(ConfigError::Invalid(
                "platform steps must satisfy 0 <= min <= max",
            ));
        }
        Ok(())
    }

    /// Y of the line the rising avatar is pinned to
    #[inline]
    pub fn midline(&self) -> f32 {
        self.screen_height * 0.5
    }
}

/// Audio preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Play the jump effect
    pub sound_effects: bool,
    /// Loop background music while the game is alive
    pub background_music: bool,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            sound_effects: true,
            background_music: true,
            music_volume: 0.5,
            sfx_volume: 1.0,
        }
    }
}

impl AudioSettings {
    /// Parse from JSON, clamping volumes into range
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.music_volume = settings.music_volume.clamp(0.0, 1.0);
        settings.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        Ok(settings)
    }

    /// Everything off, for tests and silent runs
    pub fn muted() -> Self {
        Self {
            sound_effects: false,
            background_music: false,
            music_volume: 0.0,
            sfx_volume: 0.0,
        }
    }
}

/// Configuration loading failure
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}
