//! Twee Jump - A tilt-controlled vertical platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (avatar physics, platform field, scrolling)
//! - `scene`: Boundary to the rendering host (drawables by stable id)
//! - `audio`: Boundary to the audio cue player
//! - `game`: Composition driven once per frame by the host scheduler
//! - `settings`: Data-driven configuration

pub mod audio;
pub mod game;
pub mod scene;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::{AudioSettings, ConfigError, SimConfig};

/// Game configuration constants
pub mod consts {
    /// Frame timestep delivered by the headless runner (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Screen dimensions (world units, origin bottom-left)
    pub const SCREEN_WIDTH: f32 = 320.0;
    pub const SCREEN_HEIGHT: f32 = 480.0;

    /// Downward acceleration applied to the avatar (units/s²)
    pub const GRAVITY: f32 = -550.0;

    /// Vertical speed given by a platform bounce, before the horizontal bonus
    pub const JUMP_BASE_SPEED: f32 = 350.0;
    /// Horizontal speed past which the avatar turns around
    pub const FACING_THRESHOLD: f32 = 30.0;

    /// Tilt smoothing: weight kept from the previous velocity
    pub const TILT_FILTER: f32 = 0.1;
    /// Tilt sample to horizontal velocity scale
    pub const TILT_SCALE: f32 = 500.0;

    /// Extra horizontal reach on each side of a platform for landings
    pub const COLLISION_MARGIN: f32 = 10.0;
    pub const PLATFORM_TOP_PADDING: f32 = 10.0;

    /// Platform pool and placement
    pub const NUM_PLATFORMS: usize = 10;
    pub const MIN_PLATFORM_STEP: f32 = 50.0;
    pub const MAX_PLATFORM_STEP: f32 = 300.0;
    pub const INITIAL_MAX_PLATFORM_STEP: f32 = 60.0;
    /// Max step growth per recycled platform (difficulty ramp)
    pub const PLATFORM_STEP_INCREMENT: f32 = 0.5;
    /// Y of the first platform of a session
    pub const FIRST_PLATFORM_Y: f32 = 30.0;
    /// Placement cursor value that marks "no platform placed yet"
    pub const PLACEMENT_SENTINEL: f32 = -1.0;

    /// Sprite content sizes (width, height)
    pub const AVATAR_SIZE: (f32, f32) = (50.0, 60.0);
    pub const PLATFORM_SIZE: (f32, f32) = (102.0, 22.0);
}

/// Wrap `x` into `[min, min + span)`.
///
/// Values already inside the interval are returned untouched.
#[inline]
pub fn wrap_into(x: f32, min: f32, span: f32) -> f32 {
    if x >= min && x < min + span {
        x
    } else {
        let wrapped = (x - min).rem_euclid(span) + min;
        // rem_euclid can round up to exactly `span` for tiny negative offsets
        if wrapped >= min + span { min } else { wrapped }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_into_inside_is_identity() {
        assert_eq!(wrap_into(10.0, -25.0, 370.0), 10.0);
        assert_eq!(wrap_into(-25.0, -25.0, 370.0), -25.0);
    }

    #[test]
    fn test_wrap_into_both_edges() {
        assert!((wrap_into(346.0, -25.0, 370.0) - -24.0).abs() < 1e-4);
        assert!((wrap_into(-26.0, -25.0, 370.0) - 344.0).abs() < 1e-4);
        // Upper bound is exclusive
        assert_eq!(wrap_into(345.0, -25.0, 370.0), -25.0);
    }
}
