//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied frame delta only
//! - Injected, seeded RNG only
//! - Stable iteration order (by platform slot)
//! - No rendering or audio dependencies

pub mod avatar;
pub mod collision;
pub mod field;
pub mod state;
pub mod tick;

pub use collision::{LandingBand, landing_slots};
pub use field::PlatformField;
pub use state::{
    Avatar, GameEvent, GameState, Platform, PlatformVariant, ScrollState, SessionPhase,
    SpriteSizes,
};
pub use tick::tick;
