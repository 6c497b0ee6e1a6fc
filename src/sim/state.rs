//! Game state and core simulation types
//!
//! Everything the per-frame update touches lives here and is owned by
//! [`GameState`]. Platforms are addressed by slot index, never by lookup.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::field::PlatformField;
use crate::consts::*;
use crate::settings::SimConfig;

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Not yet started; updates and tilt are ignored
    Suspended,
    /// Active gameplay
    Running,
    /// Avatar fell out of the field; waits for a restart
    Ended,
}

/// Something that happened during a tick, in the order it happened
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Avatar bounced off the platform in `slot`
    Jumped { slot: usize, velocity_y: f32 },
    /// Platform in `slot` scrolled off the bottom and was placed at `y`
    Recycled { slot: usize, y: f32 },
    /// Avatar dropped below the visible field
    FellOut,
}

/// The player-controlled entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Fixed at (0, gravity)
    pub accel: Vec2,
    /// Sprite content size
    pub size: Vec2,
    /// true = unmirrored, facing right
    pub facing_right: bool,
}

/// Visual variant of a platform (atlas frame)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlatformVariant {
    #[default]
    Strut,
    Asteroid,
}

impl PlatformVariant {
    pub const ALL: [PlatformVariant; 2] = [PlatformVariant::Strut, PlatformVariant::Asteroid];

    /// Sprite-sheet frame as (x, y, width, height)
    pub fn atlas_rect(self) -> [f32; 4] {
        let (w, h) = PLATFORM_SIZE;
        match self {
            PlatformVariant::Strut => [608.0, 90.0, w, h],
            PlatformVariant::Asteroid => [608.0, 140.0, w, h],
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// A recyclable platform slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub pos: Vec2,
    /// Cosmetic horizontal mirroring
    pub flipped: bool,
    pub variant: PlatformVariant,
    /// Sprite content size, fixed for the slot's lifetime
    pub size: Vec2,
}

impl Platform {
    pub fn new(size: Vec2) -> Self {
        Self {
            pos: Vec2::ZERO,
            flipped: false,
            variant: PlatformVariant::default(),
            size,
        }
    }
}

/// Placement cursor and difficulty ramp
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollState {
    /// Y of the most recently placed platform; negative before the first one
    pub placement_y: f32,
    /// Current upper bound on the gap between successive platforms
    pub max_step: f32,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            placement_y: PLACEMENT_SENTINEL,
            max_step: INITIAL_MAX_PLATFORM_STEP,
        }
    }
}

/// Content sizes of every sprite the simulation collides
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteSizes {
    pub avatar: Vec2,
    /// One entry per platform slot
    pub platforms: Vec<Vec2>,
}

impl SpriteSizes {
    /// Default sprite sizes for a pool of `count` platforms
    pub fn uniform(count: usize) -> Self {
        Self {
            avatar: Vec2::from(AVATAR_SIZE),
            platforms: vec![Vec2::from(PLATFORM_SIZE); count],
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R = Pcg32> {
    pub config: SimConfig,
    pub avatar: Avatar,
    pub field: PlatformField,
    pub phase: SessionPhase,
    /// Frames ticked while running
    pub frames: u64,
    pub(crate) rng: R,
}

impl GameState<Pcg32> {
    /// Create a state with default sprite sizes and a seeded PCG generator
    pub fn seeded(config: SimConfig, seed: u64) -> Self {
        let sizes = SpriteSizes::uniform(config.platform_pool_size);
        Self::new(config, sizes, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> GameState<R> {
    /// Create a suspended state; call [`GameState::start_session`] to play.
    ///
    /// The pool has one slot per entry in `sizes.platforms`; the config's
    /// pool size is overwritten to match.
    pub fn new(mut config: SimConfig, sizes: SpriteSizes, rng: R) -> Self {
        if sizes.platforms.len() != config.platform_pool_size {
            log::warn!(
                "Pool size {} does not match {} platform sprites; using the sprites",
                config.platform_pool_size,
                sizes.platforms.len()
            );
            config.platform_pool_size = sizes.platforms.len();
        }
        let avatar = Avatar::new(sizes.avatar, &config);
        let field = PlatformField::new(&sizes.platforms);
        Self {
            config,
            avatar,
            field,
            phase: SessionPhase::Suspended,
            frames: 0,
            rng,
        }
    }

    /// Lay out the platforms, re-center the avatar and resume updates
    pub fn start_session(&mut self) {
        self.field.reset_all(&self.config, &mut self.rng);
        self.avatar.reset(&self.config);
        self.frames = 0;
        self.phase = SessionPhase::Running;
        log::info!(
            "Session started: {} platforms, top at y={}",
            self.field.len(),
            self.field.scroll.placement_y
        );
    }

    /// True whenever updates and tilt samples are ignored
    pub fn suspended(&self) -> bool {
        self.phase != SessionPhase::Running
    }

    /// Feed one accelerometer sample (normalized horizontal tilt)
    pub fn accelerate(&mut self, tilt_x: f32) {
        if self.suspended() {
            return;
        }
        self.avatar.apply_tilt(tilt_x);
    }
}
