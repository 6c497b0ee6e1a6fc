//! Boundary to the rendering host
//!
//! The simulation never looks drawables up mid-step. The host is asked for
//! content sizes once at construction and receives positions once per frame.

use std::collections::HashMap;
use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::AVATAR_SIZE;
use crate::sim::{GameState, SpriteSizes};

/// Stable handle of a drawable owned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawableId {
    Avatar,
    Platform(usize),
}

impl fmt::Display for DrawableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawableId::Avatar => write!(f, "avatar"),
            DrawableId::Platform(slot) => write!(f, "platform #{slot}"),
        }
    }
}

/// Sprite-sheet frame of the avatar as (x, y, width, height)
pub const AVATAR_FRAME: [f32; 4] = [608.0, 16.0, AVATAR_SIZE.0, AVATAR_SIZE.1];
pub const AVATAR_Z_ORDER: i32 = 4;
pub const PLATFORM_Z_ORDER: i32 = 3;

/// The scene was not set up as expected
#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    MissingDrawable(DrawableId),
    /// A platform sprite cannot fit on screen at any X
    SpriteTooWide {
        id: DrawableId,
        width: f32,
        screen_width: f32,
    },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::MissingDrawable(id) => write!(f, "no drawable registered for {id}"),
            SceneError::SpriteTooWide {
                id,
                width,
                screen_width,
            } => write!(f, "{id} is {width} wide, screen is only {screen_width}"),
        }
    }
}

impl std::error::Error for SceneError {}

/// Operations the simulation needs from a scene graph
pub trait SceneHost {
    /// Register a sprite cut from `frame` (x, y, w, h) of the sprite sheet
    fn create_drawable(&mut self, id: DrawableId, frame: [f32; 4], z_order: i32);
    fn content_size(&self, id: DrawableId) -> Result<Vec2, SceneError>;
    fn set_position(&mut self, id: DrawableId, pos: Vec2) -> Result<(), SceneError>;
    /// Horizontal mirror: 1.0 normal, -1.0 mirrored
    fn set_scale_x(&mut self, id: DrawableId, scale: f32) -> Result<(), SceneError>;
    fn set_frame(&mut self, id: DrawableId, frame: [f32; 4]) -> Result<(), SceneError>;
}

/// Read the content sizes of the avatar and `pool_size` platforms
pub fn sprite_sizes<S: SceneHost + ?Sized>(
    scene: &S,
    pool_size: usize,
) -> Result<SpriteSizes, SceneError> {
    let avatar = scene.content_size(DrawableId::Avatar)?;
    let platforms = (0..pool_size)
        .map(|slot| scene.content_size(DrawableId::Platform(slot)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SpriteSizes { avatar, platforms })
}

/// Reject platform sprites wider than the screen
pub fn check_fits_screen(sizes: &SpriteSizes, screen_width: f32) -> Result<(), SceneError> {
    for (slot, size) in sizes.platforms.iter().enumerate() {
        if size.x.trunc() > screen_width {
            return Err(SceneError::SpriteTooWide {
                id: DrawableId::Platform(slot),
                width: size.x,
                screen_width,
            });
        }
    }
    Ok(())
}

/// Push the current state to the host, once per entity
pub fn sync<S: SceneHost + ?Sized, R>(scene: &mut S, state: &GameState<R>) -> Result<(), SceneError> {
    scene.set_position(DrawableId::Avatar, state.avatar.pos)?;
    scene.set_scale_x(DrawableId::Avatar, state.avatar.scale_x())?;

    for (slot, platform) in state.field.slots.iter().enumerate() {
        let id = DrawableId::Platform(slot);
        scene.set_position(id, platform.pos)?;
        scene.set_scale_x(id, if platform.flipped { -1.0 } else { 1.0 })?;
        scene.set_frame(id, platform.variant.atlas_rect())?;
    }
    Ok(())
}

/// A sprite as the headless host stores it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawable {
    pub frame: [f32; 4],
    pub z_order: i32,
    pub pos: Vec2,
    pub scale_x: f32,
}

/// In-memory scene for tests and the headless runner
#[derive(Debug, Default)]
pub struct HeadlessScene {
    drawables: HashMap<DrawableId, Drawable>,
}

impl HeadlessScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: DrawableId) -> Option<&Drawable> {
        self.drawables.get(&id)
    }

    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }

    fn get_mut(&mut self, id: DrawableId) -> Result<&mut Drawable, SceneError> {
        self.drawables
            .get_mut(&id)
            .ok_or(SceneError::MissingDrawable(id))
    }
}

impl SceneHost for HeadlessScene {
    fn create_drawable(&mut self, id: DrawableId, frame: [f32; 4], z_order: i32) {
        let previous = self.drawables.insert(
            id,
            Drawable {
                frame,
                z_order,
                pos: Vec2::ZERO,
                scale_x: 1.0,
            },
        );
        if previous.is_some() {
            log::warn!("Drawable {} registered twice", id);
        }
    }

    fn content_size(&self, id: DrawableId) -> Result<Vec2, SceneError> {
        self.drawables
            .get(&id)
            .map(|d| Vec2::new(d.frame[2], d.frame[3]))
            .ok_or(SceneError::MissingDrawable(id))
    }

    fn set_position(&mut self, id: DrawableId, pos: Vec2) -> Result<(), SceneError> {
        self.get_mut(id)?.pos = pos;
        Ok(())
    }

    fn set_scale_x(&mut self, id: DrawableId, scale: f32) -> Result<(), SceneError> {
        self.get_mut(id)?.scale_x = scale;
        Ok(())
    }

    fn set_frame(&mut self, id: DrawableId, frame: [f32; 4]) -> Result<(), SceneError> {
        self.get_mut(id)?.frame = frame;
        Ok(())
    }
}
