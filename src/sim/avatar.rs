//! Avatar physics: integration, horizontal wraparound and facing

use glam::Vec2;

use super::state::Avatar;
use crate::consts::*;
use crate::settings::SimConfig;
use crate::wrap_into;

impl Avatar {
    pub fn new(size: Vec2, config: &SimConfig) -> Self {
        let mut avatar = Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            accel: Vec2::ZERO,
            size,
            facing_right: true,
        };
        avatar.reset(config);
        avatar
    }

    /// Re-center, stop, and face right.
    ///
    /// Y starts at half the screen *width*; the game has always placed the
    /// avatar there and the first platform layout depends on it.
    pub fn reset(&mut self, config: &SimConfig) {
        self.pos = Vec2::new(config.screen_width * 0.5, config.screen_width * 0.5);
        self.vel = Vec2::ZERO;
        self.accel = Vec2::new(0.0, config.gravity);
        self.facing_right = true;
    }

    /// Smooth a tilt sample into the horizontal velocity
    #[inline]
    pub fn apply_tilt(&mut self, tilt_x: f32) {
        self.vel.x = self.vel.x * TILT_FILTER + tilt_x * (1.0 - TILT_FILTER) * TILT_SCALE;
    }

    /// Advance one frame. `dt` is not clamped, so a long stall can carry
    /// the avatar straight through a landing band.
    pub fn integrate(&mut self, dt: f32, config: &SimConfig) {
        self.pos.x += self.vel.x * dt;
        self.update_facing();

        let half_w = self.size.x * 0.5;
        self.pos.x = wrap_into(self.pos.x, -half_w, config.screen_width + self.size.x);

        self.vel.y += self.accel.y * dt;
        self.pos.y += self.vel.y * dt;
    }

    /// Flip only once |vx| clears the dead zone
    pub fn update_facing(&mut self) {
        if self.vel.x < -FACING_THRESHOLD && self.facing_right {
            self.facing_right = false;
        } else if self.vel.x > FACING_THRESHOLD && !self.facing_right {
            self.facing_right = true;
        }
    }

    /// Bounce: vertical speed grows with horizontal speed
    pub fn apply_jump_impulse(&mut self) {
        self.vel.y = JUMP_BASE_SPEED + self.vel.x.abs();
    }

    /// Horizontal mirror scale for the sprite
    #[inline]
    pub fn scale_x(&self) -> f32 {
        if self.facing_right { 1.0 } else { -1.0 }
    }

    pub fn is_falling(&self) -> bool {
        self.vel.y < 0.0
    }
}
