//! Landing detection between the falling avatar and platforms
//!
//! A landing is a point test of the avatar's anchor against a band sitting
//! on top of each platform. Both intervals are open.

use glam::Vec2;

use super::state::{Avatar, Platform};
use crate::consts::COLLISION_MARGIN;

/// Open region above a platform that counts as a landing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandingBand {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl LandingBand {
    pub fn new(platform: &Platform, avatar_size: Vec2, top_padding: f32) -> Self {
        let half_w = platform.size.x * 0.5;
        Self {
            min_x: platform.pos.x - half_w - COLLISION_MARGIN,
            max_x: platform.pos.x + half_w + COLLISION_MARGIN,
            min_y: platform.pos.y,
            max_y: platform.pos.y + (platform.size.y + avatar_size.y) * 0.5 - top_padding,
        }
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x > self.min_x && p.x < self.max_x && p.y > self.min_y && p.y < self.max_y
    }
}

/// Slots whose landing band holds the avatar, in ascending slot order.
///
/// Pure function of its inputs; the caller decides what a hit means.
pub fn landing_slots(avatar: &Avatar, platforms: &[Platform], top_padding: f32) -> Vec<usize> {
    platforms
        .iter()
        .enumerate()
        .filter(|(_, p)| LandingBand::new(p, avatar.size, top_padding).contains(avatar.pos))
        .map(|(slot, _)| slot)
        .collect()
}
