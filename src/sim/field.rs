//! Platform field: a fixed pool of slots recycled from the bottom to the top
//!
//! Placement walks a cursor upward. Each step is a random gap in
//! `[min_step, max_step)`, and `max_step` grows a little with every
//! placement until it reaches the configured cap.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Platform, PlatformVariant, ScrollState};
use crate::consts::*;
use crate::settings::SimConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformField {
    /// Slot `i` is always platform `i`; slots are never added or removed
    pub slots: Vec<Platform>,
    pub scroll: ScrollState,
    /// Placements since the last reset (diagnostic)
    pub placement_count: u64,
}

impl PlatformField {
    pub fn new(sizes: &[Vec2]) -> Self {
        Self {
            slots: sizes.iter().copied().map(Platform::new).collect(),
            scroll: ScrollState::default(),
            placement_count: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Rebuild the initial layout, placing slots bottom-up in index order
    pub fn reset_all<R: Rng + ?Sized>(&mut self, config: &SimConfig, rng: &mut R) {
        self.scroll = ScrollState {
            max_step: INITIAL_MAX_PLATFORM_STEP.min(config.max_platform_step),
            ..ScrollState::default()
        };
        self.placement_count = 0;
        for slot in 0..self.slots.len() {
            self.recycle_slot(slot, config, rng);
        }
    }

    /// Move `slot` to the next placement above the current top
    pub fn recycle_slot<R: Rng + ?Sized>(&mut self, slot: usize, config: &SimConfig, rng: &mut R) {
        let first = self.scroll.placement_y < 0.0;
        if first {
            self.scroll.placement_y = FIRST_PLATFORM_Y;
        } else {
            self.scroll.placement_y += self.next_step(config, rng);
            if self.scroll.max_step < config.max_platform_step {
                self.scroll.max_step =
                    (self.scroll.max_step + PLATFORM_STEP_INCREMENT).min(config.max_platform_step);
            }
        }

        let platform = &mut self.slots[slot];
        platform.variant = PlatformVariant::random(rng);
        platform.flipped = rng.random_bool(0.5);

        let x = if first {
            config.screen_width * 0.5
        } else {
            // Keep the whole sprite on screen
            let width = platform.size.x;
            rng.random::<f32>() * (config.screen_width - width.trunc()) + width * 0.5
        };
        platform.pos = Vec2::new(x, self.scroll.placement_y);
        self.placement_count += 1;

        log::debug!(
            "Placed platform {} at ({:.1}, {:.1}), max step {:.1}",
            slot,
            x,
            self.scroll.placement_y,
            self.scroll.max_step
        );
    }

    /// Random gap above the previous platform. The span is truncated to
    /// whole units, so early gaps land in `[min, min + 10)`.
    fn next_step<R: Rng + ?Sized>(&self, config: &SimConfig, rng: &mut R) -> f32 {
        let span = (self.scroll.max_step - config.min_platform_step).trunc().max(0.0);
        rng.random::<f32>() * span + config.min_platform_step
    }
}
