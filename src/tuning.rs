//! Data-driven game balance
//!
//! Every gameplay constant lives here so a run can be replayed or rebalanced
//! from a JSON file. `Tuning::default()` is the shipped balance.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay constants consumed by the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Viewport ===
    pub viewport_width: f32,
    /// Y coordinate of the ground line (feet rest here)
    pub ground_y: f32,

    // === Knight ===
    pub knight_x: f32,
    pub knight_width: f32,
    pub knight_height: f32,
    pub duck_height: f32,
    /// Vertical velocity applied on jump (negative = up)
    pub jump_velocity: f32,
    /// Added to vertical velocity every airborne tick
    pub gravity: f32,
    /// Hitbox inset on every side
    pub knight_hitbox_inset: f32,

    // === Bars (low obstacles) ===
    pub bar_width: f32,
    pub bar_height: f32,
    pub bar_min_gap: f32,
    pub bar_max_gap: f32,
    pub bar_points: u64,

    // === Dragons (high obstacles) ===
    pub dragon_width: f32,
    pub dragon_height: f32,
    pub dragon_y: f32,
    pub dragon_min_gap: f32,
    pub dragon_max_gap: f32,
    pub dragon_points: u64,

    // === Speed ===
    pub initial_speed: f32,
    pub speed_increment: f32,
    pub max_speed: f32,

    /// Score interval that triggers the milestone cue
    pub milestone_interval: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            viewport_width: GAME_WIDTH,
            ground_y: GROUND_Y,

            knight_x: KNIGHT_X,
            knight_width: KNIGHT_WIDTH,
            knight_height: KNIGHT_HEIGHT,
            duck_height: DUCK_HEIGHT,
            jump_velocity: JUMP_VELOCITY,
            gravity: GRAVITY,
            knight_hitbox_inset: KNIGHT_HITBOX_INSET,

            bar_width: BAR_WIDTH,
            bar_height: BAR_HEIGHT,
            bar_min_gap: BAR_MIN_GAP,
            bar_max_gap: BAR_MAX_GAP,
            bar_points: BAR_POINTS,

            dragon_width: DRAGON_WIDTH,
            dragon_height: DRAGON_HEIGHT,
            dragon_y: DRAGON_Y,
            dragon_min_gap: DRAGON_MIN_GAP,
            dragon_max_gap: DRAGON_MAX_GAP,
            dragon_points: DRAGON_POINTS,

            initial_speed: INITIAL_SPEED,
            speed_increment: SPEED_INCREMENT,
            max_speed: MAX_SPEED,

            milestone_interval: MILESTONE_INTERVAL,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Tuning>(json).map(Tuning::sanitized)
    }

    /// Repair values that would break simulation invariants
    pub fn sanitized(mut self) -> Self {
        if self.bar_min_gap > self.bar_max_gap {
            log::warn!("bar gap range inverted, swapping");
            std::mem::swap(&mut self.bar_min_gap, &mut self.bar_max_gap);
        }
        if self.dragon_min_gap > self.dragon_max_gap {
            log::warn!("dragon gap range inverted, swapping");
            std::mem::swap(&mut self.dragon_min_gap, &mut self.dragon_max_gap);
        }
        if self.max_speed < self.initial_speed {
            log::warn!(
                "max_speed {} below initial_speed {}, raising",
                self.max_speed,
                self.initial_speed
            );
            self.max_speed = self.initial_speed;
        }
        if self.speed_increment < 0.0 {
            log::warn!("negative speed_increment, clamping to 0");
            self.speed_increment = 0.0;
        }
        if self.duck_height > self.knight_height {
            log::warn!("duck_height taller than knight, clamping");
            self.duck_height = self.knight_height;
        }
        if self.milestone_interval == 0 {
            self.milestone_interval = MILESTONE_INTERVAL;
        }
        self
    }

    /// Y of the knight's top edge when standing on the ground
    #[inline]
    pub fn standing_y(&self) -> f32 {
        self.ground_y - self.knight_height
    }

    /// Y of the bar's top edge (bars sit on the ground)
    #[inline]
    pub fn bar_y(&self) -> f32 {
        self.ground_y - self.bar_height
    }
}
