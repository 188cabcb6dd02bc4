//! The knight - the player-controlled runner
//!
//! The knight never moves horizontally; the world scrolls past it. Only the
//! vertical axis is simulated: a jump sets an upward velocity and constant
//! gravity brings the knight back to the ground line.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::tuning::Tuning;

/// The runner entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Runner {
    /// Top-left corner (x is fixed for the whole run)
    pub pos: Vec2,
    /// Current width and height (height shrinks while ducking)
    pub size: Vec2,
    /// Vertical velocity in pixels/tick (negative = upward)
    pub velocity_y: f32,
    pub airborne: bool,
    pub ducking: bool,

    // -- Cached physics parameters --
    ground_y: f32,
    standing_height: f32,
    duck_height: f32,
    jump_velocity: f32,
    gravity: f32,
    hitbox_inset: f32,
}

impl Runner {
    /// Create a runner standing on the ground
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.knight_x, tuning.standing_y()),
            size: Vec2::new(tuning.knight_width, tuning.knight_height),
            velocity_y: 0.0,
            airborne: false,
            ducking: false,
            ground_y: tuning.ground_y,
            standing_height: tuning.knight_height,
            duck_height: tuning.duck_height,
            jump_velocity: tuning.jump_velocity,
            gravity: tuning.gravity,
            hitbox_inset: tuning.knight_hitbox_inset,
        }
    }

    /// Start a jump. Ignored while airborne or ducking.
    ///
    /// Returns true if the jump took effect.
    pub fn jump(&mut self) -> bool {
        if self.airborne || self.ducking {
            return false;
        }
        self.velocity_y = self.jump_velocity;
        self.airborne = true;
        true
    }

    /// Crouch, keeping the feet on the ground line. Ignored while airborne.
    ///
    /// Returns true if the duck took effect.
    pub fn duck(&mut self) -> bool {
        if self.airborne {
            return false;
        }
        self.ducking = true;
        self.size.y = self.duck_height;
        self.pos.y = self.ground_y - self.duck_height;
        true
    }

    /// Stand back up at full height on the ground line. Always applies,
    /// including mid-jump.
    pub fn stop_duck(&mut self) {
        self.ducking = false;
        self.size.y = self.standing_height;
        self.pos.y = self.ground_y - self.standing_height;
    }

    /// Integrate one tick of vertical motion
    pub fn update(&mut self) {
        if !self.airborne {
            return;
        }

        self.velocity_y += self.gravity;
        self.pos.y += self.velocity_y;

        let rest_y = self.ground_y - self.size.y;
        if self.pos.y >= rest_y {
            self.pos.y = rest_y;
            self.velocity_y = 0.0;
            self.airborne = false;
        }
    }

    /// Full visual bounding box
    pub fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Collision box, inset from the bounds for forgiving hits
    pub fn hitbox(&self) -> Rect {
        self.bounds().inset(self.hitbox_inset)
    }

    /// Y of the feet
    #[inline]
    pub fn feet_y(&self) -> f32 {
        self.pos.y + self.size.y
    }
}
