//! Scrolling obstacles
//!
//! Bars stand on the ground and must be jumped. Dragons fly at head height
//! and must be ducked. Both scroll left at the shared world speed.

use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::consts::DRAGON_WING_STEP;
use crate::tuning::Tuning;

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Low energy bar on the ground
    Bar,
    /// Flying dragon at head height
    Dragon,
}

impl ObstacleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleKind::Bar => "bar",
            ObstacleKind::Dragon => "dragon",
        }
    }

    /// Points awarded for passing one
    pub fn points(&self, tuning: &Tuning) -> u64 {
        match self {
            ObstacleKind::Bar => tuning.bar_points,
            ObstacleKind::Dragon => tuning.dragon_points,
        }
    }
}

/// An obstacle entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    /// Visual bounding box
    pub bounds: Rect,
    /// Scored once its trailing edge passes the knight
    pub passed: bool,
    /// Wing flap phase in radians (dragons only, render only)
    #[serde(default)]
    pub wing_phase: f32,
}

impl Obstacle {
    /// Spawn a bar with its left edge at `x`
    pub fn bar(x: f32, tuning: &Tuning) -> Self {
        Self {
            kind: ObstacleKind::Bar,
            bounds: Rect::new(x, tuning.bar_y(), tuning.bar_width, tuning.bar_height),
            passed: false,
            wing_phase: 0.0,
        }
    }

    /// Spawn a dragon with its left edge at `x`
    pub fn dragon(x: f32, tuning: &Tuning) -> Self {
        Self {
            kind: ObstacleKind::Dragon,
            bounds: Rect::new(
                x,
                tuning.dragon_y,
                tuning.dragon_width,
                tuning.dragon_height,
            ),
            passed: false,
            wing_phase: 0.0,
        }
    }

    pub fn spawn(kind: ObstacleKind, x: f32, tuning: &Tuning) -> Self {
        match kind {
            ObstacleKind::Bar => Self::bar(x, tuning),
            ObstacleKind::Dragon => Self::dragon(x, tuning),
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.bounds.pos.x
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.bounds.size.x
    }

    /// Scroll left by `speed` pixels
    pub fn update(&mut self, speed: f32) {
        self.bounds.pos.x -= speed;
        if self.kind == ObstacleKind::Dragon {
            self.wing_phase = (self.wing_phase + DRAGON_WING_STEP) % std::f32::consts::TAU;
        }
    }

    /// Entirely left of the viewport
    pub fn is_off_screen(&self) -> bool {
        self.bounds.right() < 0.0
    }

    /// Collision box. Dragons exclude the wing tips and the top of the wings.
    pub fn hitbox(&self) -> Rect {
        match self.kind {
            ObstacleKind::Bar => self.bounds,
            ObstacleKind::Dragon => Rect::new(
                self.bounds.pos.x + 10.0,
                self.bounds.pos.y + 8.0,
                self.bounds.size.x - 15.0,
                self.bounds.size.y - 8.0,
            ),
        }
    }

    /// Mark as passed if the trailing edge is left of `runner_x`.
    ///
    /// Returns true exactly once per obstacle.
    pub fn try_pass(&mut self, runner_x: f32) -> bool {
        if !self.passed && self.bounds.right() < runner_x {
            self.passed = true;
            return true;
        }
        false
    }
}
