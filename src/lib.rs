//! Vibe Knights - A cyberpunk endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, game state)
//! - `game`: Controller tying the simulation to audio and high-score ports
//! - `audio`: Audio port and the Web Audio implementation
//! - `highscores`: Persisted high score
//! - `platform`: Browser frame-loop handle
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use audio::{AudioPort, NullAudio};
pub use game::Game;
pub use highscores::{HighScore, HighScoreStore, MemoryStore};
pub use tuning::Tuning;

/// Game configuration constants (defaults for `Tuning`)
pub mod consts {
    /// Viewport dimensions
    pub const GAME_WIDTH: f32 = 900.0;
    pub const GAME_HEIGHT: f32 = 400.0;
    pub const GROUND_HEIGHT: f32 = 50.0;
    pub const GROUND_Y: f32 = GAME_HEIGHT - GROUND_HEIGHT;

    /// Knight defaults
    pub const KNIGHT_WIDTH: f32 = 30.0;
    pub const KNIGHT_HEIGHT: f32 = 40.0;
    pub const KNIGHT_X: f32 = 100.0;
    pub const JUMP_VELOCITY: f32 = -12.0;
    pub const GRAVITY: f32 = 0.6;
    pub const DUCK_HEIGHT: f32 = 25.0;
    pub const KNIGHT_HITBOX_INSET: f32 = 2.0;

    /// Bars - low obstacles, jump over
    pub const BAR_WIDTH: f32 = 20.0;
    pub const BAR_HEIGHT: f32 = 50.0;
    pub const BAR_MIN_GAP: f32 = 80.0;
    pub const BAR_MAX_GAP: f32 = 150.0;
    pub const BAR_POINTS: u64 = 10;

    /// Dragons - flying obstacles, duck under
    pub const DRAGON_WIDTH: f32 = 50.0;
    pub const DRAGON_HEIGHT: f32 = 30.0;
    pub const DRAGON_Y: f32 = GROUND_Y - 80.0;
    pub const DRAGON_MIN_GAP: f32 = 100.0;
    pub const DRAGON_MAX_GAP: f32 = 180.0;
    pub const DRAGON_POINTS: u64 = 15;
    /// Wing flap advance per tick (radians, render only)
    pub const DRAGON_WING_STEP: f32 = 0.3;

    /// Scroll speed (pixels per tick)
    pub const INITIAL_SPEED: f32 = 6.0;
    pub const SPEED_INCREMENT: f32 = 0.0005;
    pub const MAX_SPEED: f32 = 12.0;

    /// Audio cue every N points
    pub const MILESTONE_INTERVAL: u64 = 100;
}
