//! Simulation state and core types
//!
//! `SimState` owns everything a run needs: the knight, both obstacle
//! collections, the spawner and the RNG. Nothing else holds references
//! into it.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::obstacle::{Obstacle, ObstacleKind};
use super::runner::Runner;
use super::spawner::Spawner;
use crate::tuning::Tuning;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the first start
    #[default]
    Start,
    /// Active run
    Playing,
    /// Run ended by a collision
    GameOver,
}

/// Player/host commands, applied between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Start,
    Jump,
    Duck,
    ReleaseDuck,
    Restart,
}

/// Events produced while applying commands or ticking.
///
/// Drained by the controller each frame and turned into audio cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new run began
    RunStarted,
    Jumped,
    Ducked,
    /// An obstacle was passed and scored
    Scored { kind: ObstacleKind, points: u64 },
    /// Score crossed a multiple of the milestone interval
    ScoreMilestone { score: u64 },
    /// The knight hit an obstacle; the run is over
    Collision { kind: ObstacleKind },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimState {
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub runner: Runner,
    /// Live bars, oldest first
    pub bars: Vec<Obstacle>,
    /// Live dragons, oldest first
    pub dragons: Vec<Obstacle>,
    /// Scroll speed in pixels/tick
    pub speed: f32,
    pub score: u64,
    /// Ticks since the run started
    pub frame: u64,
    pub spawner: Spawner,
    pub rng: Pcg32,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
}

impl SimState {
    /// Create a state on the title screen. `tuning` is repaired first so
    /// hand-built values cannot break the tick.
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let tuning = tuning.sanitized();
        Self {
            runner: Runner::new(&tuning),
            bars: Vec::new(),
            dragons: Vec::new(),
            speed: tuning.initial_speed,
            score: 0,
            frame: 0,
            spawner: Spawner::new(&tuning),
            phase: GamePhase::Start,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            tuning,
        }
    }

    /// Reset everything a run owns. The RNG keeps its stream so consecutive
    /// runs differ.
    pub fn reset_run(&mut self) {
        self.runner = Runner::new(&self.tuning);
        self.bars.clear();
        self.dragons.clear();
        self.speed = self.tuning.initial_speed;
        self.score = 0;
        self.frame = 0;
        self.spawner = Spawner::new(&self.tuning);
    }

    /// Take all buffered events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// All live obstacles, bars first
    pub fn obstacles(&self) -> impl Iterator<Item = &Obstacle> {
        self.bars.iter().chain(self.dragons.iter())
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}
