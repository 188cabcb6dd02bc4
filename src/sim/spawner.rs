//! Obstacle spawn timing
//!
//! Each obstacle kind has its own independent stream. A stream fires when
//! the frames elapsed since its last spawn exceed a gap re-rolled every tick
//! from `[min_gap, max_gap)`. Streams never coordinate, so a bar and a
//! dragon can appear on the same frame.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::obstacle::ObstacleKind;
use crate::tuning::Tuning;

/// Spawn timing for one obstacle kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnStream {
    pub kind: ObstacleKind,
    pub last_spawn_frame: u64,
    pub min_gap: f32,
    pub max_gap: f32,
}

impl SpawnStream {
    pub fn new(kind: ObstacleKind, min_gap: f32, max_gap: f32) -> Self {
        Self {
            kind,
            last_spawn_frame: 0,
            min_gap,
            max_gap,
        }
    }

    /// Gap (in frames) for a roll in `[0, 1)`
    #[inline]
    pub fn gap_for_roll(&self, roll: f32) -> f32 {
        self.min_gap + roll * (self.max_gap - self.min_gap)
    }

    /// Whether this stream fires at `frame` for the given roll
    pub fn should_spawn(&self, frame: u64, roll: f32) -> bool {
        let elapsed = frame.saturating_sub(self.last_spawn_frame) as f32;
        elapsed > self.gap_for_roll(roll)
    }

    /// Roll once and record the spawn if the stream fires
    pub fn poll<R: Rng>(&mut self, frame: u64, rng: &mut R) -> bool {
        let roll: f32 = rng.random();
        if self.should_spawn(frame, roll) {
            self.last_spawn_frame = frame;
            true
        } else {
            false
        }
    }
}

/// Both spawn streams
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    pub bars: SpawnStream,
    pub dragons: SpawnStream,
}

impl Spawner {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            bars: SpawnStream::new(ObstacleKind::Bar, tuning.bar_min_gap, tuning.bar_max_gap),
            dragons: SpawnStream::new(
                ObstacleKind::Dragon,
                tuning.dragon_min_gap,
                tuning.dragon_max_gap,
            ),
        }
    }

    /// Run both streams for this frame, bars first.
    ///
    /// Returns the kinds that fired, in order.
    pub fn poll<R: Rng>(&mut self, frame: u64, rng: &mut R) -> Vec<ObstacleKind> {
        let mut fired = Vec::with_capacity(2);
        for stream in [&mut self.bars, &mut self.dragons] {
            if stream.poll(frame, rng) {
                fired.push(stream.kind);
            }
        }
        fired
    }
}
