//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame
//! - Seeded RNG only
//! - Stable iteration order (bars before dragons, oldest first)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod geometry;
pub mod obstacle;
pub mod runner;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use geometry::Rect;
pub use obstacle::{Obstacle, ObstacleKind};
pub use runner::Runner;
pub use snapshot::{ObstacleView, RunnerView, Snapshot};
pub use spawner::{SpawnStream, Spawner};
pub use state::{Command, GameEvent, GamePhase, SimState};
pub use tick::{apply_command, tick};
