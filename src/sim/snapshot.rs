//! Read-only frame view for renderers
//!
//! Renderers receive a `Snapshot` built after each tick and never touch the
//! simulation itself.

use serde::Serialize;

use super::geometry::Rect;
use super::obstacle::ObstacleKind;
use super::state::{GamePhase, SimState};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunnerView {
    pub bounds: Rect,
    pub airborne: bool,
    pub ducking: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObstacleView {
    pub kind: ObstacleKind,
    pub bounds: Rect,
    pub wing_phase: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub frame: u64,
    pub score: u64,
    pub high_score: u64,
    pub speed: f32,
    pub muted: bool,
    pub runner: RunnerView,
    pub obstacles: Vec<ObstacleView>,
}

impl Snapshot {
    pub fn capture(state: &SimState, high_score: u64, muted: bool) -> Self {
        Self {
            phase: state.phase,
            frame: state.frame,
            score: state.score,
            high_score,
            speed: state.speed,
            muted,
            runner: RunnerView {
                bounds: state.runner.bounds(),
                airborne: state.runner.airborne,
                ducking: state.runner.ducking,
            },
            obstacles: state
                .obstacles()
                .map(|o| ObstacleView {
                    kind: o.kind,
                    bounds: o.bounds,
                    wing_phase: o.wing_phase,
                })
                .collect(),
        }
    }

    /// JSON for the browser renderer
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            log::warn!("Snapshot serialization failed: {}", e);
            String::from("{}")
        })
    }
}
