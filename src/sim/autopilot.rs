//! Idle/demo mode - the knight plays itself
//!
//! Looks at the nearest obstacles ahead and decides which commands to issue
//! this frame. Good enough for attract mode and the native headless run,
//! not a perfect player.

use super::obstacle::Obstacle;
use super::state::{Command, SimState};

/// Jump this many ticks before a bar reaches the knight
const JUMP_LEAD_TICKS: f32 = 10.0;
/// Start ducking this many ticks before a dragon arrives
const DUCK_LEAD_TICKS: f32 = 14.0;

/// Distance from the knight's front edge to the obstacle's left edge.
/// Negative once the obstacle overlaps the knight horizontally.
fn gap_ahead(state: &SimState, obstacle: &Obstacle) -> f32 {
    obstacle.x() - state.runner.bounds().right()
}

/// Nearest obstacle that hasn't fully passed the knight
fn nearest<'a>(state: &SimState, obstacles: &'a [Obstacle]) -> Option<&'a Obstacle> {
    let runner_x = state.runner.pos.x;
    obstacles
        .iter()
        .filter(|o| o.bounds.right() >= runner_x)
        .min_by(|a, b| a.x().total_cmp(&b.x()))
}

/// Commands for this frame (possibly none)
pub fn decide(state: &SimState) -> Vec<Command> {
    let mut commands = Vec::new();
    if !state.is_playing() {
        return commands;
    }

    let runner = &state.runner;
    let speed = state.speed;

    let bar_imminent = nearest(state, &state.bars).is_some_and(|bar| {
        let gap = gap_ahead(state, bar);
        gap > 0.0 && gap <= speed * JUMP_LEAD_TICKS
    });

    let dragon_near = nearest(state, &state.dragons).is_some_and(|dragon| {
        let gap = gap_ahead(state, dragon);
        gap <= speed * DUCK_LEAD_TICKS
    });

    if bar_imminent {
        if runner.ducking {
            commands.push(Command::ReleaseDuck);
        }
        if !runner.airborne {
            commands.push(Command::Jump);
        }
    } else if dragon_near && !runner.airborne {
        if !runner.ducking {
            commands.push(Command::Duck);
        }
    } else if runner.ducking {
        commands.push(Command::ReleaseDuck);
    }

    commands
}
