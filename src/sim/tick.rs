//! Fixed-step simulation tick
//!
//! Core game loop that advances the run by one frame, plus the command
//! handler that drives the phase state machine between frames.

use super::geometry::Rect;
use super::obstacle::{Obstacle, ObstacleKind};
use super::state::{Command, GameEvent, GamePhase, SimState};
use crate::tuning::Tuning;

/// Apply one command. Commands that make no sense in the current phase are
/// ignored.
pub fn apply_command(state: &mut SimState, command: Command) {
    match (state.phase, command) {
        (GamePhase::Start, Command::Start) | (GamePhase::GameOver, Command::Restart) => {
            state.reset_run();
            state.phase = GamePhase::Playing;
            state.events.push(GameEvent::RunStarted);
            log::info!("Run started");
        }
        (GamePhase::Playing, Command::Jump) => {
            if state.runner.jump() {
                state.events.push(GameEvent::Jumped);
            }
        }
        (GamePhase::Playing, Command::Duck) => {
            if state.runner.duck() {
                state.events.push(GameEvent::Ducked);
            }
        }
        (GamePhase::Playing, Command::ReleaseDuck) => state.runner.stop_duck(),
        (phase, command) => {
            log::trace!("Ignoring {:?} in {:?}", command, phase);
        }
    }
}

/// Advance the run by one frame. Does nothing outside `Playing`.
pub fn tick(state: &mut SimState) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.frame += 1;

    state.runner.update();

    // Spawn at the right edge of the viewport
    for kind in state.spawner.poll(state.frame, &mut state.rng) {
        let obstacle = Obstacle::spawn(kind, state.tuning.viewport_width, &state.tuning);
        log::debug!("Spawned {} at frame {}", kind.as_str(), state.frame);
        match kind {
            ObstacleKind::Bar => state.bars.push(obstacle),
            ObstacleKind::Dragon => state.dragons.push(obstacle),
        }
    }

    let runner_hitbox = state.runner.hitbox();
    let runner_x = state.runner.pos.x;

    for collection in [&mut state.bars, &mut state.dragons] {
        let collided = advance_obstacles(
            collection,
            runner_hitbox,
            runner_x,
            state.speed,
            &state.tuning,
            &mut state.score,
            &mut state.events,
        );
        if collided {
            state.phase = GamePhase::GameOver;
            log::info!("Game over at frame {} with score {}", state.frame, state.score);
            return;
        }
    }

    // Ramp up speed
    if state.speed < state.tuning.max_speed {
        state.speed = (state.speed + state.tuning.speed_increment).min(state.tuning.max_speed);
    }
}

/// Move, collide, score and prune one obstacle collection.
///
/// Returns true on collision. The colliding obstacle and everything after it
/// are retained untouched.
fn advance_obstacles(
    obstacles: &mut Vec<Obstacle>,
    runner_hitbox: Rect,
    runner_x: f32,
    speed: f32,
    tuning: &Tuning,
    score: &mut u64,
    events: &mut Vec<GameEvent>,
) -> bool {
    let mut collided = false;

    obstacles.retain_mut(|obstacle| {
        if collided {
            return true;
        }

        obstacle.update(speed);

        if runner_hitbox.overlaps(&obstacle.hitbox()) {
            collided = true;
            events.push(GameEvent::Collision {
                kind: obstacle.kind,
            });
            return true;
        }

        if obstacle.try_pass(runner_x) {
            let points = obstacle.kind.points(tuning);
            events.push(GameEvent::Scored {
                kind: obstacle.kind,
                points,
            });
            award_points(score, points, tuning.milestone_interval, events);
        }

        !obstacle.is_off_screen()
    });

    collided
}

/// Add points, emitting a milestone event when a multiple of `interval` is
/// reached or jumped over.
fn award_points(score: &mut u64, points: u64, interval: u64, events: &mut Vec<GameEvent>) {
    let before = *score / interval;
    *score += points;
    if *score / interval > before {
        events.push(GameEvent::ScoreMilestone { score: *score });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn playing(seed: u64) -> SimState {
        let mut state = SimState::new(Tuning::default(), seed);
        apply_command(&mut state, Command::Start);
        state.drain_events();
        state
    }

    #[test]
    fn test_start_enters_playing() {
        let mut state = SimState::new(Tuning::default(), 1);
        apply_command(&mut state, Command::Start);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.drain_events(), vec![GameEvent::RunStarted]);
    }

    #[test]
    fn test_wrong_phase_commands_ignored() {
        let mut state = SimState::new(Tuning::default(), 1);
        for cmd in [Command::Jump, Command::Duck, Command::ReleaseDuck, Command::Restart] {
            apply_command(&mut state, cmd);
        }
        assert_eq!(state.phase, GamePhase::Start);
        assert!(!state.runner.airborne);
        assert!(!state.runner.ducking);
        assert!(state.events.is_empty());

        let mut state = playing(1);
        apply_command(&mut state, Command::Start);
        apply_command(&mut state, Command::Restart);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_tick_outside_playing_is_frozen() {
        let mut state = SimState::new(Tuning::default(), 1);
        tick(&mut state);
        assert_eq!(state.frame, 0);

        let mut state = playing(1);
        state.phase = GamePhase::GameOver;
        let speed = state.speed;
        tick(&mut state);
        assert_eq!(state.frame, 0);
        assert_eq!(state.speed, speed);
    }

    #[test]
    fn test_jump_and_duck_emit_events_only_when_effective() {
        let mut state = playing(1);
        apply_command(&mut state, Command::Jump);
        apply_command(&mut state, Command::Jump);
        apply_command(&mut state, Command::Duck);
        assert_eq!(state.drain_events(), vec![GameEvent::Jumped]);
        assert!(!state.runner.ducking);
    }

    #[test]
    fn test_duck_and_release() {
        let mut state = playing(1);
        apply_command(&mut state, Command::Duck);
        assert!(state.runner.ducking);
        assert_eq!(state.drain_events(), vec![GameEvent::Ducked]);
        apply_command(&mut state, Command::ReleaseDuck);
        assert!(!state.runner.ducking);
        assert_eq!(state.runner.size.y, 40.0);
    }

    #[test]
    fn test_jump_returns_to_ground() {
        let mut state = playing(3);
        apply_command(&mut state, Command::Jump);
        assert!(state.runner.airborne);
        assert_eq!(state.runner.velocity_y, -12.0);

        let mut ticks = 0;
        while state.runner.airborne {
            tick(&mut state);
            ticks += 1;
            assert!(ticks < 100);
        }
        assert_eq!(state.runner.pos.y, 310.0);
        assert_eq!(state.runner.velocity_y, 0.0);
        // No obstacle can reach the knight before the first spawn gap
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_speed_ramps_and_caps() {
        let mut state = playing(1);
        tick(&mut state);
        assert!((state.speed - 6.0005).abs() < 1e-5);

        state.speed = state.tuning.max_speed - 0.0001;
        state.bars.clear();
        state.dragons.clear();
        tick(&mut state);
        assert_eq!(state.speed, state.tuning.max_speed);
        tick(&mut state);
        assert_eq!(state.speed, state.tuning.max_speed);
    }

    #[test]
    fn test_bar_collision_ends_run() {
        let mut state = playing(1);
        let x = 110.0 + state.speed;
        state.bars.push(Obstacle::bar(x, &state.tuning));
        tick(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.bars.len(), 1, "colliding obstacle retained");
        assert!(state.drain_events().contains(&GameEvent::Collision {
            kind: ObstacleKind::Bar
        }));
    }

    #[test]
    fn test_jumping_clears_bar() {
        let mut state = playing(1);
        apply_command(&mut state, Command::Jump);
        // Let the knight rise above the bar before it arrives
        for _ in 0..8 {
            tick(&mut state);
        }
        let x = 110.0 + state.speed;
        state.bars.push(Obstacle::bar(x, &state.tuning));
        tick(&mut state);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_dragon_passes_over_standing_knight() {
        let mut state = playing(1);
        let x = 110.0 + state.speed;
        state.dragons.push(Obstacle::dragon(x, &state.tuning));
        tick(&mut state);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_jumping_into_dragon_ends_run() {
        let mut state = playing(1);
        apply_command(&mut state, Command::Jump);
        for _ in 0..3 {
            tick(&mut state);
        }
        let x = 100.0 + state.speed;
        state.dragons.push(Obstacle::dragon(x, &state.tuning));
        tick(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.drain_events().contains(&GameEvent::Collision {
            kind: ObstacleKind::Dragon
        }));
    }

    #[test]
    fn test_collision_halts_rest_of_tick() {
        let mut state = playing(1);
        let speed = state.speed;
        state.bars.push(Obstacle::bar(110.0 + speed, &state.tuning));
        // Would be scored this tick if processing continued
        state.bars.push(Obstacle::bar(75.0 + speed, &state.tuning));
        state.dragons.push(Obstacle::dragon(50.0 + speed, &state.tuning));

        tick(&mut state);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, 0);
        assert_eq!(state.speed, speed);
        assert_eq!(state.bars[1].x(), 75.0 + speed);
        assert_eq!(state.dragons[0].x(), 50.0 + speed);
        assert!(!state.bars[1].passed);
    }

    #[test]
    fn test_scoring_once_per_obstacle() {
        let mut state = playing(1);
        // Right edge lands at 99, just behind the knight's x of 100
        let x = 79.0 + state.speed;
        state.bars.push(Obstacle::bar(x, &state.tuning));
        tick(&mut state);
        assert_eq!(state.score, 10);
        tick(&mut state);
        assert_eq!(state.score, 10);

        let x = 40.0 + state.speed;
        state.dragons.push(Obstacle::dragon(x, &state.tuning));
        tick(&mut state);
        assert_eq!(state.score, 25);
        let scored: Vec<_> = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::Scored { .. }))
            .collect();
        assert_eq!(scored.len(), 2);
    }

    #[test]
    fn test_milestone_on_crossing() {
        let mut events = Vec::new();
        let mut score = 90;
        award_points(&mut score, 10, 100, &mut events);
        assert_eq!(events, vec![GameEvent::ScoreMilestone { score: 100 }]);

        // Jumping over a multiple still counts
        let mut events = Vec::new();
        let mut score = 95;
        award_points(&mut score, 15, 100, &mut events);
        assert_eq!(events, vec![GameEvent::ScoreMilestone { score: 110 }]);

        let mut events = Vec::new();
        let mut score = 100;
        award_points(&mut score, 15, 100, &mut events);
        assert!(events.is_empty());
    }

    #[test]
    fn test_zero_milestone_interval_scores_safely() {
        let tuning = Tuning {
            milestone_interval: 0,
            ..Tuning::default()
        };
        let mut state = SimState::new(tuning, 1);
        apply_command(&mut state, Command::Start);
        let x = 79.0 + state.speed;
        state.bars.push(Obstacle::bar(x, &state.tuning));
        tick(&mut state);
        assert_eq!(state.score, 10);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_off_screen_obstacles_pruned() {
        let mut state = playing(1);
        let w = state.tuning.bar_width;
        // Right edge ends at exactly 0: kept
        state.bars.push(Obstacle::bar(-w + state.speed, &state.tuning));
        tick(&mut state);
        assert_eq!(state.bars.len(), 1);
        tick(&mut state);
        assert!(state.bars.is_empty());
    }

    #[test]
    fn test_restart_resets_run() {
        let mut state = playing(1);
        state.score = 80;
        state.phase = GamePhase::GameOver;
        state.bars.push(Obstacle::bar(300.0, &state.tuning));
        apply_command(&mut state, Command::Restart);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.frame, 0);
        assert!(state.bars.is_empty());
        assert_eq!(state.speed, state.tuning.initial_speed);
    }

    #[test]
    fn test_determinism() {
        let mut a = playing(99);
        let mut b = playing(99);
        for i in 0..600 {
            if i % 45 == 0 {
                apply_command(&mut a, Command::Jump);
                apply_command(&mut b, Command::Jump);
            }
            tick(&mut a);
            tick(&mut b);
        }
        assert_eq!(a.frame, b.frame);
        assert_eq!(a.score, b.score);
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.bars.len(), b.bars.len());
        assert_eq!(a.dragons.len(), b.dragons.len());
    }

    fn command_strategy() -> impl Strategy<Value = Option<Command>> {
        prop_oneof![
            4 => Just(None),
            1 => Just(Some(Command::Jump)),
            1 => Just(Some(Command::Duck)),
            1 => Just(Some(Command::ReleaseDuck)),
        ]
    }

    proptest! {
        #[test]
        fn prop_run_invariants(
            seed in any::<u64>(),
            commands in prop::collection::vec(command_strategy(), 1..1500),
        ) {
            let mut state = playing(seed);
            let max_speed = state.tuning.max_speed;

            for command in commands {
                if state.phase == GamePhase::GameOver {
                    apply_command(&mut state, Command::Restart);
                    state.drain_events();
                }
                if let Some(command) = command {
                    apply_command(&mut state, command);
                }

                let score_before = state.score;
                let speed_before = state.speed;
                let was_airborne = state.runner.airborne;
                let velocity_before = state.runner.velocity_y;

                tick(&mut state);

                // Score grows only by scored obstacles, 10 or 15 each
                let mut gained = 0;
                for event in state.drain_events() {
                    if let GameEvent::Scored { points, .. } = event {
                        prop_assert!(points == 10 || points == 15);
                        gained += points;
                    }
                }
                prop_assert_eq!(state.score, score_before + gained);

                // Speed never decreases and never exceeds the cap
                prop_assert!(state.speed >= speed_before);
                prop_assert!(state.speed <= max_speed);

                // Gravity adds exactly one step while airborne
                if was_airborne && state.runner.airborne {
                    prop_assert!((state.runner.velocity_y - velocity_before - 0.6).abs() < 1e-3);
                }

                // Nothing fully off-screen survives a tick
                if state.phase == GamePhase::Playing {
                    for obstacle in state.obstacles() {
                        prop_assert!(!obstacle.is_off_screen());
                    }
                }
            }
        }
    }
}
