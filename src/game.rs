//! Game controller
//!
//! Owns the simulation plus the injected audio and high-score ports. Hosts
//! (the browser loop, the native demo) only talk to `Game`.

use crate::audio::AudioPort;
use crate::highscores::{HighScore, HighScoreStore};
use crate::sim::{self, Command, GameEvent, GamePhase, SimState, Snapshot, autopilot};
use crate::tuning::Tuning;

pub struct Game {
    state: SimState,
    audio: Box<dyn AudioPort>,
    store: Box<dyn HighScoreStore>,
    high_score: HighScore,
    muted: bool,
    /// Autopilot steers the knight
    idle: bool,
    disposed: bool,
}

impl Game {
    /// Create a controller on the title screen. Reads the high score once.
    pub fn new(
        tuning: Tuning,
        seed: u64,
        audio: Box<dyn AudioPort>,
        store: Box<dyn HighScoreStore>,
    ) -> Self {
        let high_score = HighScore::load(store.as_ref());
        log::info!("Game created with seed {}", seed);
        Self {
            state: SimState::new(tuning, seed),
            audio,
            store,
            high_score,
            muted: false,
            idle: false,
            disposed: false,
        }
    }

    pub fn start(&mut self) {
        self.command(Command::Start);
    }

    pub fn jump(&mut self) {
        self.command(Command::Jump);
    }

    pub fn duck(&mut self) {
        self.command(Command::Duck);
    }

    pub fn stop_duck(&mut self) {
        self.command(Command::ReleaseDuck);
    }

    pub fn restart(&mut self) {
        self.command(Command::Restart);
    }

    fn command(&mut self, command: Command) {
        if self.disposed {
            return;
        }
        sim::apply_command(&mut self.state, command);
        self.dispatch_events();
    }

    /// Advance one frame
    pub fn tick(&mut self) {
        if self.disposed {
            return;
        }

        if self.idle {
            for command in autopilot::decide(&self.state) {
                sim::apply_command(&mut self.state, command);
            }
        }

        let was_playing = self.state.is_playing();
        sim::tick(&mut self.state);
        self.dispatch_events();

        if was_playing && self.state.phase == GamePhase::GameOver {
            self.high_score.submit(self.state.score, self.store.as_mut());
        }
    }

    /// Turn buffered simulation events into audio cues
    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Jumped => self.audio.on_jump(),
                GameEvent::Ducked => self.audio.on_duck(),
                GameEvent::Collision { .. } => self.audio.on_collision(),
                GameEvent::ScoreMilestone { score } => self.audio.on_score_milestone(score),
                GameEvent::RunStarted | GameEvent::Scored { .. } => {}
            }
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state, self.high_score.value, self.muted)
    }

    /// Flip mute. Returns the new state.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.audio.set_muted(self.muted);
        log::info!("Muted: {}", self.muted);
        self.muted
    }

    /// Flip autopilot. Returns the new state.
    pub fn toggle_idle(&mut self) -> bool {
        self.idle = !self.idle;
        log::info!("Idle mode: {}", self.idle);
        self.idle
    }

    /// Whether the frame loop should keep scheduling frames
    pub fn is_running(&self) -> bool {
        !self.disposed && self.state.is_playing()
    }

    /// Release the audio port. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.audio.dispose();
        log::info!("Game shut down");
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.value
    }

    /// Read-only access to the simulation
    pub fn state(&self) -> &SimState {
        &self.state
    }
}
