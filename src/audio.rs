//! Audio output
//!
//! The simulation never plays sound itself. The controller turns game events
//! into calls on an `AudioPort`; the browser build plugs in `WebAudio`,
//! which synthesizes every cue with oscillators - no external files needed.

/// Sound cues the game can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Knight leaves the ground
    Jump,
    /// Knight crouches
    Duck,
    /// Knight hits an obstacle
    Collision,
    /// Score crossed a multiple of 100
    Milestone,
}

/// Fire-and-forget audio sink injected into the controller
pub trait AudioPort {
    fn on_jump(&mut self);
    fn on_duck(&mut self);
    fn on_collision(&mut self);
    fn on_score_milestone(&mut self, score: u64);

    /// Mute/unmute all audio
    fn set_muted(&mut self, muted: bool);

    /// Release platform resources. Called once on teardown; further cues
    /// must be silently dropped.
    fn dispose(&mut self) {}
}

/// Silent audio port (native builds, tests, or when audio is unavailable)
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioPort for NullAudio {
    fn on_jump(&mut self) {}
    fn on_duck(&mut self) {}
    fn on_collision(&mut self) {}
    fn on_score_milestone(&mut self, _score: u64) {}
    fn set_muted(&mut self, _muted: bool) {}
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioPort, SoundEffect};

    /// Web Audio API implementation
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        muted: bool,
    }

    impl Default for WebAudio {
        fn default() -> Self {
            Self::new()
        }
    }

    impl WebAudio {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx, muted: false }
        }

        fn effective_volume(&self) -> f32 {
            if self.muted { 0.0 } else { 1.0 }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Jump => self.play_jump(ctx, vol),
                SoundEffect::Duck => self.play_duck(ctx, vol),
                SoundEffect::Collision => self.play_collision(ctx, vol),
                SoundEffect::Milestone => self.play_milestone(ctx, vol),
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Single tone with exponential fade
        fn play_tone(
            &self,
            ctx: &AudioContext,
            vol: f32,
            freq: f32,
            duration: f64,
            osc_type: OscillatorType,
        ) {
            let Some((osc, gain)) = self.create_osc(ctx, freq, osc_type) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + duration)
                .ok();

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + duration).ok();
        }

        /// Jump - rising square chirp
        fn play_jump(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                .ok();
            osc.frequency().set_value_at_time(300.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(600.0, t + 0.1)
                .ok();

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + 0.1).ok();
        }

        /// Duck - short low blip
        fn play_duck(&self, ctx: &AudioContext, vol: f32) {
            self.play_tone(ctx, vol, 200.0, 0.1, OscillatorType::Square);
        }

        /// Collision - falling sawtooth crunch
        fn play_collision(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 200.0, OscillatorType::Sawtooth) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                .ok();
            osc.frequency().set_value_at_time(200.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(50.0, t + 0.3)
                .ok();

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + 0.3).ok();
        }

        /// Milestone - bright ding
        fn play_milestone(&self, ctx: &AudioContext, vol: f32) {
            self.play_tone(ctx, vol, 800.0, 0.1, OscillatorType::Sine);
        }
    }

    impl AudioPort for WebAudio {
        fn on_jump(&mut self) {
            self.play(SoundEffect::Jump);
        }

        fn on_duck(&mut self) {
            self.play(SoundEffect::Duck);
        }

        fn on_collision(&mut self) {
            self.play(SoundEffect::Collision);
        }

        fn on_score_milestone(&mut self, _score: u64) {
            self.play(SoundEffect::Milestone);
        }

        fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        fn dispose(&mut self) {
            if let Some(ctx) = self.ctx.take() {
                let _ = ctx.close();
                log::info!("Audio context closed");
            }
        }
    }
}
