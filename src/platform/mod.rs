//! Platform abstraction layer
//!
//! Handles the browser's animation-frame scheduling. `FrameLoop` tracks the
//! one pending callback so teardown can cancel it; the wasm helpers below
//! talk to `window.requestAnimationFrame`.

/// Bookkeeping for a self-rescheduling frame callback.
///
/// At most one request is pending at a time. Stopping is idempotent and
/// hands back the pending request id so the caller can cancel it.
#[derive(Debug, Default)]
pub struct FrameLoop {
    pending: Option<i32>,
    stopped: bool,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a newly requested frame. Ignored once stopped.
    ///
    /// Returns false if the request should be cancelled right away.
    pub fn schedule(&mut self, request_id: i32) -> bool {
        if self.stopped {
            return false;
        }
        self.pending = Some(request_id);
        true
    }

    /// The pending frame fired
    pub fn fired(&mut self) {
        self.pending = None;
    }

    /// Stop the loop. Returns the request to cancel, if one is pending.
    pub fn stop(&mut self) -> Option<i32> {
        self.stopped = true;
        self.pending.take()
    }

    /// Allow scheduling again after a stop (new run)
    pub fn resume(&mut self) {
        self.stopped = false;
    }

    pub fn is_running(&self) -> bool {
        !self.stopped
    }

    pub fn pending(&self) -> Option<i32> {
        self.pending
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::cancel_frame;

#[cfg(target_arch = "wasm32")]
mod web {
    /// Cancel a pending `requestAnimationFrame`
    pub fn cancel_frame(request_id: i32) {
        if let Some(window) = web_sys::window() {
            if window.cancel_animation_frame(request_id).is_err() {
                log::warn!("cancelAnimationFrame({}) failed", request_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_and_fire() {
        let mut frames = FrameLoop::new();
        assert!(frames.schedule(1));
        assert_eq!(frames.pending(), Some(1));
        frames.fired();
        assert_eq!(frames.pending(), None);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut frames = FrameLoop::new();
        frames.schedule(7);
        assert_eq!(frames.stop(), Some(7));
        assert_eq!(frames.stop(), None);
        assert!(!frames.is_running());
        assert_eq!(frames.pending(), None);
    }

    #[test]
    fn test_no_scheduling_after_stop() {
        let mut frames = FrameLoop::new();
        frames.stop();
        assert!(!frames.schedule(3));
        assert_eq!(frames.pending(), None);

        frames.resume();
        assert!(frames.schedule(4));
        assert_eq!(frames.pending(), Some(4));
    }
}
