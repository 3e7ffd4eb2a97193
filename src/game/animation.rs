// Frame-based sprite animation

use std::fmt::Debug;

/// How long each frame stays on screen (seconds)
pub const FRAME_DURATION: f32 = 0.15;

/// A closed set of animation states for one kind of entity.
///
/// Every state maps to a fixed, non-empty sequence of image identifiers
/// named `<entity>_<state>_<frame>`.
pub trait AnimationSet: Copy + Eq + Debug {
    /// Image identifiers for this state, in playback order
    fn frames(self) -> &'static [&'static str];
}

/// Plays the frame sequence of one state at a time, looping forever
#[derive(Debug, Clone)]
pub struct Animator<S: AnimationSet> {
    state: S,
    frame: usize,
    elapsed: f32,
}

impl<S: AnimationSet> Animator<S> {
    pub fn new(initial: S) -> Self {
        debug_assert!(
            !initial.frames().is_empty(),
            "animation state {initial:?} has no frames"
        );
        Self {
            state: initial,
            frame: 0,
            elapsed: 0.0,
        }
    }

    /// Switch to another state. Calling it with the current state keeps
    /// the animation running where it is.
    pub fn play(&mut self, state: S) {
        if self.state != state {
            self.restart(state);
        }
    }

    /// Switch to a state from its first frame, even if it is already active
    pub fn restart(&mut self, state: S) {
        debug_assert!(
            !state.frames().is_empty(),
            "animation state {state:?} has no frames"
        );
        self.state = state;
        self.frame = 0;
        self.elapsed = 0.0;
    }

    /// Advance the clock. At most one frame is advanced per call, however
    /// large `dt` is, and the leftover time is dropped.
    pub fn update(&mut self, dt: f32) {
        self.elapsed += dt;
        if self.elapsed >= FRAME_DURATION {
            self.elapsed = 0.0;
            self.frame = (self.frame + 1) % self.state.frames().len();
        }
    }

    pub fn state(&self) -> S {
        self.state
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    #[cfg(test)]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Image identifier of the frame currently shown
    pub fn image(&self) -> &'static str {
        self.state().frames()[self.frame()]
    }
}
