/// Game loop timing
///
/// Fixed timestep updates with variable rendering: wall time accumulates
/// between frames and is paid out in whole `FIXED_TIMESTEP` steps.
use log::debug;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Target update rate (60 updates per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Maximum number of update steps per frame to prevent spiral of death
const MAX_STEPS: u32 = 5;

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Game loop timing state
pub struct GameLoop {
    /// Accumulated time not yet consumed by fixed updates
    accumulator: Duration,

    /// Time of last frame
    last_frame_time: Instant,

    /// Frame timing history for FPS calculation
    frame_times: VecDeque<Duration>,

    /// Current frame number
    frame_count: u64,

    /// Current FPS (updated once per window)
    current_fps: f32,
}

impl GameLoop {
    /// Create a new game loop
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: Instant::now(),
            frame_times: VecDeque::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            current_fps: 0.0,
        }
    }

    /// Begin a new frame, returns the number of fixed updates to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.advance(frame_time)
    }

    /// Account for `frame_time` of wall time, returns the number of fixed
    /// updates it pays for
    fn advance(&mut self, frame_time: Duration) -> u32 {
        self.frame_count += 1;

        self.frame_times.push_back(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.pop_front();
        }

        if self.frame_count % FPS_WINDOW_SIZE as u64 == 0 {
            self.update_fps();
            debug!("Frame {}: {:.1} FPS", self.frame_count(), self.fps());
        }

        self.accumulator += frame_time;

        let mut updates = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && updates < MAX_STEPS {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            updates += 1;
        }

        // Time beyond the cap is dropped rather than replayed later
        if updates == MAX_STEPS {
            self.accumulator = self.accumulator.min(FIXED_TIMESTEP_DURATION);
        }

        updates
    }

    /// Get the fixed timestep for updates (in seconds)
    pub fn fixed_timestep(&self) -> f32 {
        FIXED_TIMESTEP
    }

    /// Get current FPS
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Get total number of frames rendered
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
