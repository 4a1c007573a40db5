//! Frame timing from host timestamps

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped.
    pub dt: f32,

    /// Seconds accumulated over all ticks (sum of clamped deltas).
    pub elapsed: f32,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Turns the millisecond timestamps handed to animation-frame callbacks into
/// clamped deltas.
///
/// The first tick has a zero delta. Later deltas are clamped to
/// `[dt_min, dt_max]` so a backgrounded tab does not jump the shader clock.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    elapsed: f32,
    frame_index: u64,
    dt_min: f32,
    dt_max: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_clamps(0.0001, 0.25)
    }

    /// Creates a clock with custom delta-time clamps, in seconds.
    pub fn with_clamps(dt_min: f32, dt_max: f32) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last_ms: None,
            elapsed: 0.0,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Advances the clock to `now_ms` and returns a new `FrameTime`.
    pub fn tick(&mut self, now_ms: f64) -> FrameTime {
        let dt = match self.last_ms {
            Some(last) => (((now_ms - last) / 1000.0) as f32).clamp(self.dt_min, self.dt_max),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        self.elapsed += dt;

        let ft = FrameTime {
            dt,
            elapsed: self.elapsed,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
