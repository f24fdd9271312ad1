//! Frame timing

/// Longest step handed to the simulation, in seconds
pub const MAX_FRAME_DT: f32 = 0.25;

/// Converts host timestamps (milliseconds) into per-frame deltas
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous call, clamped to `[0, MAX_FRAME_DT]`.
    ///
    /// The first call only primes the clock and returns 0.
    pub fn advance(&mut self, elapsed_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((elapsed_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(elapsed_ms);
        if dt.is_nan() {
            return 0.0;
        }
        dt.clamp(0.0, MAX_FRAME_DT)
    }

    /// Forget the last timestamp, e.g. after the page was hidden
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
