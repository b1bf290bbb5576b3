/// Accumulates fractional wheel deltas into whole steps.
///
/// Trackpads report many small deltas, so movement is charged up until it
/// crosses a step boundary. The remainder is kept while the gesture continues
/// and dropped after an idle pause.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelAccumulator {
    accum: f64,
    step_pixels: f64,
    idle_reset_ms: u64,
    reset_deadline_ms: Option<u64>,
}

impl WheelAccumulator {
    pub fn new(step_pixels: f64, idle_reset_ms: u64) -> Self {
        let step_pixels = if step_pixels.is_finite() && step_pixels > 0.0 {
            step_pixels
        } else {
            super::WHEEL_STEP_PIXELS
        };

        Self {
            accum: 0.0,
            step_pixels,
            idle_reset_ms,
            reset_deadline_ms: None,
        }
    }

    /// Charge `delta` and return the signed number of whole steps crossed.
    pub fn push(&mut self, delta: f64, now_ms: u64) -> i32 {
        if delta.is_finite() {
            self.accum += delta;
        }

        let mut steps = 0;
        let whole = (self.accum.abs() / self.step_pixels).floor();
        if whole >= 1.0 {
            let magnitude = whole.min(i32::MAX as f64) as i32;
            steps = if self.accum > 0.0 { magnitude } else { -magnitude };
            // `%` on floats keeps the sign of the dividend.
            self.accum %= self.step_pixels;
        }

        self.reset_deadline_ms = Some(now_ms.saturating_add(self.idle_reset_ms));
        steps
    }

    pub fn poll_idle(&mut self, now_ms: u64) -> bool {
        match self.reset_deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.reset();
                true
            }
            _ => false,
        }
    }

    pub fn reset(&mut self) {
        self.accum = 0.0;
        self.reset_deadline_ms = None;
    }

    pub fn accum(&self) -> f64 {
        self.accum
    }

    pub fn deadline_ms(&self) -> Option<u64> {
        self.reset_deadline_ms
    }
}
