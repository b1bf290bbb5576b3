//! Input normalization for the episode dial.
//!
//! Click, wheel and touch arrive with different units and noise. Everything is
//! reduced to a signed step count that the dial applies to its counter.

mod touch;
mod wheel;

pub use touch::TouchGesture;
pub use wheel::WheelAccumulator;

use log::debug;

/// Wheel delta (pixels) consumed per dial step.
pub const WHEEL_STEP_PIXELS: f64 = 40.0;
/// Pause after which leftover wheel delta is discarded.
pub const WHEEL_IDLE_RESET_MS: u64 = 150;
/// Horizontal travel a swipe must exceed before it steps the dial.
pub const SWIPE_SENSITIVITY_PX: f64 = 8.0;

/// Element a pointer can hover for wheel gating.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HitTarget {
    /// The visible dial.
    Dial,
    /// Enlarged invisible overlay centred on the dial.
    TouchArea,
}

impl HitTarget {
    const fn slot(self) -> usize {
        match self {
            Self::Dial => 0,
            Self::TouchArea => 1,
        }
    }
}

/// Raw events the binding layer forwards from the page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DialEvent {
    Click,
    PointerEnter(HitTarget),
    PointerLeave(HitTarget),
    Wheel { delta_y: f64 },
    TouchStart { x: f64 },
    TouchMove { x: f64 },
}

/// What an event amounts to once normalized.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct InputOutcome {
    pub steps: i32,
    /// The page's default handling (scroll, touch gestures) must be suppressed.
    pub prevent_default: bool,
}

impl InputOutcome {
    const fn ignored() -> Self {
        Self {
            steps: 0,
            prevent_default: false,
        }
    }

    const fn consumed(steps: i32) -> Self {
        Self {
            steps,
            prevent_default: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputConfig {
    wheel_step_pixels: f64,
    wheel_idle_reset_ms: u64,
    swipe_sensitivity_px: f64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            wheel_step_pixels: WHEEL_STEP_PIXELS,
            wheel_idle_reset_ms: WHEEL_IDLE_RESET_MS,
            swipe_sensitivity_px: SWIPE_SENSITIVITY_PX,
        }
    }
}

impl InputConfig {
    pub const fn with_wheel_step_pixels(mut self, wheel_step_pixels: f64) -> Self {
        self.wheel_step_pixels = wheel_step_pixels;
        self
    }

    pub const fn with_wheel_idle_reset_ms(mut self, wheel_idle_reset_ms: u64) -> Self {
        self.wheel_idle_reset_ms = wheel_idle_reset_ms;
        self
    }

    pub const fn with_swipe_sensitivity_px(mut self, swipe_sensitivity_px: f64) -> Self {
        self.swipe_sensitivity_px = swipe_sensitivity_px;
        self
    }
}

#[derive(Debug, Clone)]
pub struct InputNormalizer {
    hovered: [bool; 2],
    wheel: WheelAccumulator,
    touch: TouchGesture,
}

impl InputNormalizer {
    pub fn new(config: InputConfig) -> Self {
        Self {
            hovered: [false; 2],
            wheel: WheelAccumulator::new(config.wheel_step_pixels, config.wheel_idle_reset_ms),
            touch: TouchGesture::new(config.swipe_sensitivity_px),
        }
    }

    pub fn apply(&mut self, event: DialEvent, now_ms: u64) -> InputOutcome {
        match event {
            DialEvent::Click => InputOutcome {
                steps: 1,
                prevent_default: false,
            },
            DialEvent::PointerEnter(target) => {
                self.hovered[target.slot()] = true;
                InputOutcome::ignored()
            }
            DialEvent::PointerLeave(target) => {
                self.hovered[target.slot()] = false;
                self.wheel.reset();
                debug!("input: pointer left {:?}, wheel charge cleared", target);
                InputOutcome::ignored()
            }
            DialEvent::Wheel { delta_y } => {
                if !self.is_hovering() {
                    return InputOutcome::ignored();
                }
                InputOutcome::consumed(self.wheel.push(delta_y, now_ms))
            }
            DialEvent::TouchStart { x } => {
                self.touch.begin(x);
                InputOutcome::consumed(0)
            }
            DialEvent::TouchMove { x } => InputOutcome::consumed(self.touch.track(x)),
        }
    }

    /// Drop leftover wheel delta once the idle deadline has passed.
    pub fn poll_idle(&mut self, now_ms: u64) -> bool {
        self.wheel.poll_idle(now_ms)
    }

    pub fn idle_deadline_ms(&self) -> Option<u64> {
        self.wheel.deadline_ms()
    }

    pub fn is_hovering(&self) -> bool {
        self.hovered.iter().any(|hovered| *hovered)
    }

    pub fn wheel_charge(&self) -> f64 {
        self.wheel.accum()
    }
}

impl Default for InputNormalizer {
    fn default() -> Self {
        Self::new(InputConfig::default())
    }
}

#[cfg(test)]
mod tests;
