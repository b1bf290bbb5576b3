/// Horizontal swipe tracker emitting one step per threshold crossing.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchGesture {
    start_x: Option<f64>,
    sensitivity: f64,
}

impl TouchGesture {
    pub fn new(sensitivity: f64) -> Self {
        Self {
            start_x: None,
            sensitivity: sensitivity.max(0.0),
        }
    }

    pub fn begin(&mut self, x: f64) {
        self.start_x = Some(x);
    }

    /// Returns `-1`, `0` or `1`. The reference moves to `x` whenever a step fires.
    pub fn track(&mut self, x: f64) -> i32 {
        let Some(start_x) = self.start_x else {
            // Move without a start: adopt it as the reference.
            self.start_x = Some(x);
            return 0;
        };

        let dx = x - start_x;
        if dx.is_nan() || dx.abs() <= self.sensitivity {
            return 0;
        }

        self.start_x = Some(x);
        if dx > 0.0 { 1 } else { -1 }
    }

    pub fn reference_x(&self) -> Option<f64> {
        self.start_x
    }
}
