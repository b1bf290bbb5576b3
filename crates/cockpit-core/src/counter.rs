//! Bounded counter with wraparound stepping.

/// Highest episode number shown on the dial.
pub const MAX_EPISODE: u16 = 146;
/// Number of positions on the dial.
pub const EPISODE_COUNT: u16 = MAX_EPISODE + 1;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CircularCounter {
    value: u16,
    len: u16,
}

impl CircularCounter {
    /// A counter over `[0, len)`. A zero length is treated as one position.
    pub const fn new(len: u16) -> Self {
        Self {
            value: 0,
            len: if len == 0 { 1 } else { len },
        }
    }

    pub const fn value(&self) -> u16 {
        self.value
    }

    /// Number of positions the counter wraps over.
    pub const fn modulus(&self) -> u16 {
        self.len
    }

    /// Move by `steps` positions in either direction and return the new value.
    pub fn advance(&mut self, steps: i32) -> u16 {
        let len = i64::from(self.len);
        let next = (i64::from(self.value) + i64::from(steps)).rem_euclid(len);
        self.value = next as u16;
        self.value
    }
}

impl Default for CircularCounter {
    fn default() -> Self {
        Self::new(EPISODE_COUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let counter = CircularCounter::default();
        assert_eq!(counter.value(), 0);
        assert_eq!(counter.modulus(), 147);
    }

    #[test]
    fn wraps_backwards_from_zero() {
        let mut counter = CircularCounter::default();
        assert_eq!(counter.advance(-1), 146);
    }

    #[test]
    fn wraps_forward_from_last() {
        let mut counter = CircularCounter::default();
        counter.advance(146);
        assert_eq!(counter.advance(1), 0);
    }

    #[test]
    fn zero_steps_is_noop() {
        let mut counter = CircularCounter::default();
        counter.advance(12);
        assert_eq!(counter.advance(0), 12);
    }

    #[test]
    fn large_steps_stay_in_range() {
        let mut counter = CircularCounter::default();
        for steps in [i32::MIN, -1_000, -147, -148, 147, 148, 9_999, i32::MAX] {
            let value = counter.advance(steps);
            assert!(value < EPISODE_COUNT, "steps={steps} value={value}");
        }
    }

    #[test]
    fn negative_multi_step_matches_euclidean_mod() {
        let mut counter = CircularCounter::default();
        counter.advance(3);
        assert_eq!(counter.advance(-150), 0);
        assert_eq!(counter.advance(-5), 142);
    }

    #[test]
    fn zero_length_collapses_to_single_position() {
        let mut counter = CircularCounter::new(0);
        assert_eq!(counter.advance(7), 0);
    }
}
