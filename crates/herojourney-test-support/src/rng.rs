//! Test RNG: deterministic `DeterministicRng` implementations for tests.

use herojourney_core::rng::DeterministicRng;

/// A no-op RNG that always returns `min` for `next_u32_range` and `0.0` for
/// `next_f64`. Suitable for tests that do not depend on specific random values.
#[derive(Debug)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
        min
    }

    fn next_f64(&mut self) -> f64 {
        0.0
    }
}

/// Replays scripted draws in order, starting over after the last one.
///
/// Each draw is clamped into the range the caller asks for, so a script
/// written for one slate size stays valid for smaller ones. An empty script
/// behaves like `MockRng`.
#[derive(Debug, Clone)]
pub struct SequenceRng {
    draws: Vec<u32>,
    cursor: usize,
}

impl SequenceRng {
    #[must_use]
    pub fn new(draws: impl Into<Vec<u32>>) -> Self {
        Self {
            draws: draws.into(),
            cursor: 0,
        }
    }

    /// Number of draws handed out so far.
    #[must_use]
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl DeterministicRng for SequenceRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        if self.draws.is_empty() || max <= min {
            return min;
        }
        let draw = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        draw.clamp(min, max)
    }

    fn next_f64(&mut self) -> f64 {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_wraps_and_clamps() {
        let mut rng = SequenceRng::new([4, 0]);
        assert_eq!(rng.next_u32_range(0, 9), 4);
        assert_eq!(rng.next_u32_range(2, 9), 2);
        assert_eq!(rng.next_u32_range(0, 3), 3);
        assert_eq!(rng.drawn(), 3);
    }

    #[test]
    fn test_degenerate_range_consumes_nothing() {
        let mut rng = SequenceRng::new([7]);
        assert_eq!(rng.next_u32_range(5, 5), 5);
        assert_eq!(rng.drawn(), 0);
        assert_eq!(SequenceRng::new(Vec::new()).next_u32_range(1, 8), 1);
    }
}
