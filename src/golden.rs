//! Golden-ratio sequence
//!
//! Given two positions `a` and `b`, the next position `c` satisfies
//! `(b - a) / (c - b) = PHI`. Repeating this on the two most recent values
//! yields a sequence of ever-shorter golden steps.

/// The golden ratio, (1 + sqrt 5) / 2
pub const PHI: f64 = 1.618_033_988_749_895;

/// Extend `[a, b]` by one golden step.
///
/// `a == b` is a degenerate pair with no direction; the result is `b`.
#[inline]
pub fn next(a: f64, b: f64) -> f64 {
    if a == b {
        return b;
    }
    b + (b - a) / PHI
}

/// Infinite iterator over a golden sequence seeded with two values.
///
/// Yields the seeds first, then each derived value in order.
#[derive(Debug, Clone, Copy)]
pub struct GoldenSequence {
    prev2: f64,
    prev1: f64,
    emitted: u8,
}

impl GoldenSequence {
    pub fn new(first: f64, second: f64) -> Self {
        Self {
            prev2: first,
            prev1: second,
            emitted: 0,
        }
    }
}

impl Iterator for GoldenSequence {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let value = match self.emitted {
            0 => {
                self.emitted = 1;
                self.prev2
            },
            1 => {
                self.emitted = 2;
                self.prev1
            },
            _ => {
                let value = next(self.prev2, self.prev1);
                self.prev2 = self.prev1;
                self.prev1 = value;
                value
            },
        };
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phi_constant() {
        assert!((PHI - (1.0 + 5.0_f64.sqrt()) / 2.0).abs() < 1e-15);
        assert!((1.0 / PHI - (PHI - 1.0)).abs() < 1e-15);
    }

    #[test]
    fn test_next_from_unit_interval() {
        assert!((next(0.0, 1.0) - (1.0 + 1.0 / PHI)).abs() < 1e-12);
        assert!((next(0.0, 1.0) - 1.618_033_988).abs() < 1e-6);
    }

    #[test]
    fn test_next_golden_proportion_holds() {
        let (a, b) = (830.0, 630.0);
        let c = next(a, b);
        assert!(((b - a) / (c - b) - PHI).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_pair_returns_b() {
        assert_eq!(next(42.0, 42.0), 42.0);
        assert_eq!(next(-3.5, -3.5), -3.5);
    }

    #[test]
    fn test_next_is_deterministic() {
        assert_eq!(next(830.0, 630.0), next(830.0, 630.0));
    }

    #[test]
    fn test_sequence_matches_manual_recurrence() {
        let values: Vec<f64> = GoldenSequence::new(830.0, 630.0).take(6).collect();
        assert_eq!(values[0], 830.0);
        assert_eq!(values[1], 630.0);
        for i in 2..values.len() {
            assert_eq!(values[i], next(values[i - 2], values[i - 1]));
        }
    }

    #[test]
    fn test_sequence_converges() {
        let values: Vec<f64> = GoldenSequence::new(0.0, 100.0).take(40).collect();
        let last = values[values.len() - 1];
        // Geometric series with ratio 1/PHI: limit is 100 * PHI^2
        assert!((last - 100.0 * PHI * PHI).abs() < 1e-3);
    }
}
