//! Static hard-knee transfer curve.

/// Hard-knee downward gain computer.
///
/// Below the threshold the signal passes unchanged. Above it, every `ratio`
/// dB of input overshoot yields 1 dB of output overshoot:
///
/// ```text
/// out_db = T + (in_db - T) / R          for in_db > T
/// gain   = out_db - in_db = -(in_db - T) * (1 - 1/R)
/// ```
///
/// # Example
///
/// ```rust
/// use squash_core::GainComputer;
///
/// let gc = GainComputer::new(-20.0, 4.0);
/// assert_eq!(gc.reduction_db(-30.0), 0.0);
/// assert!((gc.reduction_db(0.0) + 15.0).abs() < 1e-5);
/// assert!((gc.output_db(0.0) + 15.0).abs() < 1e-5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainComputer {
    /// Threshold in dB.
    pub threshold_db: f32,
    /// Compression ratio (n:1), expected ≥ 1.
    pub ratio: f32,
}

impl GainComputer {
    /// Create a gain computer.
    pub const fn new(threshold_db: f32, ratio: f32) -> Self {
        Self {
            threshold_db,
            ratio,
        }
    }

    /// Target gain change in dB (≤ 0) for a detector level.
    #[inline]
    pub fn reduction_db(&self, input_db: f32) -> f32 {
        let overshoot = input_db - self.threshold_db;
        if overshoot <= 0.0 {
            0.0
        } else {
            -(overshoot * (1.0 - 1.0 / self.ratio))
        }
    }

    /// Static output level in dB (before makeup).
    #[inline]
    pub fn output_db(&self, input_db: f32) -> f32 {
        input_db + self.reduction_db(input_db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_and_at_threshold_is_unity() {
        let gc = GainComputer::new(-20.0, 4.0);
        assert_eq!(gc.reduction_db(-60.0), 0.0);
        assert_eq!(gc.reduction_db(-20.0), 0.0);
    }

    #[test]
    fn above_threshold_follows_ratio() {
        let gc = GainComputer::new(-24.0, 3.0);
        // 12 dB over → 4 dB over at the output
        let out = gc.output_db(-12.0);
        assert!((out - (-20.0)).abs() < 1e-5, "got {out}");
    }

    #[test]
    fn unity_ratio_never_reduces() {
        let gc = GainComputer::new(-60.0, 1.0);
        for level in [-50.0, -20.0, 0.0, 40.0, 120.0] {
            assert_eq!(gc.reduction_db(level), 0.0);
        }
    }

    #[test]
    fn reduction_is_monotonic_in_level() {
        let gc = GainComputer::new(-30.0, 6.0);
        let mut prev = 0.0;
        for i in 0..60 {
            let r = gc.reduction_db(-60.0 + i as f32);
            assert!(r <= prev + 1e-6);
            prev = r;
        }
    }
}
