//! Gain-reduction envelope in the dB domain.
//!
//! The envelope tracks the gain computer's target with separate attack and
//! release time constants. Smoothing happens on gain (dB), not on signal
//! amplitude, so "attack" means "reduction is deepening" and "release"
//! means "reduction is recovering toward 0 dB".

use crate::math::{flush_denormal, time_constant_coeff};

/// Per-block one-pole coefficients for attack and release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothingCoeffs {
    /// Coefficient used while the target is below the envelope.
    pub attack: f32,
    /// Coefficient used while the target is at or above the envelope.
    pub release: f32,
}

impl SmoothingCoeffs {
    /// Derive coefficients from time constants.
    ///
    /// # Example
    ///
    /// ```rust
    /// use squash_core::SmoothingCoeffs;
    ///
    /// let c = SmoothingCoeffs::from_times(48000.0, 10.0, 100.0);
    /// assert!(c.attack < c.release);
    /// ```
    #[inline]
    pub fn from_times(sample_rate: f32, attack_ms: f32, release_ms: f32) -> Self {
        Self {
            attack: time_constant_coeff(attack_ms, sample_rate),
            release: time_constant_coeff(release_ms, sample_rate),
        }
    }
}

/// Smoothed gain reduction in dB (≤ 0 when fed non-positive targets).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GainEnvelope {
    state_db: f32,
}

impl GainEnvelope {
    /// Create an envelope at 0 dB.
    pub const fn new() -> Self {
        Self { state_db: 0.0 }
    }

    /// Step the envelope one sample toward `target_db` and return the new value.
    ///
    /// `y[n] = c * y[n-1] + (1 - c) * target`, with `c` the attack coefficient
    /// when `target_db < y[n-1]` and the release coefficient otherwise.
    #[inline]
    pub fn advance(&mut self, target_db: f32, coeffs: SmoothingCoeffs) -> f32 {
        let coeff = if target_db < self.state_db {
            coeffs.attack
        } else {
            coeffs.release
        };
        self.state_db = flush_denormal(coeff * self.state_db + (1.0 - coeff) * target_db);
        self.state_db
    }

    /// Current value in dB.
    #[inline]
    pub fn level_db(&self) -> f32 {
        self.state_db
    }

    /// Return to 0 dB.
    pub fn reset(&mut self) {
        self.state_db = 0.0;
    }
}
