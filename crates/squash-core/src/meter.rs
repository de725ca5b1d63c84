//! Gain-reduction meter shared between the audio thread and readers.
//!
//! The engine publishes its envelope once per block; a UI or progress
//! reporter polls at its own rate. Readers never block the writer and may
//! see a value one block old.

use core::sync::atomic::Ordering;

use crate::params::AtomicF32;

/// Single-writer, multi-reader gain-reduction value in dB (≤ 0).
///
/// # Example
///
/// ```rust
/// use squash_core::GainReductionMeter;
///
/// let meter = GainReductionMeter::new();
/// assert_eq!(meter.read(), 0.0);
/// meter.publish(-6.5);
/// assert_eq!(meter.read(), -6.5);
/// ```
#[derive(Debug)]
pub struct GainReductionMeter {
    value_db: AtomicF32,
}

impl GainReductionMeter {
    /// Create a meter reading 0 dB.
    pub const fn new() -> Self {
        Self {
            value_db: AtomicF32::new(0.0),
        }
    }

    /// Publish the latest gain reduction. Called from the audio thread only.
    #[inline]
    pub fn publish(&self, reduction_db: f32) {
        self.value_db.store(reduction_db, Ordering::Release);
    }

    /// Latest published gain reduction in dB. Never blocks.
    #[inline]
    pub fn read(&self) -> f64 {
        f64::from(self.value_db.load(Ordering::Acquire))
    }

    /// Return the meter to 0 dB.
    pub fn reset(&self) {
        self.publish(0.0);
    }
}

impl Default for GainReductionMeter {
    fn default() -> Self {
        Self::new()
    }
}
