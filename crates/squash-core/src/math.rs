//! Level and time-constant math for the compressor.
//!
//! All functions are allocation-free and `no_std` compatible (`libm`).
//!
//! # Level Conversions
//!
//! - [`db_to_linear`] / [`linear_to_db`] - Convert between dB and linear gain
//! - [`level_to_db`] - Detector level to dB with an additive floor, so silence
//!   maps to a finite value instead of -∞
//!
//! # Smoothing
//!
//! - [`time_constant_coeff`] - One-pole coefficient for a time constant
//! - [`flush_denormal`] - Zero out subnormal filter state

use libm::{expf, log10f, logf};

/// Additive floor applied to detector levels before taking the logarithm.
///
/// `level_to_db(0.0)` evaluates to `20 * log10(1e-6) = -120 dB`.
pub const LEVEL_FLOOR: f32 = 1e-6;

/// Largest detector level accepted by [`level_to_db`] (+120 dBFS).
///
/// Infinite or absurdly hot input is pinned here so the gain computer never
/// sees `inf - inf`.
pub const LEVEL_CEILING: f32 = 1e6;

/// Convert decibels to linear gain.
///
/// # Example
/// ```rust
/// use squash_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels.
///
/// Values at or below `1e-10` are clamped first, so the result is always finite.
///
/// # Example
/// ```rust
/// use squash_core::linear_to_db;
///
/// assert!((linear_to_db(1.0) - 0.0).abs() < 0.001);
/// assert!((linear_to_db(0.5) - (-6.02)).abs() < 0.01);
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    // 20 * log10(linear) = 20 * ln(linear) / ln(10)
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Convert a rectified detector level to dB: `20 * log10(level + 1e-6)`.
///
/// The floor is additive rather than a `max`, which matches the detector
/// used by the compressor. Levels above [`LEVEL_CEILING`] (including `inf`)
/// are pinned to the ceiling; `NaN` is treated as silence.
///
/// # Example
/// ```rust
/// use squash_core::level_to_db;
///
/// let silence = level_to_db(0.0);
/// assert!(silence.is_finite());
/// assert!((silence - (-120.0)).abs() < 1e-3);
/// ```
#[inline]
pub fn level_to_db(level: f32) -> f32 {
    // f32::max/min return the non-NaN operand
    let level = level.max(0.0).min(LEVEL_CEILING);
    20.0 * log10f(level + LEVEL_FLOOR)
}

/// One-pole smoothing coefficient for a time constant.
///
/// `coeff = exp(-1 / (sample_rate * time_ms / 1000))`
///
/// The result lies in `[0, 1)`: short time constants approach 0 (instant
/// response), long ones approach 1. A zero sample rate or zero time yields 0.
///
/// # Example
/// ```rust
/// use squash_core::time_constant_coeff;
///
/// let fast = time_constant_coeff(0.1, 48000.0);
/// let slow = time_constant_coeff(1000.0, 48000.0);
/// assert!(fast < slow);
/// assert!(slow < 1.0);
/// ```
#[inline]
pub fn time_constant_coeff(time_ms: f32, sample_rate: f32) -> f32 {
    let samples = sample_rate * time_ms / 1000.0;
    if samples <= 0.0 {
        return 0.0;
    }
    expf(-1.0 / samples)
}

/// Flush subnormal values to zero.
///
/// Recursive filter state decaying toward zero passes through the subnormal
/// range, where many CPUs take a slow path.
#[inline]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}
