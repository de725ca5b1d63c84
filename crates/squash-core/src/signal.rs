//! Deterministic test signals for exercising the compressor.
//!
//! The square and step generators alternate sign every sample, so `|x|` is
//! exactly constant and the peak detector sees a flat level with no ripple.

use core::f32::consts::TAU;

/// Fill `buffer` with a sine of `frequency` Hz and peak `amplitude`.
///
/// # Example
///
/// ```rust
/// use squash_core::signal::fill_sine;
///
/// let mut buf = [0.0f32; 48];
/// fill_sine(&mut buf, 1000.0, 48000.0, 0.5);
/// assert_eq!(buf[0], 0.0);
/// assert!(buf.iter().all(|s| s.abs() <= 0.5));
/// ```
pub fn fill_sine(buffer: &mut [f32], frequency: f32, sample_rate: f32, amplitude: f32) {
    let phase_inc = TAU * frequency / sample_rate;
    let mut phase = 0.0f32;
    for sample in buffer.iter_mut() {
        *sample = amplitude * libm::sinf(phase);
        phase += phase_inc;
        if phase >= TAU {
            phase -= TAU;
        }
    }
}

/// Fill `buffer` with `+amplitude, -amplitude, ...` (constant peak level).
pub fn fill_square(buffer: &mut [f32], amplitude: f32) {
    for (i, sample) in buffer.iter_mut().enumerate() {
        *sample = if i % 2 == 0 { amplitude } else { -amplitude };
    }
}

/// Fill `buffer` with a constant-level square whose amplitude jumps from
/// `before` to `after` at sample index `step_at`.
pub fn fill_level_step(buffer: &mut [f32], step_at: usize, before: f32, after: f32) {
    let split = step_at.min(buffer.len());
    let (head, tail) = buffer.split_at_mut(split);
    fill_square(head, before);
    fill_square(tail, after);
    // Keep alternation continuous across the step
    if split % 2 == 1 {
        tail.iter_mut().for_each(|s| *s = -*s);
    }
}

/// Fill `buffer` with digital silence.
pub fn fill_silence(buffer: &mut [f32]) {
    buffer.fill(0.0);
}

/// Peak absolute value of `buffer`.
pub fn peak(buffer: &[f32]) -> f32 {
    buffer.iter().fold(0.0f32, |p, s| p.max(s.abs()))
}

/// Root-mean-square level of `buffer` (0 for an empty slice).
pub fn rms(buffer: &[f32]) -> f32 {
    if buffer.is_empty() {
        return 0.0;
    }
    let sum_sq: f32 = buffer.iter().map(|s| s * s).sum();
    libm::sqrtf(sum_sq / buffer.len() as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_has_constant_magnitude() {
        let mut buf = [0.0f32; 33];
        fill_square(&mut buf, 0.25);
        assert!(buf.iter().all(|s| s.abs() == 0.25));
        assert_eq!(buf[0], 0.25);
        assert_eq!(buf[1], -0.25);
    }

    #[test]
    fn level_step_switches_amplitude() {
        let mut buf = [0.0f32; 10];
        fill_level_step(&mut buf, 5, 0.1, 1.0);
        assert!(buf[..5].iter().all(|s| s.abs() == 0.1));
        assert!(buf[5..].iter().all(|s| s.abs() == 1.0));
        // Sign keeps alternating across the step
        for pair in buf.windows(2) {
            assert!(pair[0].signum() != pair[1].signum());
        }
    }

    #[test]
    fn level_step_past_end_is_all_before() {
        let mut buf = [0.0f32; 4];
        fill_level_step(&mut buf, 100, 0.5, 1.0);
        assert_eq!(peak(&buf), 0.5);
    }

    #[test]
    fn sine_peak_and_rms() {
        let mut buf = [0.0f32; 4800];
        fill_sine(&mut buf, 100.0, 48000.0, 1.0);
        assert!((peak(&buf) - 1.0).abs() < 1e-3);
        assert!((rms(&buf) - core::f32::consts::FRAC_1_SQRT_2).abs() < 1e-3);
    }

    #[test]
    fn silence_measures_zero() {
        let mut buf = [1.0f32; 16];
        fill_silence(&mut buf);
        assert_eq!(peak(&buf), 0.0);
        assert_eq!(rms(&buf), 0.0);
        assert_eq!(rms(&[]), 0.0);
    }
}
