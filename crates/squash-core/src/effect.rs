//! Block-processing trait for multichannel, in-place audio processors.
//!
//! The [`Effect`] trait is the seam between a host (audio callback, offline
//! file driver, benchmark) and a processor such as the
//! [`Compressor`](crate::Compressor).
//!
//! ## Design Decisions
//!
//! - **Multichannel in place**: blocks arrive as planar channel slices or as
//!   one interleaved slice and are overwritten with the output.
//!
//! - **Object-safe**: drivers can hold a `&mut dyn Effect`.
//!
//! - **No allocations**: every method may be called from a real-time thread.

/// Core trait for block-based audio processors.
///
/// # Example
///
/// ```rust
/// use squash_core::Effect;
///
/// struct Gain {
///     gain: f32,
/// }
///
/// impl Effect for Gain {
///     fn prepare(&mut self, _sample_rate: f64) {}
///
///     fn process_block(&mut self, channels: &mut [&mut [f32]]) {
///         for ch in channels.iter_mut() {
///             ch.iter_mut().for_each(|s| *s *= self.gain);
///         }
///     }
///
///     fn process_interleaved(&mut self, buffer: &mut [f32], _num_channels: usize) {
///         buffer.iter_mut().for_each(|s| *s *= self.gain);
///     }
///
///     fn reset(&mut self) {}
/// }
///
/// let mut left = [1.0, 0.5];
/// let mut right = [-1.0, 0.25];
/// let mut fx = Gain { gain: 0.5 };
/// fx.process_block(&mut [&mut left[..], &mut right[..]]);
/// assert_eq!(left, [0.5, 0.25]);
/// ```
pub trait Effect {
    /// Prepare for playback at `sample_rate` Hz.
    ///
    /// Called before the first block and whenever the sample rate changes.
    /// Clears processing state.
    fn prepare(&mut self, sample_rate: f64);

    /// Process planar audio in place.
    ///
    /// Every channel slice holds the same number of frames.
    fn process_block(&mut self, channels: &mut [&mut [f32]]);

    /// Process interleaved audio in place.
    ///
    /// `buffer.len()` is a multiple of `num_channels`.
    fn process_interleaved(&mut self, buffer: &mut [f32], num_channels: usize);

    /// Reset internal state.
    ///
    /// Clears all internal state without changing the sample rate or
    /// parameters. Called when playback stops/starts.
    fn reset(&mut self);

    /// Report processing latency in samples.
    ///
    /// Default returns 0 (no latency).
    fn latency_samples(&self) -> usize {
        0
    }
}
