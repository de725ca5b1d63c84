//! Feed-forward, channel-linked peak compressor.
//!
//! ## Signal Flow
//!
//! ```text
//! x[ch][n] ──► max |x| ──► dB ──► GainComputer ──► GainEnvelope ──► + makeup ──► 10^(g/20)
//!    │                             (threshold,       (attack /                      │
//!    │                              ratio)            release)                      ▼
//!    └───────────────────────────────────────────────────────────────────────────► × ──► y[ch][n]
//! ```
//!
//! All channels share one detector and one gain, so the stereo image does
//! not shift under compression.
//!
//! ## Parameter Reads
//!
//! Attack, release, and bypass are sampled once per block. Threshold, ratio,
//! and makeup are read per sample, so a control-thread change lands on the
//! next sample. Each read is an independent atomic load from the shared
//! [`CompressorParams`].

use alloc::sync::Arc;

use crate::effect::Effect;
use crate::envelope::{GainEnvelope, SmoothingCoeffs};
use crate::gain_computer::GainComputer;
use crate::math::{db_to_linear, level_to_db};
use crate::meter::GainReductionMeter;
use crate::params::CompressorParams;

/// Dynamic range compressor engine.
///
/// Owns the audio-thread state (sample rate, envelope) and shares parameters
/// and the gain-reduction meter with other threads through `Arc`s.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use squash_core::{Compressor, CompressorParams, Effect};
///
/// let params = Arc::new(CompressorParams::new());
/// params.set_threshold_db(-20.0);
/// params.set_ratio(4.0);
///
/// let mut comp = Compressor::new(Arc::clone(&params));
/// comp.prepare(48000.0);
///
/// let mut left = vec![0.9f32; 256];
/// let mut right = vec![-0.9f32; 256];
/// comp.process_block(&mut [&mut left[..], &mut right[..]]);
///
/// assert!(comp.gain_reduction_db() < 0.0);
/// assert!(left[255] < 0.9);
/// ```
#[derive(Debug)]
pub struct Compressor {
    params: Arc<CompressorParams>,
    meter: Arc<GainReductionMeter>,
    envelope: GainEnvelope,
    sample_rate: f32,
    prepared: bool,
}

impl Compressor {
    /// Create an engine reading from `params`. Call [`prepare`](Effect::prepare)
    /// before processing.
    pub fn new(params: Arc<CompressorParams>) -> Self {
        Self {
            params,
            meter: Arc::new(GainReductionMeter::new()),
            envelope: GainEnvelope::new(),
            sample_rate: 0.0,
            prepared: false,
        }
    }

    /// Handle to the gain-reduction meter, for readers on other threads.
    pub fn meter(&self) -> Arc<GainReductionMeter> {
        Arc::clone(&self.meter)
    }

    /// Sample rate set by the last `prepare` (0 before the first call).
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Whether `prepare` has been called.
    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    /// Live envelope value in dB, as seen by the audio thread.
    pub fn envelope_db(&self) -> f32 {
        self.envelope.level_db()
    }

    /// Most recently published gain reduction in dB (≤ 0).
    ///
    /// Lock-free; may lag the envelope by up to one block.
    pub fn gain_reduction_db(&self) -> f64 {
        self.meter.read()
    }

    fn block_coeffs(&self) -> SmoothingCoeffs {
        SmoothingCoeffs::from_times(
            self.sample_rate,
            self.params.attack_ms(),
            self.params.release_ms(),
        )
    }

    /// Advance the envelope for one frame and return the linear gain to apply.
    #[inline]
    fn frame_gain(&mut self, level: f32, coeffs: SmoothingCoeffs) -> f32 {
        let computer = GainComputer::new(self.params.threshold_db(), self.params.ratio());
        let target_db = computer.reduction_db(level_to_db(level));
        let envelope_db = self.envelope.advance(target_db, coeffs);
        db_to_linear(envelope_db + self.params.makeup_db())
    }
}

impl Default for Compressor {
    fn default() -> Self {
        Self::new(Arc::new(CompressorParams::new()))
    }
}

impl Effect for Compressor {
    fn prepare(&mut self, sample_rate: f64) {
        debug_assert!(
            sample_rate.is_finite() && sample_rate > 0.0,
            "sample rate must be positive, got {sample_rate}"
        );
        self.sample_rate = sample_rate as f32;
        self.prepared = true;
        self.envelope.reset();
        self.meter.reset();

        #[cfg(feature = "tracing")]
        tracing::debug!(sample_rate, "compressor prepared");
    }

    fn process_block(&mut self, channels: &mut [&mut [f32]]) {
        debug_assert!(self.prepared, "process_block called before prepare");
        debug_assert!(!channels.is_empty(), "at least one channel required");
        debug_assert!(
            channels.windows(2).all(|w| w[0].len() == w[1].len()),
            "channel lengths differ"
        );

        if self.params.is_bypassed() || channels.is_empty() {
            return;
        }

        let num_samples = channels.iter().map(|ch| ch.len()).min().unwrap_or(0);
        let coeffs = self.block_coeffs();

        for n in 0..num_samples {
            let level = channels.iter().fold(0.0f32, |peak, ch| peak.max(ch[n].abs()));
            let gain = self.frame_gain(level, coeffs);
            for ch in channels.iter_mut() {
                ch[n] *= gain;
            }
        }

        self.meter.publish(self.envelope.level_db());
    }

    fn process_interleaved(&mut self, buffer: &mut [f32], num_channels: usize) {
        debug_assert!(self.prepared, "process_interleaved called before prepare");
        debug_assert!(num_channels >= 1, "at least one channel required");
        debug_assert!(
            num_channels == 0 || buffer.len() % num_channels == 0,
            "buffer length {} is not a multiple of {num_channels} channels",
            buffer.len()
        );

        if self.params.is_bypassed() || num_channels == 0 {
            return;
        }

        let coeffs = self.block_coeffs();

        for frame in buffer.chunks_exact_mut(num_channels) {
            let level = frame.iter().fold(0.0f32, |peak, s| peak.max(s.abs()));
            let gain = self.frame_gain(level, coeffs);
            for s in frame.iter_mut() {
                *s *= gain;
            }
        }

        self.meter.publish(self.envelope.level_db());
    }

    fn reset(&mut self) {
        self.envelope.reset();
        self.meter.reset();

        #[cfg(feature = "tracing")]
        tracing::debug!("compressor reset");
    }
}
