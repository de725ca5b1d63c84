//! File I/O and offline processing for the squash compressor.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav`] and [`write_wav`] for loading/saving
//!   planar multichannel audio
//! - **Planar buffers**: [`AudioBuffer`] holding one `Vec<f32>` per channel
//! - **Block driver**: [`BlockDriver`] feeding any [`Effect`](squash_core::Effect)
//!   fixed-size blocks, the way an audio callback would
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use squash_core::{Compressor, Effect};
//! use squash_io::{BlockDriver, read_wav, write_wav};
//!
//! let (mut audio, spec) = read_wav("input.wav")?;
//!
//! let mut comp = Compressor::default();
//! comp.prepare(f64::from(spec.sample_rate));
//! BlockDriver::new(512)?.run(&mut comp, &mut audio, |_| {});
//!
//! write_wav("output.wav", &audio, spec)?;
//! ```

mod buffer;
mod engine;
mod wav;

pub use buffer::AudioBuffer;
pub use engine::{BlockDriver, BlockProgress};
pub use wav::{WavFormat, WavInfo, WavSpec, read_wav, read_wav_info, write_wav};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The requested sample format is not supported.
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    /// Channel count of the audio does not match the target `WavSpec`.
    #[error("Channel mismatch: expected {expected} channels, found {found}")]
    ChannelMismatch {
        /// Channel count declared in the `WavSpec`.
        expected: usize,
        /// Channel count actually supplied.
        found: usize,
    },

    /// A channel's length differs from the first channel's.
    #[error("Channel {channel} has {found} frames, expected {expected}")]
    LengthMismatch {
        /// Offending channel index.
        channel: usize,
        /// Frame count of channel 0.
        expected: usize,
        /// Frame count of the offending channel.
        found: usize,
    },

    /// Block size of zero.
    #[error("Block size must be at least 1")]
    InvalidBlockSize,
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
