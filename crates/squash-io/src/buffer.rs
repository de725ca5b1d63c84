//! Planar multichannel sample storage.

use squash_core::signal;

use crate::{Error, Result};

/// Planar audio: one `Vec<f32>` per channel, all the same length.
///
/// # Example
///
/// ```rust
/// use squash_io::AudioBuffer;
///
/// let buf = AudioBuffer::from_interleaved(&[1.0, -1.0, 0.5, -0.5], 2);
/// assert_eq!(buf.num_channels(), 2);
/// assert_eq!(buf.channel(1), Some(&[-1.0, -0.5][..]));
/// assert_eq!(buf.to_interleaved(), vec![1.0, -1.0, 0.5, -0.5]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioBuffer {
    channels: Vec<Vec<f32>>,
}

impl AudioBuffer {
    /// Wrap existing channel vectors. Fails if their lengths differ.
    pub fn new(channels: Vec<Vec<f32>>) -> Result<Self> {
        let expected = channels.first().map_or(0, Vec::len);
        if let Some((channel, found)) = channels
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != expected)
        {
            return Err(Error::LengthMismatch {
                channel,
                expected,
                found,
            });
        }
        Ok(Self { channels })
    }

    /// `num_channels` channels of `num_frames` zeros.
    pub fn silent(num_channels: usize, num_frames: usize) -> Self {
        Self {
            channels: vec![vec![0.0; num_frames]; num_channels],
        }
    }

    /// Single-channel buffer.
    pub fn from_mono(samples: Vec<f32>) -> Self {
        Self {
            channels: vec![samples],
        }
    }

    /// Deinterleave `samples`. A trailing partial frame is dropped.
    pub fn from_interleaved(samples: &[f32], num_channels: usize) -> Self {
        if num_channels == 0 {
            return Self::default();
        }
        let num_frames = samples.len() / num_channels;
        let mut channels = vec![Vec::with_capacity(num_frames); num_channels];
        for frame in samples.chunks_exact(num_channels) {
            for (ch, &s) in channels.iter_mut().zip(frame) {
                ch.push(s);
            }
        }
        Self { channels }
    }

    /// Interleave into `[c0, c1, .., c0, c1, ..]` order.
    pub fn to_interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.num_frames() * self.num_channels());
        for n in 0..self.num_frames() {
            out.extend(self.channels.iter().map(|ch| ch[n]));
        }
        out
    }

    /// Number of channels.
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Frames per channel.
    pub fn num_frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// True when there are no frames.
    pub fn is_empty(&self) -> bool {
        self.num_frames() == 0
    }

    /// Samples of one channel.
    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    /// All channels.
    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    /// All channels, mutably. Callers must keep lengths equal.
    pub fn channels_mut(&mut self) -> &mut [Vec<f32>] {
        &mut self.channels
    }

    /// Peak absolute sample value across all channels.
    pub fn peak(&self) -> f32 {
        self.channels
            .iter()
            .map(|ch| signal::peak(ch))
            .fold(0.0, f32::max)
    }

    /// RMS level across all channels.
    pub fn rms(&self) -> f32 {
        let count = self.num_frames() * self.num_channels();
        if count == 0 {
            return 0.0;
        }
        let sum_sq: f64 = self
            .channels
            .iter()
            .flatten()
            .map(|&s| f64::from(s) * f64::from(s))
            .sum();
        (sum_sq / count as f64).sqrt() as f32
    }
}
