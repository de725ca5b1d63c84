//! Offline block driver.
//!
//! Feeds an [`Effect`] consecutive fixed-size blocks of a buffer, the same
//! access pattern a real-time audio callback produces. The last block may be
//! shorter.

use squash_core::Effect;

use crate::{AudioBuffer, Error, Result};

/// Progress reported after each processed block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockProgress {
    /// Frames processed so far, including this block.
    pub frames_done: usize,
    /// Total frames in the buffer.
    pub total_frames: usize,
}

impl BlockProgress {
    /// Completed fraction in `[0, 1]` (1 for an empty buffer).
    pub fn fraction(&self) -> f64 {
        if self.total_frames == 0 {
            1.0
        } else {
            self.frames_done as f64 / self.total_frames as f64
        }
    }
}

/// Runs an effect over whole buffers in fixed-size blocks.
///
/// The effect must already be prepared for the buffer's sample rate.
#[derive(Debug, Clone, Copy)]
pub struct BlockDriver {
    block_size: usize,
}

impl BlockDriver {
    /// Create a driver. Fails on a zero block size.
    pub fn new(block_size: usize) -> Result<Self> {
        if block_size == 0 {
            return Err(Error::InvalidBlockSize);
        }
        Ok(Self { block_size })
    }

    /// Frames per block.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Process a planar buffer in place. Returns the number of blocks.
    pub fn run<E, F>(&self, effect: &mut E, audio: &mut AudioBuffer, mut on_block: F) -> usize
    where
        E: Effect + ?Sized,
        F: FnMut(BlockProgress),
    {
        let total_frames = audio.num_frames();
        let num_channels = audio.num_channels();
        let mut blocks = 0;
        let mut frames_done = 0;

        // Both vectors are allocated once; the block loop itself never allocates.
        let mut chunks: Vec<_> = audio
            .channels_mut()
            .iter_mut()
            .map(|ch| ch.chunks_mut(self.block_size))
            .collect();
        let mut slices: Vec<&mut [f32]> = Vec::with_capacity(num_channels);

        loop {
            slices.clear();
            slices.extend(chunks.iter_mut().filter_map(|ch| ch.next()));
            let Some(block_len) = slices.first().map(|s| s.len()) else {
                break;
            };
            effect.process_block(&mut slices);

            frames_done += block_len;
            blocks += 1;
            on_block(BlockProgress {
                frames_done,
                total_frames,
            });
        }

        tracing::debug!(
            frames = total_frames,
            channels = num_channels,
            block_size = self.block_size,
            blocks,
            "block driver finished"
        );
        blocks
    }

    /// Process an interleaved buffer in place. Returns the number of blocks.
    ///
    /// A trailing partial frame is left untouched.
    pub fn run_interleaved<E, F>(
        &self,
        effect: &mut E,
        samples: &mut [f32],
        num_channels: usize,
        mut on_block: F,
    ) -> Result<usize>
    where
        E: Effect + ?Sized,
        F: FnMut(BlockProgress),
    {
        if num_channels == 0 {
            return Err(Error::ChannelMismatch {
                expected: 1,
                found: 0,
            });
        }
        let total_frames = samples.len() / num_channels;
        let whole = &mut samples[..total_frames * num_channels];

        let mut blocks = 0;
        let mut frames_done = 0;
        for block in whole.chunks_mut(self.block_size * num_channels) {
            effect.process_interleaved(block, num_channels);
            frames_done += block.len() / num_channels;
            blocks += 1;
            on_block(BlockProgress {
                frames_done,
                total_frames,
            });
        }

        tracing::debug!(
            frames = total_frames,
            channels = num_channels,
            block_size = self.block_size,
            blocks,
            "interleaved block driver finished"
        );
        Ok(blocks)
    }
}
