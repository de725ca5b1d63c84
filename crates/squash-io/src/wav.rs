//! WAV file reading and writing.
//!
//! Files are read into planar [`AudioBuffer`]s with every channel kept.
//! Integer PCM is scaled to `[-1, 1)`; writing supports 16- and 24-bit
//! integer PCM and 32-bit IEEE float.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavWriter};

use crate::{AudioBuffer, Error, Result};

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

impl From<SampleFormat> for WavFormat {
    fn from(format: SampleFormat) -> Self {
        match format {
            SampleFormat::Float => WavFormat::IeeeFloat,
            SampleFormat::Int => WavFormat::Pcm,
        }
    }
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let num_frames = reader.duration() as u64;
    let duration_secs = num_frames as f64 / f64::from(spec.sample_rate);

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs,
        format: spec.sample_format.into(),
    })
}

/// WAV file specification.
///
/// `bits_per_sample == 32` means IEEE float; 16 and 24 mean integer PCM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels.
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample (16, 24, or 32).
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 32,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl WavSpec {
    /// Convert to a hound spec, rejecting bit depths this crate cannot write.
    fn to_hound(self) -> Result<hound::WavSpec> {
        let sample_format = match self.bits_per_sample {
            16 | 24 => SampleFormat::Int,
            32 => SampleFormat::Float,
            other => {
                return Err(Error::UnsupportedFormat(format!(
                    "{other}-bit output (expected 16, 24, or 32)"
                )));
            }
        };
        Ok(hound::WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: self.bits_per_sample,
            sample_format,
        })
    }
}

/// Read a WAV file into a planar buffer along with its spec.
///
/// # Example
/// ```ignore
/// let (audio, spec) = read_wav("input.wav")?;
/// println!("{} channels, {} frames at {} Hz", audio.num_channels(), audio.num_frames(), spec.sample_rate);
/// ```
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(AudioBuffer, WavSpec)> {
    let path = path.as_ref();
    let reader = WavReader::open(path)?;
    let hound_spec = reader.spec();
    let spec = WavSpec::from(hound_spec);

    let interleaved: Vec<f32> = match hound_spec.sample_format {
        SampleFormat::Float => {
            if spec.bits_per_sample != 32 {
                return Err(Error::UnsupportedFormat(format!(
                    "{}-bit float",
                    spec.bits_per_sample
                )));
            }
            reader
                .into_samples::<f32>()
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
        SampleFormat::Int => {
            let max_val = int_scale(spec.bits_per_sample);
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let audio = AudioBuffer::from_interleaved(&interleaved, usize::from(spec.channels));
    tracing::debug!(
        path = %path.display(),
        channels = spec.channels,
        sample_rate = spec.sample_rate,
        bits = spec.bits_per_sample,
        frames = audio.num_frames(),
        "read wav"
    );
    Ok((audio, spec))
}

/// Write a planar buffer to a WAV file.
///
/// `spec.channels` must equal `audio.num_channels()`. Integer output is
/// clipped to the representable range.
///
/// # Example
/// ```ignore
/// let audio = AudioBuffer::silent(2, 48000); // 1 second of stereo silence
/// let spec = WavSpec { channels: 2, ..Default::default() };
/// write_wav("output.wav", &audio, spec)?;
/// ```
pub fn write_wav<P: AsRef<Path>>(path: P, audio: &AudioBuffer, spec: WavSpec) -> Result<()> {
    let path = path.as_ref();
    if usize::from(spec.channels) != audio.num_channels() {
        return Err(Error::ChannelMismatch {
            expected: usize::from(spec.channels),
            found: audio.num_channels(),
        });
    }
    let hound_spec = spec.to_hound()?;
    let mut writer = WavWriter::create(path, hound_spec)?;

    let channels = audio.channels();
    if hound_spec.sample_format == SampleFormat::Float {
        for n in 0..audio.num_frames() {
            for ch in channels {
                writer.write_sample(ch[n])?;
            }
        }
    } else {
        let max_val = int_scale(spec.bits_per_sample);
        for n in 0..audio.num_frames() {
            for ch in channels {
                let int_sample = (ch[n] * max_val).clamp(-max_val, max_val - 1.0) as i32;
                writer.write_sample(int_sample)?;
            }
        }
    }

    writer.finalize()?;
    tracing::debug!(
        path = %path.display(),
        channels = spec.channels,
        bits = spec.bits_per_sample,
        frames = audio.num_frames(),
        "wrote wav"
    );
    Ok(())
}

/// Full-scale magnitude of a signed integer sample of `bits` width.
fn int_scale(bits: u16) -> f32 {
    (1i64 << (bits.clamp(1, 32) - 1)) as f32
}
