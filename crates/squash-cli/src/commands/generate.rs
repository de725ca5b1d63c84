//! Test signal generation command.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use squash_core::signal::{fill_level_step, fill_silence, fill_sine, fill_square};
use squash_io::{AudioBuffer, WavSpec, write_wav};

#[derive(Args)]
pub struct GenerateArgs {
    #[command(subcommand)]
    command: GenerateCommand,
}

/// Options shared by every generator.
#[derive(Args)]
struct OutputArgs {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Duration in seconds
    #[arg(long, default_value = "1.0")]
    duration: f32,

    /// Sample rate
    #[arg(long, default_value = "48000")]
    sample_rate: u32,

    /// Number of channels (all carry the same signal)
    #[arg(long, default_value = "1")]
    channels: u16,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

#[derive(Subcommand)]
enum GenerateCommand {
    /// Generate a sine tone
    Tone {
        #[command(flatten)]
        out: OutputArgs,

        /// Frequency in Hz
        #[arg(long, default_value = "440.0")]
        freq: f32,

        /// Amplitude (0-1)
        #[arg(long, default_value = "0.8")]
        amplitude: f32,
    },

    /// Generate a constant-level square (sign flips every sample)
    Square {
        #[command(flatten)]
        out: OutputArgs,

        /// Amplitude (0-1)
        #[arg(long, default_value = "1.0")]
        amplitude: f32,
    },

    /// Generate a constant-level square whose amplitude steps once
    Step {
        #[command(flatten)]
        out: OutputArgs,

        /// Amplitude before the step
        #[arg(long, default_value = "0.05")]
        before: f32,

        /// Amplitude after the step
        #[arg(long, default_value = "1.0")]
        after: f32,

        /// Step time in seconds
        #[arg(long, default_value = "0.5")]
        at: f32,
    },

    /// Generate silence
    Silence {
        #[command(flatten)]
        out: OutputArgs,
    },
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    let (out, description) = match &args.command {
        GenerateCommand::Tone { out, freq, .. } => (out, format!("{freq} Hz tone")),
        GenerateCommand::Square { out, amplitude } => (out, format!("square at {amplitude}")),
        GenerateCommand::Step { out, before, after, at } => {
            (out, format!("step {before} -> {after} at {at}s"))
        }
        GenerateCommand::Silence { out } => (out, "silence".to_string()),
    };

    if out.channels == 0 {
        anyhow::bail!("--channels must be at least 1");
    }
    if !(out.duration.is_finite() && out.duration >= 0.0) {
        anyhow::bail!("--duration must be a non-negative number, got {}", out.duration);
    }

    let num_frames = (out.duration * out.sample_rate as f32) as usize;
    let sample_rate = out.sample_rate as f32;
    let mut samples = vec![0.0f32; num_frames];

    match &args.command {
        GenerateCommand::Tone {
            freq, amplitude, ..
        } => fill_sine(&mut samples, *freq, sample_rate, *amplitude),
        GenerateCommand::Square { amplitude, .. } => fill_square(&mut samples, *amplitude),
        GenerateCommand::Step {
            before, after, at, ..
        } => {
            let step_at = (at.max(0.0) * sample_rate) as usize;
            fill_level_step(&mut samples, step_at, *before, *after);
        }
        GenerateCommand::Silence { .. } => fill_silence(&mut samples),
    }

    let audio = AudioBuffer::new(vec![samples; usize::from(out.channels)])?;
    let spec = WavSpec {
        channels: out.channels,
        sample_rate: out.sample_rate,
        bits_per_sample: out.bit_depth,
    };
    write_wav(&out.output, &audio, spec)?;

    tracing::info!(
        output = %out.output.display(),
        frames = num_frames,
        channels = out.channels,
        "generated {description}"
    );
    println!(
        "Generated {} ({:.2}s, {} Hz, {} ch) -> {}",
        description,
        out.duration,
        out.sample_rate,
        out.channels,
        out.output.display()
    );

    Ok(())
}
