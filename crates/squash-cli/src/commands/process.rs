//! File-based compression command.
//!
//! The compressor runs on a dedicated audio thread, block by block, as it
//! would inside a host callback. The audio thread folds the meter into the
//! deepest gain reduction after every block. The main thread acts as the UI:
//! it polls the meter and the block counter at about 30 Hz to drive the
//! progress bar.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use squash_core::{Compressor, CompressorParams, Effect, ParamSnapshot};
use squash_io::{AudioBuffer, BlockDriver, WavSpec, read_wav, write_wav};

use super::common::{ParamArgs, to_dbfs};

const METER_POLL: Duration = Duration::from_millis(33);

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    #[command(flatten)]
    params: ParamArgs,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,

    /// Write a JSON summary to this file
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,
}

/// Level statistics for one file.
#[derive(Debug, Clone, Copy, Serialize)]
struct LevelStats {
    peak_db: f32,
    rms_db: f32,
}

impl LevelStats {
    fn measure(audio: &AudioBuffer) -> Self {
        Self {
            peak_db: to_dbfs(audio.peak()),
            rms_db: to_dbfs(audio.rms()),
        }
    }
}

/// Settings recorded in the JSON report.
#[derive(Debug, Serialize)]
struct ReportParams {
    threshold_db: f32,
    ratio: f32,
    attack_ms: f32,
    release_ms: f32,
    makeup_db: f32,
    bypassed: bool,
}

impl From<ParamSnapshot> for ReportParams {
    fn from(s: ParamSnapshot) -> Self {
        Self {
            threshold_db: s.threshold_db,
            ratio: s.ratio,
            attack_ms: s.attack_ms,
            release_ms: s.release_ms,
            makeup_db: s.makeup_db,
            bypassed: s.bypassed,
        }
    }
}

/// JSON summary written by `--report`.
#[derive(Debug, Serialize)]
struct ProcessReport {
    input: String,
    output: String,
    sample_rate: u32,
    channels: usize,
    frames: usize,
    block_size: usize,
    blocks: usize,
    params: ReportParams,
    input_levels: LevelStats,
    output_levels: LevelStats,
    /// Deepest gain reduction over all blocks.
    max_gain_reduction_db: f64,
    /// Meter value after the last block.
    final_gain_reduction_db: f64,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    let driver = BlockDriver::new(args.block_size)?;

    // Read input file
    println!("Reading {}...", args.input.display());
    let (audio, spec) = read_wav(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let frames = audio.num_frames();
    let channels = audio.num_channels();

    println!(
        "  {} frames, {} ch, {} Hz, {:.2}s",
        frames,
        channels,
        spec.sample_rate,
        frames as f64 / f64::from(spec.sample_rate)
    );

    let params = Arc::new(CompressorParams::new());
    args.params.apply(&params)?;
    let snapshot = params.snapshot();
    println!(
        "Compressing: threshold {:.1} dB, ratio {:.1}:1, attack {:.1} ms, release {:.1} ms, makeup {:.1} dB{}",
        snapshot.threshold_db,
        snapshot.ratio,
        snapshot.attack_ms,
        snapshot.release_ms,
        snapshot.makeup_db,
        if snapshot.bypassed { " (bypassed)" } else { "" }
    );

    let input_levels = LevelStats::measure(&audio);

    let mut comp = Compressor::new(Arc::clone(&params));
    comp.prepare(f64::from(spec.sample_rate));
    let meter = comp.meter();
    let progress = Arc::new(AtomicUsize::new(0));

    tracing::info!(
        frames,
        channels,
        block_size = driver.block_size(),
        "starting audio thread"
    );

    let audio_thread = {
        let progress = Arc::clone(&progress);
        let block_meter = comp.meter();
        let mut audio = audio;
        thread::Builder::new()
            .name("squash-audio".into())
            .spawn(move || {
                // Deepest reduction across every block, not just the polled ones
                let mut deepest = 0.0f64;
                let blocks = driver.run(&mut comp, &mut audio, |p| {
                    deepest = deepest.min(block_meter.read());
                    progress.store(p.frames_done, Ordering::Relaxed);
                });
                (audio, blocks, deepest)
            })
            .context("Failed to spawn audio thread")?
    };

    // Process with progress bar
    let pb = ProgressBar::new(frames as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("##-"),
    );

    while !audio_thread.is_finished() {
        let reduction = meter.read();
        pb.set_position(progress.load(Ordering::Relaxed) as u64);
        pb.set_message(format!("GR {reduction:>6.1} dB"));
        thread::sleep(METER_POLL);
    }

    let (output, blocks, max_reduction) = audio_thread
        .join()
        .map_err(|_| anyhow::anyhow!("Audio thread panicked"))?;
    let final_reduction = meter.read();
    pb.set_position(frames as u64);
    pb.finish_with_message(format!("GR {final_reduction:>6.1} dB"));

    // Calculate stats
    let output_levels = LevelStats::measure(&output);

    println!("\nStats:");
    println!(
        "  Input:  RMS {:.1} dB, Peak {:.1} dB",
        input_levels.rms_db, input_levels.peak_db
    );
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        output_levels.rms_db, output_levels.peak_db
    );
    println!("  Max gain reduction: {max_reduction:.1} dB");

    // Write output file
    let out_spec = WavSpec {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: args.bit_depth,
    };

    println!("\nWriting {}...", args.output.display());
    write_wav(&args.output, &output, out_spec)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    if let Some(report_path) = &args.report {
        let report = ProcessReport {
            input: args.input.display().to_string(),
            output: args.output.display().to_string(),
            sample_rate: spec.sample_rate,
            channels,
            frames,
            block_size: args.block_size,
            blocks,
            params: snapshot.into(),
            input_levels,
            output_levels,
            max_gain_reduction_db: max_reduction,
            final_gain_reduction_db: final_reduction,
        };
        write_report(report_path, &report)?;
        println!("Report written to {}", report_path.display());
    }

    println!("Done!");
    Ok(())
}

fn write_report(path: &Path, report: &ProcessReport) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write report {}", path.display()))?;
    tracing::debug!(path = %path.display(), "report written");
    Ok(())
}
