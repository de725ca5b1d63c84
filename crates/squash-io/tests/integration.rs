//! Integration tests for squash-io WAV I/O and the block driver.

use std::sync::Arc;

use squash_core::signal::{fill_sine, fill_square};
use squash_core::{Compressor, CompressorParams, Effect};
use squash_io::{AudioBuffer, BlockDriver, WavFormat, WavSpec, read_wav, read_wav_info, write_wav};
use tempfile::NamedTempFile;

fn sine(sample_rate: u32, freq_hz: f32, num_samples: usize, amplitude: f32) -> Vec<f32> {
    let mut buf = vec![0.0; num_samples];
    fill_sine(&mut buf, freq_hz, sample_rate as f32, amplitude);
    buf
}

// ---------------------------------------------------------------------------
// WAV roundtrips
// ---------------------------------------------------------------------------

#[test]
fn wav_roundtrip_multichannel_f32() {
    let sr = 48000;
    let audio = AudioBuffer::new(vec![
        sine(sr, 220.0, 4800, 0.9),
        sine(sr, 440.0, 4800, 0.5),
        sine(sr, 880.0, 4800, 0.25),
        vec![0.0; 4800],
    ])
    .unwrap();
    let spec = WavSpec {
        channels: 4,
        sample_rate: sr,
        bits_per_sample: 32,
    };

    let file = NamedTempFile::new().unwrap();
    write_wav(file.path(), &audio, spec).unwrap();

    let (loaded, loaded_spec) = read_wav(file.path()).unwrap();
    assert_eq!(loaded_spec, spec);
    assert_eq!(loaded, audio);
}

#[test]
fn wav_roundtrip_stereo_i16() {
    let sr = 44100;
    let audio = AudioBuffer::new(vec![sine(sr, 440.0, 1000, 0.9), sine(sr, 660.0, 1000, 0.9)])
        .unwrap();
    let spec = WavSpec {
        channels: 2,
        sample_rate: sr,
        bits_per_sample: 16,
    };

    let file = NamedTempFile::new().unwrap();
    write_wav(file.path(), &audio, spec).unwrap();

    let (loaded, loaded_spec) = read_wav(file.path()).unwrap();
    assert_eq!(loaded_spec.bits_per_sample, 16);
    assert_eq!(loaded.num_channels(), 2);
    assert_eq!(loaded.num_frames(), 1000);

    // 16-bit quantization error is about 1/32768
    for (a, b) in audio.to_interleaved().iter().zip(loaded.to_interleaved()) {
        assert!((a - b).abs() < 0.001, "i16 roundtrip mismatch: {a} vs {b}");
    }
}

#[test]
fn wav_write_empty_buffer() {
    let file = NamedTempFile::new().unwrap();
    write_wav(file.path(), &AudioBuffer::silent(1, 0), WavSpec::default()).unwrap();

    let (loaded, _) = read_wav(file.path()).unwrap();
    assert!(loaded.is_empty());
}

#[test]
fn wav_info_reports_format() {
    let sr = 96000;
    let audio = AudioBuffer::silent(2, 48000);
    let spec = WavSpec {
        channels: 2,
        sample_rate: sr,
        bits_per_sample: 24,
    };

    let file = NamedTempFile::new().unwrap();
    write_wav(file.path(), &audio, spec).unwrap();

    let info = read_wav_info(file.path()).unwrap();
    assert_eq!(info.channels, 2);
    assert_eq!(info.sample_rate, sr);
    assert_eq!(info.bits_per_sample, 24);
    assert_eq!(info.num_frames, 48000);
    assert_eq!(info.format, WavFormat::Pcm);
    assert!((info.duration_secs - 0.5).abs() < 1e-9);
}

#[test]
fn read_missing_file_is_error() {
    assert!(read_wav("/nonexistent/definitely/missing.wav").is_err());
}

// ---------------------------------------------------------------------------
// Block driver + compressor
// ---------------------------------------------------------------------------

#[test]
fn driver_matches_single_block_processing() {
    let make = || {
        let params = Arc::new(CompressorParams::new());
        params.set_threshold_db(-18.0);
        params.set_ratio(5.0);
        let mut comp = Compressor::new(params);
        comp.prepare(48000.0);
        comp
    };

    let mut left = vec![0.0; 9000];
    let mut right = vec![0.0; 9000];
    fill_square(&mut left, 0.8);
    fill_sine(&mut right, 100.0, 48000.0, 0.3);

    let mut whole = AudioBuffer::new(vec![left.clone(), right.clone()]).unwrap();
    let mut comp = make();
    BlockDriver::new(9000).unwrap().run(&mut comp, &mut whole, |_| {});

    let mut blocked = AudioBuffer::new(vec![left, right]).unwrap();
    let mut comp = make();
    let mut last_fraction = 0.0;
    BlockDriver::new(333)
        .unwrap()
        .run(&mut comp, &mut blocked, |p| last_fraction = p.fraction());

    assert_eq!(blocked, whole);
    assert_eq!(last_fraction, 1.0);
}

#[test]
fn compress_wav_file_end_to_end() {
    let sr = 48000;
    let mut loud = vec![0.0; sr as usize];
    fill_square(&mut loud, 1.0);
    let audio = AudioBuffer::new(vec![loud.clone(), loud]).unwrap();
    let spec = WavSpec {
        channels: 2,
        sample_rate: sr,
        bits_per_sample: 32,
    };

    let input = NamedTempFile::new().unwrap();
    let output = NamedTempFile::new().unwrap();
    write_wav(input.path(), &audio, spec).unwrap();

    let (mut buffer, read_spec) = read_wav(input.path()).unwrap();
    let params = Arc::new(CompressorParams::new());
    let mut comp = Compressor::new(Arc::clone(&params));
    comp.prepare(f64::from(read_spec.sample_rate));
    let meter = comp.meter();
    BlockDriver::new(512).unwrap().run(&mut comp, &mut buffer, |_| {});
    write_wav(output.path(), &buffer, read_spec).unwrap();

    let (result, _) = read_wav(output.path()).unwrap();
    // Default -20 dB / 4:1 settles at -15 dB for a 0 dBFS input
    let tail = &result.channel(0).unwrap()[sr as usize - 100..];
    let expected = squash_core::db_to_linear(-15.0);
    for s in tail {
        assert!((s.abs() - expected).abs() < 1e-3, "{s} vs {expected}");
    }
    assert!((meter.read() + 15.0).abs() < 1e-2);
}
