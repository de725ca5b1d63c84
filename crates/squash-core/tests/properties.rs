//! Property-based tests for the compressor engine and parameter set.
//!
//! Uses proptest to verify invariants that must hold for every in-domain
//! parameter combination: monotonic compression, finite output, exact
//! bypass, and clamped writes.

use std::sync::Arc;

use proptest::prelude::*;
use squash_core::signal::fill_square;
use squash_core::{COMPRESSOR_PARAMS, Compressor, CompressorParams, Effect, PARAM_COUNT};

/// Steady-state output peak for a constant-level square.
fn settled_output(threshold: f32, ratio: f32, amplitude: f32) -> f32 {
    let params = Arc::new(CompressorParams::new());
    params.set_threshold_db(threshold);
    params.set_ratio(ratio);
    params.set_attack_ms(0.1);
    let mut comp = Compressor::new(params);
    comp.prepare(48000.0);

    let mut buf = vec![0.0f32; 4800];
    fill_square(&mut buf, amplitude);
    comp.process_block(&mut [&mut buf[..]]);
    buf[buf.len() - 1].abs()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Raising the ratio never raises the output level.
    #[test]
    fn higher_ratio_never_louder(
        threshold in -60.0f32..=0.0,
        ratio_a in 1.0f32..=10.0,
        ratio_b in 1.0f32..=10.0,
        amplitude in 0.001f32..=1.0,
    ) {
        let (lo, hi) = if ratio_a <= ratio_b { (ratio_a, ratio_b) } else { (ratio_b, ratio_a) };
        let out_lo = settled_output(threshold, lo, amplitude);
        let out_hi = settled_output(threshold, hi, amplitude);
        prop_assert!(
            out_hi <= out_lo * (1.0 + 1e-3),
            "ratio {} gave {} but ratio {} gave {}", hi, out_hi, lo, out_lo
        );
    }

    /// Finite input in [-1, 1] always produces finite output and state.
    #[test]
    fn finite_input_gives_finite_output(
        input in prop::collection::vec(-1.0f32..=1.0, 1..512),
        normalized in prop::array::uniform5(0.0f32..=1.0),
        channels in 1usize..=4,
    ) {
        let params = Arc::new(CompressorParams::new());
        for (i, t) in normalized.iter().enumerate() {
            let desc = &COMPRESSOR_PARAMS[i];
            params.set(i, desc.denormalize(*t));
        }
        let mut comp = Compressor::new(params);
        comp.prepare(44100.0);

        let frames = input.len() / channels;
        let mut buf = input[..frames * channels].to_vec();
        comp.process_interleaved(&mut buf, channels);

        for s in &buf {
            prop_assert!(s.is_finite(), "non-finite output {}", s);
        }
        prop_assert!(comp.envelope_db().is_finite());
        prop_assert!(comp.envelope_db() <= 0.0);
    }

    /// Bypassed processing returns the input bit for bit.
    #[test]
    fn bypass_is_identity(
        input in prop::collection::vec(-4.0f32..=4.0, 0..256),
        normalized in prop::array::uniform5(0.0f32..=1.0),
    ) {
        let params = Arc::new(CompressorParams::new());
        for (i, t) in normalized.iter().enumerate() {
            params.set(i, COMPRESSOR_PARAMS[i].denormalize(*t));
        }
        params.set_bypassed(true);
        let mut comp = Compressor::new(params);
        comp.prepare(48000.0);

        let mut buf = input.clone();
        comp.process_block(&mut [&mut buf[..]]);
        prop_assert_eq!(buf, input);
    }

    /// Every write lands inside the parameter's domain.
    #[test]
    fn writes_stay_in_domain(
        index in 0usize..PARAM_COUNT,
        value in prop::num::f32::ANY,
    ) {
        let params = CompressorParams::new();
        let before = params.get(index);
        params.set(index, value);
        let after = params.get(index).unwrap();
        let desc = &COMPRESSOR_PARAMS[index];

        prop_assert!(after >= desc.min && after <= desc.max, "{} out of range: {}", desc.name, after);
        if value.is_nan() {
            prop_assert_eq!(Some(after), before);
        }
    }
}
