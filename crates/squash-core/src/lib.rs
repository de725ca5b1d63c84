//! Squash Core - real-time dynamic range compressor
//!
//! This crate provides the compressor engine and its lock-free parameter set,
//! designed for real-time audio processing with zero allocation in the audio
//! path.
//!
//! # Core Abstractions
//!
//! ## Parameters
//!
//! - [`CompressorParams`] - Atomic parameter set shared between a control
//!   thread and the audio thread
//! - [`COMPRESSOR_PARAMS`] - Descriptor table (names, ranges, defaults, IDs)
//! - [`ParamDescriptor`] - Per-parameter metadata and normalization
//!
//! ## Engine
//!
//! - [`Effect`] - Object-safe block-processing trait
//! - [`Compressor`] - Channel-linked peak compressor
//! - [`GainReductionMeter`] - Lock-free gain-reduction readout
//!
//! ## Building Blocks
//!
//! - [`GainComputer`] - Hard-knee static transfer curve
//! - [`GainEnvelope`] / [`SmoothingCoeffs`] - Attack/release smoothing in dB
//! - Math functions: [`db_to_linear`], [`linear_to_db`], [`level_to_db`],
//!   [`time_constant_coeff`]
//! - [`signal`] - Deterministic test signals and level measurements
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible (it needs `alloc` for `Arc`).
//! Disable the default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! squash-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use squash_core::{Compressor, CompressorParams, Effect};
//!
//! let params = Arc::new(CompressorParams::new());
//! let mut comp = Compressor::new(Arc::clone(&params));
//! comp.prepare(48000.0);
//!
//! // Control thread: change settings at any time
//! params.set_ratio(8.0);
//!
//! // Audio thread: process interleaved stereo in place
//! let mut block = [0.5f32; 512];
//! comp.process_interleaved(&mut block, 2);
//!
//! // UI thread: poll the meter
//! let meter = comp.meter();
//! assert!(meter.read() <= 0.0);
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: No allocations, locks, or I/O while processing
//! - **No dependencies on std**: `libm` for math
//! - **Object-safe traits**: Drivers can hold `&mut dyn Effect`

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod compressor;
pub mod effect;
pub mod envelope;
pub mod gain_computer;
pub mod math;
pub mod meter;
pub mod param_info;
pub mod params;
pub mod signal;

// Re-export main types at crate root
pub use compressor::Compressor;
pub use effect::Effect;
pub use envelope::{GainEnvelope, SmoothingCoeffs};
pub use gain_computer::GainComputer;
pub use math::{
    LEVEL_CEILING, LEVEL_FLOOR, db_to_linear, flush_denormal, level_to_db, linear_to_db,
    time_constant_coeff,
};
pub use meter::GainReductionMeter;
pub use param_info::{ParamDescriptor, ParamId, ParamScale, ParamUnit, ParamValueDisplay};
pub use params::{AtomicF32, COMPRESSOR_PARAMS, CompressorParams, PARAM_COUNT, ParamSnapshot};
