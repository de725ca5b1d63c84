//! Lock-free compressor parameter set.
//!
//! [`CompressorParams`] stores the five numeric controls and the bypass flag
//! in independent atomics. The control thread (UI, automation, CLI) writes;
//! the audio thread reads, per block or per sample, without ever taking a
//! lock.
//!
//! ```text
//! control thread ──► set_threshold_db(..) ──┐
//!                                           │  AtomicF32 × 5, AtomicBool
//! audio thread   ◄── threshold_db()     ◄───┘
//! ```
//!
//! Each scalar is individually race-free, but the set as a whole is not
//! transactional: a reader may observe a new threshold together with an old
//! ratio. The envelope smoothing downstream absorbs such mixed states.
//!
//! Every parameter is declared once, in [`COMPRESSOR_PARAMS`]; defaults,
//! clamping, and name/ID lookup all derive from that table.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::param_info::{ParamDescriptor, ParamId};

/// Number of numeric parameters (bypass is separate).
pub const PARAM_COUNT: usize = 5;

/// Index of the threshold parameter in [`COMPRESSOR_PARAMS`].
pub const THRESHOLD: usize = 0;
/// Index of the ratio parameter.
pub const RATIO: usize = 1;
/// Index of the attack parameter.
pub const ATTACK: usize = 2;
/// Index of the release parameter.
pub const RELEASE: usize = 3;
/// Index of the makeup gain parameter.
pub const MAKEUP: usize = 4;

/// Descriptor table for the compressor's numeric parameters.
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | Threshold | -60.0–0.0 dB | -20.0 |
/// | 1 | Ratio | 1.0–10.0 | 4.0 |
/// | 2 | Attack | 0.1–100.0 ms | 10.0 |
/// | 3 | Release | 10.0–1000.0 ms | 100.0 |
/// | 4 | Makeup Gain | 0.0–20.0 dB | 0.0 |
pub static COMPRESSOR_PARAMS: [ParamDescriptor; PARAM_COUNT] = [
    ParamDescriptor::gain_db("Threshold", "Thresh", -60.0, 0.0, -20.0)
        .with_id(ParamId(0), "threshold"),
    ParamDescriptor::ratio("Ratio", "Ratio", 1.0, 10.0, 4.0).with_id(ParamId(1), "ratio"),
    ParamDescriptor::time_ms("Attack", "Attack", 0.1, 100.0, 10.0).with_id(ParamId(2), "attack"),
    ParamDescriptor::time_ms("Release", "Release", 10.0, 1000.0, 100.0)
        .with_id(ParamId(3), "release"),
    ParamDescriptor::gain_db("Makeup Gain", "Makeup", 0.0, 20.0, 0.0)
        .with_id(ParamId(4), "makeup"),
];

/// An `f32` stored as its bit pattern in an [`AtomicU32`].
#[derive(Debug)]
pub struct AtomicF32(AtomicU32);

impl AtomicF32 {
    /// Create a new atomic holding `value`.
    pub const fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    /// Load the current value.
    #[inline]
    pub fn load(&self, order: Ordering) -> f32 {
        f32::from_bits(self.0.load(order))
    }

    /// Store a new value.
    #[inline]
    pub fn store(&self, value: f32, order: Ordering) {
        self.0.store(value.to_bits(), order);
    }
}

/// Plain copy of every parameter, read field by field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSnapshot {
    /// Threshold in dB.
    pub threshold_db: f32,
    /// Compression ratio (n:1).
    pub ratio: f32,
    /// Attack time constant in milliseconds.
    pub attack_ms: f32,
    /// Release time constant in milliseconds.
    pub release_ms: f32,
    /// Makeup gain in dB.
    pub makeup_db: f32,
    /// Whether the compressor passes audio through untouched.
    pub bypassed: bool,
}

impl Default for ParamSnapshot {
    fn default() -> Self {
        Self {
            threshold_db: COMPRESSOR_PARAMS[THRESHOLD].default,
            ratio: COMPRESSOR_PARAMS[RATIO].default,
            attack_ms: COMPRESSOR_PARAMS[ATTACK].default,
            release_ms: COMPRESSOR_PARAMS[RELEASE].default,
            makeup_db: COMPRESSOR_PARAMS[MAKEUP].default,
            bypassed: false,
        }
    }
}

/// Thread-safe compressor parameter set.
///
/// Share it as `Arc<CompressorParams>`: the engine keeps one handle for
/// reading, the control side keeps another for writing. Writes clamp to the
/// descriptor range; `NaN` writes are dropped and the previous value stays.
///
/// # Example
///
/// ```rust
/// use squash_core::CompressorParams;
///
/// let params = CompressorParams::new();
/// params.set_ratio(40.0);
/// assert_eq!(params.ratio(), 10.0);
///
/// params.set_threshold_db(f32::NAN);
/// assert_eq!(params.threshold_db(), -20.0);
/// ```
#[derive(Debug)]
pub struct CompressorParams {
    values: [AtomicF32; PARAM_COUNT],
    bypassed: AtomicBool,
}

impl CompressorParams {
    /// Create a parameter set holding every default.
    pub fn new() -> Self {
        Self {
            values: core::array::from_fn(|i| AtomicF32::new(COMPRESSOR_PARAMS[i].default)),
            bypassed: AtomicBool::new(false),
        }
    }

    /// Descriptor table backing this set.
    pub fn descriptors() -> &'static [ParamDescriptor] {
        &COMPRESSOR_PARAMS
    }

    /// Parameter descriptor by index.
    pub fn descriptor(index: usize) -> Option<&'static ParamDescriptor> {
        COMPRESSOR_PARAMS.get(index)
    }

    /// Find a parameter index by stable [`ParamId`].
    pub fn index_by_id(id: ParamId) -> Option<usize> {
        COMPRESSOR_PARAMS.iter().position(|d| d.id == id)
    }

    /// Find a parameter index by name, short name, or string ID
    /// (case-insensitive).
    pub fn index_by_name(name: &str) -> Option<usize> {
        COMPRESSOR_PARAMS.iter().position(|d| d.matches_name(name))
    }

    /// Read a parameter by index (lock-free). `None` if out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<f32> {
        self.values.get(index).map(|v| v.load(Ordering::Acquire))
    }

    /// Write a parameter by index (lock-free). Clamps to descriptor bounds.
    ///
    /// Out-of-range indices and `NaN` values are ignored.
    pub fn set(&self, index: usize, value: f32) {
        if value.is_nan() {
            return;
        }
        if let Some((atomic, desc)) = self.values.get(index).zip(COMPRESSOR_PARAMS.get(index)) {
            atomic.store(desc.clamp(value), Ordering::Release);
        }
    }

    #[inline]
    fn load(&self, index: usize) -> f32 {
        self.values[index].load(Ordering::Acquire)
    }

    /// Threshold in dB, in \[-60, 0\].
    #[inline]
    pub fn threshold_db(&self) -> f32 {
        self.load(THRESHOLD)
    }

    /// Set the threshold in dB.
    pub fn set_threshold_db(&self, threshold_db: f32) {
        self.set(THRESHOLD, threshold_db);
    }

    /// Compression ratio, in \[1, 10\].
    #[inline]
    pub fn ratio(&self) -> f32 {
        self.load(RATIO)
    }

    /// Set the compression ratio.
    pub fn set_ratio(&self, ratio: f32) {
        self.set(RATIO, ratio);
    }

    /// Attack time in ms, in \[0.1, 100\].
    #[inline]
    pub fn attack_ms(&self) -> f32 {
        self.load(ATTACK)
    }

    /// Set the attack time in ms.
    pub fn set_attack_ms(&self, attack_ms: f32) {
        self.set(ATTACK, attack_ms);
    }

    /// Release time in ms, in \[10, 1000\].
    #[inline]
    pub fn release_ms(&self) -> f32 {
        self.load(RELEASE)
    }

    /// Set the release time in ms.
    pub fn set_release_ms(&self, release_ms: f32) {
        self.set(RELEASE, release_ms);
    }

    /// Makeup gain in dB, in \[0, 20\].
    #[inline]
    pub fn makeup_db(&self) -> f32 {
        self.load(MAKEUP)
    }

    /// Set the makeup gain in dB.
    pub fn set_makeup_db(&self, makeup_db: f32) {
        self.set(MAKEUP, makeup_db);
    }

    /// Whether the compressor is bypassed.
    #[inline]
    pub fn is_bypassed(&self) -> bool {
        self.bypassed.load(Ordering::Acquire)
    }

    /// Set the bypass state.
    pub fn set_bypassed(&self, bypassed: bool) {
        self.bypassed.store(bypassed, Ordering::Release);
    }

    /// Read every parameter into a [`ParamSnapshot`].
    pub fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            threshold_db: self.threshold_db(),
            ratio: self.ratio(),
            attack_ms: self.attack_ms(),
            release_ms: self.release_ms(),
            makeup_db: self.makeup_db(),
            bypassed: self.is_bypassed(),
        }
    }

    /// Write every field of `snapshot` (each one clamped independently).
    pub fn apply(&self, snapshot: &ParamSnapshot) {
        self.set_threshold_db(snapshot.threshold_db);
        self.set_ratio(snapshot.ratio);
        self.set_attack_ms(snapshot.attack_ms);
        self.set_release_ms(snapshot.release_ms);
        self.set_makeup_db(snapshot.makeup_db);
        self.set_bypassed(snapshot.bypassed);
    }

    /// Restore every parameter to its default and clear bypass.
    pub fn reset_to_defaults(&self) {
        self.apply(&ParamSnapshot::default());
    }
}

impl Default for CompressorParams {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_descriptors() {
        let params = CompressorParams::new();
        for (i, desc) in COMPRESSOR_PARAMS.iter().enumerate() {
            assert_eq!(
                params.get(i),
                Some(desc.default),
                "param {i} ({}) default mismatch",
                desc.name
            );
        }
        assert!(!params.is_bypassed());

        let snap = params.snapshot();
        assert_eq!(snap, ParamSnapshot::default());
        assert_eq!(snap.threshold_db, -20.0);
        assert_eq!(snap.ratio, 4.0);
        assert_eq!(snap.attack_ms, 10.0);
        assert_eq!(snap.release_ms, 100.0);
        assert_eq!(snap.makeup_db, 0.0);
    }

    #[test]
    fn writes_clamp_to_domain() {
        let params = CompressorParams::new();

        params.set_threshold_db(-90.0);
        assert_eq!(params.threshold_db(), -60.0);
        params.set_threshold_db(6.0);
        assert_eq!(params.threshold_db(), 0.0);

        params.set_ratio(0.0);
        assert_eq!(params.ratio(), 1.0);
        params.set_ratio(100.0);
        assert_eq!(params.ratio(), 10.0);

        params.set_attack_ms(0.0);
        assert_eq!(params.attack_ms(), 0.1);
        params.set_release_ms(5000.0);
        assert_eq!(params.release_ms(), 1000.0);

        params.set_makeup_db(-12.0);
        assert_eq!(params.makeup_db(), 0.0);
        params.set_makeup_db(f32::INFINITY);
        assert_eq!(params.makeup_db(), 20.0);
    }

    #[test]
    fn nan_writes_are_ignored() {
        let params = CompressorParams::new();
        params.set_ratio(2.5);
        params.set_ratio(f32::NAN);
        assert_eq!(params.ratio(), 2.5);
    }

    #[test]
    fn index_access_out_of_range_safe() {
        let params = CompressorParams::new();
        assert_eq!(params.get(PARAM_COUNT), None);
        assert!(CompressorParams::descriptor(99).is_none());
        // Should not panic.
        params.set(99, 1.0);
    }

    #[test]
    fn lookup_by_name_and_id() {
        assert_eq!(CompressorParams::index_by_name("threshold"), Some(THRESHOLD));
        assert_eq!(CompressorParams::index_by_name("Thresh"), Some(THRESHOLD));
        assert_eq!(CompressorParams::index_by_name("MAKEUP GAIN"), Some(MAKEUP));
        assert_eq!(CompressorParams::index_by_name("knee"), None);

        for (i, desc) in COMPRESSOR_PARAMS.iter().enumerate() {
            assert_eq!(CompressorParams::index_by_id(desc.id), Some(i));
        }
        assert_eq!(CompressorParams::index_by_id(ParamId(999)), None);
    }

    #[test]
    fn apply_and_reset() {
        let params = CompressorParams::new();
        params.apply(&ParamSnapshot {
            threshold_db: -30.0,
            ratio: 8.0,
            attack_ms: 1.0,
            release_ms: 250.0,
            makeup_db: 6.0,
            bypassed: true,
        });
        assert_eq!(params.threshold_db(), -30.0);
        assert_eq!(params.ratio(), 8.0);
        assert!(params.is_bypassed());

        params.reset_to_defaults();
        assert_eq!(params.snapshot(), ParamSnapshot::default());
    }

    #[cfg(feature = "std")]
    #[test]
    fn concurrent_writer_never_tears_scalars() {
        use std::sync::Arc;
        use std::thread;

        let params = Arc::new(CompressorParams::new());
        let writer = {
            let params = Arc::clone(&params);
            thread::spawn(move || {
                for i in 0..10_000 {
                    let t = if i % 2 == 0 { -60.0 } else { 0.0 };
                    params.set_threshold_db(t);
                }
            })
        };

        for _ in 0..10_000 {
            let t = params.threshold_db();
            assert!(t == -60.0 || t == 0.0 || t == -20.0, "torn value {t}");
        }
        writer.join().unwrap();
    }
}
