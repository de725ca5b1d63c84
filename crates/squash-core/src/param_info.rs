//! Parameter metadata for the compressor's controls.
//!
//! Each parameter is described once by a [`ParamDescriptor`] carrying its
//! display names, unit, range, default, and a stable [`ParamId`]. The
//! descriptor table in [`params`](crate::params) is the single source of truth
//! for defaults, clamping, lookup by name, and host-control normalization.
//!
//! # Example
//!
//! ```rust
//! use squash_core::{ParamDescriptor, ParamId};
//!
//! let release = ParamDescriptor::time_ms("Release", "Release", 10.0, 1000.0, 100.0)
//!     .with_id(ParamId(3), "release");
//!
//! assert_eq!(release.clamp(5000.0), 1000.0);
//! assert_eq!(format!("{}", release.display(250.0)), "250.0 ms");
//! ```
//!
//! # no_std Support
//!
//! This module is fully `no_std` compatible with no heap allocations required.

use core::fmt;

/// Scaling curve for parameter normalization.
///
/// Determines how a parameter's plain value maps to normalized \[0.0, 1.0\]
/// space for host controls.
///
/// - **Linear**: `normalized = (value - min) / (max - min)`
/// - **Logarithmic**: `normalized = ln(value/min) / ln(max/min)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamScale {
    /// Linear mapping (default). Equal resolution across the range.
    #[default]
    Linear,
    /// Logarithmic mapping. More resolution at low values.
    /// Requires `min > 0.0`.
    Logarithmic,
}

/// Stable parameter identifier that survives reordering.
///
/// Once assigned, a `ParamId` must never change for a given parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Describes a single parameter's metadata for display and validation.
///
/// # Short Name
///
/// `short_name` should be 8 characters or less so it fits narrow meter and
/// hardware displays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display (e.g., "Makeup Gain").
    pub name: &'static str,

    /// Short name for narrow displays, max 8 characters.
    pub short_name: &'static str,

    /// Unit type for formatting the parameter value.
    pub unit: ParamUnit,

    /// Minimum allowed value for this parameter.
    pub min: f32,

    /// Maximum allowed value for this parameter.
    pub max: f32,

    /// Default value when the parameter set is created or reset.
    pub default: f32,

    /// Recommended step increment for encoder-based control.
    pub step: f32,

    /// Stable numeric ID. Default: `ParamId(0)`.
    pub id: ParamId,

    /// Human-readable stable ID used on the command line (e.g. `"threshold"`).
    pub string_id: &'static str,

    /// Normalization curve for mapping between plain and normalized values.
    pub scale: ParamScale,
}

impl ParamDescriptor {
    /// Gain parameter with custom name and range (decibels).
    pub const fn gain_db(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Decibels,
            min,
            max,
            default,
            step: 0.5,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Linear,
        }
    }

    /// Time parameter with custom name and range (milliseconds).
    ///
    /// Uses logarithmic scaling: time constants are perceived proportionally.
    pub const fn time_ms(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Milliseconds,
            min,
            max,
            default,
            step: 0.1,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Logarithmic,
        }
    }

    /// Ratio parameter (n:1).
    pub const fn ratio(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Ratio,
            min,
            max,
            default,
            step: 0.1,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Linear,
        }
    }

    /// Sets the stable parameter ID and string ID.
    ///
    /// Builder: call after a factory method or struct literal.
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Clamps a value to this parameter's valid range.
    ///
    /// # Example
    ///
    /// ```rust
    /// use squash_core::ParamDescriptor;
    ///
    /// let desc = ParamDescriptor::gain_db("Makeup", "Makeup", 0.0, 20.0, 0.0);
    /// assert_eq!(desc.clamp(6.0), 6.0);
    /// assert_eq!(desc.clamp(-3.0), 0.0);
    /// assert_eq!(desc.clamp(30.0), 20.0);
    /// ```
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Returns `true` if `name` matches the full name, short name, or string
    /// ID (ASCII case-insensitive).
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.short_name.eq_ignore_ascii_case(name)
            || (!self.string_id.is_empty() && self.string_id.eq_ignore_ascii_case(name))
    }

    /// Converts a plain value to normalized range (0.0 to 1.0).
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        match self.scale {
            ParamScale::Linear => (value - self.min) / range,
            ParamScale::Logarithmic => {
                if self.min <= 0.0 || value <= 0.0 {
                    return 0.0;
                }
                libm::logf(value / self.min) / libm::logf(self.max / self.min)
            }
        }
    }

    /// Converts a normalized value (0.0 to 1.0) to the actual parameter range.
    ///
    /// Inverse of [`normalize`](Self::normalize).
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        match self.scale {
            ParamScale::Linear => self.min + normalized * (self.max - self.min),
            ParamScale::Logarithmic => {
                if self.min <= 0.0 {
                    return self.min;
                }
                self.min * libm::powf(self.max / self.min, normalized)
            }
        }
    }

    /// Formats `value` with this parameter's unit, e.g. `-20.0 dB`, `4.0:1`.
    pub fn display(&self, value: f32) -> ParamValueDisplay {
        ParamValueDisplay {
            value,
            unit: self.unit,
        }
    }
}

/// [`fmt::Display`] adapter returned by [`ParamDescriptor::display`].
#[derive(Debug, Clone, Copy)]
pub struct ParamValueDisplay {
    value: f32,
    unit: ParamUnit,
}

impl fmt::Display for ParamValueDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}{}", self.value, self.unit.suffix())
    }
}

/// Unit type for parameter display and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Decibels (dB) - threshold and makeup gain.
    Decibels,

    /// Milliseconds (ms) - attack and release.
    Milliseconds,

    /// Ratio (n:1) - compression ratio.
    Ratio,
}

impl ParamUnit {
    /// Returns the unit suffix string for display.
    ///
    /// # Example
    ///
    /// ```rust
    /// use squash_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Decibels.suffix(), " dB");
    /// assert_eq!(ParamUnit::Ratio.suffix(), ":1");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Decibels => " dB",
            ParamUnit::Milliseconds => " ms",
            ParamUnit::Ratio => ":1",
        }
    }
}
