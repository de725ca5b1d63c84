//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use clap::Args;
use squash_core::CompressorParams;
use squash_core::params::{ATTACK, MAKEUP, RATIO, RELEASE, THRESHOLD};

/// Parse a `key=value` string for clap's `value_parser`.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("Invalid parameter format: '{s}' (expected key=value)")),
    }
}

/// Compressor settings shared by `process` and `curve`.
#[derive(Args, Debug, Default)]
pub struct ParamArgs {
    /// Threshold in dB (-60 to 0)
    #[arg(short, long, allow_hyphen_values = true)]
    pub threshold: Option<f32>,

    /// Compression ratio (1 to 10)
    #[arg(short, long)]
    pub ratio: Option<f32>,

    /// Attack time in ms (0.1 to 100)
    #[arg(short, long)]
    pub attack: Option<f32>,

    /// Release time in ms (10 to 1000)
    #[arg(long)]
    pub release: Option<f32>,

    /// Makeup gain in dB (0 to 20)
    #[arg(short, long)]
    pub makeup: Option<f32>,

    /// Pass audio through unprocessed
    #[arg(long)]
    pub bypass: bool,

    /// Parameter override by name or ID (e.g., "threshold=-24"), applied last
    #[arg(long, value_parser = parse_key_val, number_of_values = 1)]
    pub param: Vec<(String, String)>,
}

impl ParamArgs {
    /// Write every given setting into `params`.
    ///
    /// Values outside a parameter's range are clamped (with a warning).
    pub fn apply(&self, params: &CompressorParams) -> anyhow::Result<()> {
        let named = [
            (THRESHOLD, self.threshold),
            (RATIO, self.ratio),
            (ATTACK, self.attack),
            (RELEASE, self.release),
            (MAKEUP, self.makeup),
        ];
        for (index, value) in named {
            if let Some(value) = value {
                set_checked(params, index, value)?;
            }
        }
        if self.bypass {
            params.set_bypassed(true);
        }

        for (key, value) in &self.param {
            if key.eq_ignore_ascii_case("bypass") {
                let bypassed = parse_bool(value)
                    .with_context(|| format!("Invalid value for bypass: '{value}'"))?;
                params.set_bypassed(bypassed);
                continue;
            }
            let Some(index) = CompressorParams::index_by_name(key) else {
                anyhow::bail!(
                    "Unknown parameter: '{}'. Use 'squash params' to list parameters.",
                    key
                );
            };
            let value: f32 = value
                .parse()
                .with_context(|| format!("Invalid value for {key}: '{value}'"))?;
            set_checked(params, index, value)?;
        }

        tracing::debug!(snapshot = ?params.snapshot(), "parameters applied");
        Ok(())
    }
}

fn set_checked(params: &CompressorParams, index: usize, value: f32) -> anyhow::Result<()> {
    let Some(desc) = CompressorParams::descriptor(index) else {
        anyhow::bail!("Parameter index {index} out of range");
    };
    if !value.is_finite() {
        anyhow::bail!("{} must be a finite number, got {value}", desc.name);
    }
    let clamped = desc.clamp(value);
    if clamped != value {
        tracing::warn!(
            param = desc.string_id,
            requested = value,
            applied = clamped,
            "value out of range, clamped"
        );
    }
    params.set(index, value);
    Ok(())
}

fn parse_bool(s: &str) -> anyhow::Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        _ => anyhow::bail!("expected true/false, on/off, yes/no, or 1/0"),
    }
}

/// `20 * log10(linear)`, with silence reported as -120 dB.
pub fn to_dbfs(linear: f32) -> f32 {
    if linear <= 0.0 {
        -120.0
    } else {
        squash_core::linear_to_db(linear)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_val_parsing() {
        assert_eq!(
            parse_key_val("threshold=-24").unwrap(),
            ("threshold".to_string(), "-24".to_string())
        );
        assert_eq!(
            parse_key_val(" ratio = 4 ").unwrap(),
            ("ratio".to_string(), "4".to_string())
        );
        assert!(parse_key_val("ratio").is_err());
        assert!(parse_key_val("=4").is_err());
    }

    #[test]
    fn named_flags_then_overrides() {
        let args = ParamArgs {
            threshold: Some(-30.0),
            ratio: Some(50.0),
            param: vec![
                ("threshold".into(), "-12".into()),
                ("Makeup".into(), "6".into()),
                ("bypass".into(), "on".into()),
            ],
            ..Default::default()
        };
        let params = CompressorParams::new();
        args.apply(&params).unwrap();

        assert_eq!(params.threshold_db(), -12.0);
        assert_eq!(params.ratio(), 10.0);
        assert_eq!(params.makeup_db(), 6.0);
        assert!(params.is_bypassed());
    }

    #[test]
    fn unknown_parameter_rejected() {
        let args = ParamArgs {
            param: vec![("knee".into(), "6".into())],
            ..Default::default()
        };
        let err = args.apply(&CompressorParams::new()).unwrap_err();
        assert!(err.to_string().contains("Unknown parameter"));
    }

    #[test]
    fn non_numeric_and_non_finite_rejected() {
        let params = CompressorParams::new();
        let bad_number = ParamArgs {
            param: vec![("ratio".into(), "loud".into())],
            ..Default::default()
        };
        assert!(bad_number.apply(&params).is_err());

        let nan = ParamArgs {
            ratio: Some(f32::NAN),
            ..Default::default()
        };
        assert!(nan.apply(&params).is_err());
        assert_eq!(params.ratio(), 4.0);
    }

    #[test]
    fn silence_has_dbfs_floor() {
        assert_eq!(to_dbfs(0.0), -120.0);
        assert!(to_dbfs(1.0).abs() < 1e-6);
    }
}
