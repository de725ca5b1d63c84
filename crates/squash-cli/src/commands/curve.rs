//! Static transfer curve command.

use clap::Args;
use squash_core::{CompressorParams, GainComputer};

use super::common::ParamArgs;

#[derive(Args)]
pub struct CurveArgs {
    #[command(flatten)]
    params: ParamArgs,

    /// Lowest input level in dB
    #[arg(long, default_value = "-60.0", allow_hyphen_values = true)]
    from: f32,

    /// Highest input level in dB
    #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
    to: f32,

    /// Step between rows in dB
    #[arg(long, default_value = "6.0")]
    step: f32,
}

pub fn run(args: CurveArgs) -> anyhow::Result<()> {
    if args.step.is_nan() || args.step <= 0.0 {
        anyhow::bail!("--step must be positive, got {}", args.step);
    }
    if !args.from.is_finite() || !args.to.is_finite() || args.to < args.from {
        anyhow::bail!(
            "--from ({}) and --to ({}) must be finite with --to >= --from",
            args.from,
            args.to
        );
    }

    let params = CompressorParams::new();
    args.params.apply(&params)?;
    let computer = GainComputer::new(params.threshold_db(), params.ratio());
    let makeup = params.makeup_db();

    println!(
        "Threshold {:.1} dB, ratio {:.1}:1, makeup {:.1} dB",
        computer.threshold_db, computer.ratio, makeup
    );
    println!();
    println!("  {:>10}  {:>10}  {:>10}", "Input dB", "Output dB", "Gain dB");
    println!("  {:>10}  {:>10}  {:>10}", "--------", "---------", "-------");

    let rows = ((args.to - args.from) / args.step).floor() as usize;
    for i in 0..=rows {
        let input = args.from + i as f32 * args.step;
        let reduction = computer.reduction_db(input);
        let output = input + reduction + makeup;
        println!(
            "  {:>10.1}  {:>10.1}  {:>10.1}",
            input,
            output,
            reduction + makeup
        );
    }

    Ok(())
}
