//! Parameter listing command.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use clap::Args;
use squash_core::{CompressorParams, ParamScale};

#[derive(Args)]
pub struct ParamsArgs {
    /// Show details for a single parameter (name, short name, or ID)
    #[arg(value_name = "PARAM")]
    param: Option<String>,
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    if let Some(name) = &args.param {
        let desc = CompressorParams::index_by_name(name)
            .and_then(CompressorParams::descriptor)
            .ok_or_else(|| anyhow::anyhow!("Unknown parameter: {}", name))?;

        println!("{}", desc.name);
        println!("{}", "=".repeat(desc.name.len()));
        println!();
        println!("  ID:         {} ({})", desc.string_id, desc.id.0);
        println!("  Short name: {}", desc.short_name);
        println!(
            "  Range:      {} to {}",
            desc.display(desc.min),
            desc.display(desc.max)
        );
        println!(
            "  Default:    {} ({:.0}% of range)",
            desc.display(desc.default),
            desc.normalize(desc.default) * 100.0
        );
        println!("  Step:       {}", desc.step);
        let scale = match desc.scale {
            ParamScale::Linear => "linear",
            ParamScale::Logarithmic => "logarithmic",
        };
        println!("  Scale:      {scale}");
        println!();
        println!("Example usage:");
        println!();
        println!(
            "  squash process input.wav output.wav --param {}={}",
            desc.string_id, desc.default
        );
        return Ok(());
    }

    println!("Compressor Parameters");
    println!("=====================");
    println!();
    println!(
        "  {:10}  {:12}  {:22}  {}",
        "ID", "Name", "Range", "Default"
    );
    println!(
        "  {:10}  {:12}  {:22}  {}",
        "--", "----", "-----", "-------"
    );
    for desc in CompressorParams::descriptors() {
        let range = format!("{} to {}", desc.display(desc.min), desc.display(desc.max));
        println!(
            "  {:10}  {:12}  {:22}  {}",
            desc.string_id,
            desc.name,
            range,
            desc.display(desc.default)
        );
    }
    println!("  {:10}  {:12}  {:22}  {}", "bypass", "Bypass", "on/off", "off");
    println!();
    println!("Use 'squash params <name>' for details.");

    Ok(())
}
