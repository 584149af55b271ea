use anyhow::{Context, Result};
use calibration::{CLIArgs, OperatorSet};
use clap::Parser;

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    let equations = calibration::read_equations(&args.input_path).with_context(|| {
        format!(
            "Failed to read equations from given file({}).",
            args.input_path.display()
        )
    })?;

    let operator_set = OperatorSet::AddMultiplyConcat;
    let total = calibration::calibration_total(&equations, operator_set)?;
    println!(
        "The total calibration result using {} is {}.",
        operator_set.description(),
        total
    );

    Ok(())
}
