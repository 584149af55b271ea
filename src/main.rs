use anyhow::{Context, Result};
use calibration::{CalibrationCLIArgs, Equation, OperatorSet};
use clap::Parser;

fn main() -> Result<()> {
    let args = CalibrationCLIArgs::parse();
    let equations = calibration::read_equations(&args.input_path).with_context(|| {
        format!(
            "Failed to read equations from given file({}).",
            args.input_path.display()
        )
    })?;

    let operator_sets = [OperatorSet::AddMultiply, OperatorSet::AddMultiplyConcat];
    let totals = operator_sets
        .iter()
        .map(|set| calibration::calibration_total(&equations, *set))
        .collect::<Result<Vec<_>, _>>()?;

    if args.verbose {
        for equation in &equations {
            report(equation, &operator_sets);
        }
    }
    for (set, total) in operator_sets.iter().zip(totals) {
        println!(
            "The total calibration result using {} is {}.",
            set.description(),
            total
        );
    }

    Ok(())
}

fn report(equation: &Equation, operator_sets: &[OperatorSet]) {
    for set in operator_sets {
        match equation.solve(*set) {
            Some(operators) => println!(
                "[{}] {} holds with {}.",
                equation,
                equation.render(&operators),
                set.description()
            ),
            None => println!("[{}] can't hold with {}.", equation, set.description()),
        }
    }
}
