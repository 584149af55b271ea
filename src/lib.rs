use std::{
    error,
    fmt::Display,
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Debug)]
pub enum Error {
    NoColonInEquation,
    InvalidTargetText(String),
    InvalidOperandText(String),
    NegativeNumber(i64),
    NoOperands,
    TotalOverflow,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::NoColonInEquation => write!(
                f,
                "Can't find separator(:) in equation text that separates the target and operands."
            ),
            Error::InvalidTargetText(s) => write!(f, "Invalid target text({}).", s),
            Error::InvalidOperandText(s) => write!(f, "Invalid operand text({}).", s),
            Error::NegativeNumber(n) => write!(
                f,
                "Negative number({}) in equation, expect non-negative target and operands.",
                n
            ),
            Error::NoOperands => write!(f, "Equation has no operand, expect at least one."),
            Error::TotalOverflow => write!(
                f,
                "The sum of calibration results overflows a 64-bit signed integer."
            ),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    #[arg(default_value = "inputs.txt")]
    pub input_path: PathBuf,
}

#[derive(Debug, Parser)]
pub struct CalibrationCLIArgs {
    #[arg(default_value = "inputs.txt")]
    pub input_path: PathBuf,
    /// Report every equation with the operators that satisfy it.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Multiply,
    Concatenate,
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operator::Add => write!(f, "+"),
            Operator::Multiply => write!(f, "*"),
            Operator::Concatenate => write!(f, "||"),
        }
    }
}

impl Operator {
    /// Returns `None` if the result doesn't fit in `i64`.
    pub fn apply(self, acc: i64, operand: i64) -> Option<i64> {
        match self {
            Operator::Add => acc.checked_add(operand),
            Operator::Multiply => acc.checked_mul(operand),
            Operator::Concatenate => concat(acc, operand),
        }
    }

    // `None` stands for an accumulator already beyond i64::MAX.
    fn apply_unbounded(self, acc: Option<i64>, operand: i64) -> Option<i64> {
        match (self, acc) {
            (Operator::Multiply, _) if operand == 0 => Some(0),
            (_, Some(acc)) => self.apply(acc, operand),
            (_, None) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorSet {
    AddMultiply,
    AddMultiplyConcat,
}

impl OperatorSet {
    pub fn operators(&self) -> &'static [Operator] {
        match self {
            OperatorSet::AddMultiply => &[Operator::Add, Operator::Multiply],
            OperatorSet::AddMultiplyConcat => {
                &[Operator::Add, Operator::Multiply, Operator::Concatenate]
            }
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            OperatorSet::AddMultiply => "add and multiply",
            OperatorSet::AddMultiplyConcat => "add, multiply and concatenate",
        }
    }
}

/// Number of decimal digits in `n`, counting `0` as one digit.
pub fn digit_count(n: i64) -> u32 {
    if n == 0 {
        1
    } else {
        n.unsigned_abs().ilog10() + 1
    }
}

/// Appends the decimal digits of `right` to those of `left`.
pub fn concat(left: i64, right: i64) -> Option<i64> {
    if left == 0 {
        return Some(right);
    }

    10i64
        .checked_pow(digit_count(right))?
        .checked_mul(left)?
        .checked_add(right)
}

#[derive(Debug, Clone)]
pub struct Equation {
    target: i64,
    operands: Vec<i64>,
}

impl TryFrom<&str> for Equation {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        let (target_text, operands_text) =
            value.split_once(':').ok_or(Error::NoColonInEquation)?;
        let target_text = target_text.trim();
        let target = target_text
            .parse::<i64>()
            .map_err(|_| Error::InvalidTargetText(target_text.to_string()))?;
        let operands = operands_text
            .split_ascii_whitespace()
            .map(|s| {
                s.parse::<i64>()
                    .map_err(|_| Error::InvalidOperandText(s.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(target, operands)
    }
}

impl Equation {
    pub fn new(target: i64, operands: Vec<i64>) -> Result<Self, Error> {
        if operands.is_empty() {
            return Err(Error::NoOperands);
        }
        if let Some(n) = std::iter::once(&target)
            .chain(operands.iter())
            .find(|n| **n < 0)
        {
            return Err(Error::NegativeNumber(*n));
        }

        Ok(Self { target, operands })
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    pub fn operands(&self) -> &[i64] {
        &self.operands
    }

    pub fn is_satisfiable(&self, operator_set: OperatorSet) -> bool {
        self.solve(operator_set).is_some()
    }

    /// Searches operator choices left to right, trying operators in the order
    /// given by `operator_set`, and returns the first sequence that evaluates
    /// to the target.
    pub fn solve(&self, operator_set: OperatorSet) -> Option<Vec<Operator>> {
        let operators = operator_set.operators();
        let (first, rest) = self.operands.split_first()?;
        // Multiplying by zero is the only way the accumulator can shrink, so an
        // accumulator above the target is only a dead end once no zero is left.
        let last_zero_ind = rest.iter().rposition(|n| *n == 0);
        let is_dead_end = |acc: Option<i64>, next_ind: usize| {
            acc.map_or(true, |acc| acc > self.target)
                && last_zero_ind.map_or(true, |zero_ind| zero_ind < next_ind)
        };

        // accs[d] is the accumulator after d operators, next_choices[d] the index
        // (into `operators`) of the next operator to try on rest[d].
        let mut accs = vec![Some(*first)];
        let mut next_choices = vec![0usize];
        while let Some(depth) = next_choices.len().checked_sub(1) {
            if depth == rest.len() {
                if accs[depth] == Some(self.target) {
                    return Some(
                        next_choices[..depth]
                            .iter()
                            .map(|choice| operators[choice - 1])
                            .collect(),
                    );
                }

                accs.pop();
                next_choices.pop();
                continue;
            }

            let choice = next_choices[depth];
            if choice == operators.len() {
                accs.pop();
                next_choices.pop();
                continue;
            }

            next_choices[depth] += 1;
            let acc = operators[choice].apply_unbounded(accs[depth], rest[depth]);
            if is_dead_end(acc, depth + 1) {
                continue;
            }

            accs.push(acc);
            next_choices.push(0);
        }

        None
    }

    pub fn render(&self, operators: &[Operator]) -> String {
        let mut text = format!("{} = {}", self.target, self.operands[0]);
        for (operator, operand) in operators.iter().zip(&self.operands[1..]) {
            text.push_str(&format!(" {} {}", operator, operand));
        }

        text
    }
}

impl Display for Equation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:", self.target)?;
        for operand in &self.operands {
            write!(f, " {}", operand)?;
        }

        Ok(())
    }
}

pub fn calibration_total(
    equations: &[Equation],
    operator_set: OperatorSet,
) -> std::result::Result<i64, Error> {
    equations
        .iter()
        .filter(|e| e.is_satisfiable(operator_set))
        .try_fold(0i64, |sum, e| {
            sum.checked_add(e.target()).ok_or(Error::TotalOverflow)
        })
}

pub fn read_equations<P: AsRef<Path>>(path: P) -> Result<Vec<Equation>> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open given file({}).", path.as_ref().display()))?;
    let reader = BufReader::new(file);
    reader
        .lines()
        .enumerate()
        .filter(|(_, l)| l.as_ref().map_or(true, |s| !s.trim().is_empty()))
        .map(|(ind, l)| {
            l.with_context(|| {
                format!(
                    "Failed to read line {} in given file({}).",
                    ind + 1,
                    path.as_ref().display()
                )
            })
            .and_then(|s| {
                Equation::try_from(s.as_str()).with_context(|| {
                    format!(
                        "Failed to parse equation from line {}({}) in given file({}).",
                        ind + 1,
                        s,
                        path.as_ref().display()
                    )
                })
            })
        })
        .collect()
}

#[cfg(test)]
fn equation(text: &str) -> Equation {
    Equation::try_from(text).unwrap()
}

#[test]
fn test_digit_count() {
    assert_eq!(digit_count(0), 1);
    assert_eq!(digit_count(7), 1);
    assert_eq!(digit_count(10), 2);
    assert_eq!(digit_count(99), 2);
    assert_eq!(digit_count(100), 3);
    assert_eq!(digit_count(i64::MAX), 19);
}

#[test]
fn test_concat() {
    assert_eq!(concat(12, 34), Some(1234));
    assert_eq!(concat(15, 6), Some(156));
    assert_eq!(concat(48, 6), Some(486));
    assert_eq!(concat(5, 0), Some(50));
    assert_eq!(concat(0, 5), Some(5));
    assert_eq!(concat(0, i64::MAX), Some(i64::MAX));
    assert_eq!(concat(i64::MAX, 1), None);
    assert_eq!(concat(1, i64::MAX), None);
}

#[test]
fn test_operator_never_shrinks_except_multiply_by_zero() {
    let values = [0, 1, 2, 9, 10, 37, 1000];
    for operator in OperatorSet::AddMultiplyConcat.operators() {
        for acc in values {
            for operand in values {
                if *operator == Operator::Multiply && operand == 0 {
                    continue;
                }
                let next = operator.apply(acc, operand).unwrap();
                assert!(next >= acc, "{} {} {} = {}", acc, operator, operand, next);
            }
        }
    }
}

#[test]
fn test_parse_equation() {
    let e = equation("3267: 81 40 27");
    assert_eq!(e.target(), 3267);
    assert_eq!(e.operands(), &[81, 40, 27]);

    let e = equation("  21037 :  9 7   18 13 ");
    assert_eq!(e.target(), 21037);
    assert_eq!(e.operands(), &[9, 7, 18, 13]);
    assert_eq!(e.to_string(), "21037: 9 7 18 13");
}

#[test]
fn test_parse_invalid_equation() {
    assert!(matches!(
        Equation::try_from("190 10 19"),
        Err(Error::NoColonInEquation)
    ));
    assert!(matches!(
        Equation::try_from("x: 10 19"),
        Err(Error::InvalidTargetText(s)) if s == "x"
    ));
    assert!(matches!(
        Equation::try_from("190: 10 1a9"),
        Err(Error::InvalidOperandText(s)) if s == "1a9"
    ));
    assert!(matches!(
        Equation::try_from("190: 10 -19"),
        Err(Error::NegativeNumber(-19))
    ));
    assert!(matches!(
        Equation::try_from("-190: 10 19"),
        Err(Error::NegativeNumber(-190))
    ));
    assert!(matches!(Equation::try_from("190:  "), Err(Error::NoOperands)));
    assert!(matches!(
        Equation::try_from("190: 10 99999999999999999999"),
        Err(Error::InvalidOperandText(_))
    ));
}

#[test]
fn test_single_operand() {
    assert!(equation("42: 42").is_satisfiable(OperatorSet::AddMultiply));
    assert!(equation("42: 42").is_satisfiable(OperatorSet::AddMultiplyConcat));
    assert!(!equation("42: 41").is_satisfiable(OperatorSet::AddMultiply));
    assert!(!equation("42: 43").is_satisfiable(OperatorSet::AddMultiplyConcat));
    assert_eq!(equation("0: 0").solve(OperatorSet::AddMultiply), Some(vec![]));
}

#[test]
fn test_sample_equations() {
    let cases = [
        ("190: 10 19", true, true),
        ("3267: 81 40 27", true, true),
        ("83: 17 5", false, false),
        ("156: 15 6", false, true),
        ("7290: 6 8 6 15", false, true),
        ("161011: 16 10 13", false, false),
        ("192: 17 8 14", false, true),
        ("21037: 9 7 18 13", false, false),
        ("292: 11 6 16 20", true, true),
    ];
    for (text, with_two, with_three) in cases {
        let e = equation(text);
        assert_eq!(e.is_satisfiable(OperatorSet::AddMultiply), with_two, "{}", text);
        assert_eq!(
            e.is_satisfiable(OperatorSet::AddMultiplyConcat),
            with_three,
            "{}",
            text
        );
    }
}

#[test]
fn test_solve_returns_first_operators_in_search_order() {
    use Operator::*;

    let e = equation("190: 10 19");
    assert_eq!(e.solve(OperatorSet::AddMultiply), Some(vec![Multiply]));

    let e = equation("3267: 81 40 27");
    let operators = e.solve(OperatorSet::AddMultiply).unwrap();
    assert_eq!(operators, vec![Add, Multiply]);
    assert_eq!(e.render(&operators), "3267 = 81 + 40 * 27");

    let e = equation("7290: 6 8 6 15");
    let operators = e.solve(OperatorSet::AddMultiplyConcat).unwrap();
    assert_eq!(operators, vec![Multiply, Concatenate, Multiply]);
    assert_eq!(e.render(&operators), "7290 = 6 * 8 || 6 * 15");

    assert_eq!(equation("83: 17 5").solve(OperatorSet::AddMultiplyConcat), None);
}

#[test]
fn test_operand_order_matters() {
    assert!(equation("25: 2 3 5").is_satisfiable(OperatorSet::AddMultiply));
    assert!(!equation("25: 5 3 2").is_satisfiable(OperatorSet::AddMultiply));
}

#[test]
fn test_concat_with_zero_operand() {
    assert!(!equation("50: 5 0").is_satisfiable(OperatorSet::AddMultiply));
    assert!(equation("50: 5 0").is_satisfiable(OperatorSet::AddMultiplyConcat));
    assert!(equation("5: 5 0 0").is_satisfiable(OperatorSet::AddMultiply));
    assert!(equation("500: 5 0 0").is_satisfiable(OperatorSet::AddMultiplyConcat));
}

#[test]
fn test_zero_operand_after_exceeding_target() {
    use Operator::*;

    let e = equation("0: 5 1 0");
    assert_eq!(e.solve(OperatorSet::AddMultiply), Some(vec![Add, Multiply]));
    let e = equation("3: 5 7 0 3");
    assert_eq!(
        e.solve(OperatorSet::AddMultiply),
        Some(vec![Add, Multiply, Add])
    );
}

#[test]
fn test_overflow_is_not_a_solution() {
    let max = i64::MAX;
    assert!(equation(&format!("{}: {} 1", max, max)).is_satisfiable(OperatorSet::AddMultiply));
    assert!(!equation(&format!("{}: {} 2", max, max)).is_satisfiable(OperatorSet::AddMultiply));
    assert!(!equation(&format!("{}: {} 2 3", max, max))
        .is_satisfiable(OperatorSet::AddMultiplyConcat));
    assert!(equation(&format!("0: {} 10 0", max)).is_satisfiable(OperatorSet::AddMultiply));
    assert!(equation(&format!("7: {} 10 0 7", max)).is_satisfiable(OperatorSet::AddMultiply));
}

#[test]
fn test_long_equation_does_not_recurse() {
    let mut text = String::from("1:");
    for _ in 0..100_000 {
        text.push_str(" 1");
    }
    assert!(equation(&text).is_satisfiable(OperatorSet::AddMultiply));
}

#[test]
fn test_concatenation_is_superset() {
    let texts = [
        "190: 10 19",
        "3267: 81 40 27",
        "83: 17 5",
        "156: 15 6",
        "292: 11 6 16 20",
        "0: 5 1 0",
        "25: 2 3 5",
        "1: 1 1 1 1",
    ];
    for text in texts {
        let e = equation(text);
        if e.is_satisfiable(OperatorSet::AddMultiply) {
            assert!(e.is_satisfiable(OperatorSet::AddMultiplyConcat), "{}", text);
        }
    }
}

#[test]
fn test_calibration_total() {
    let equations = [
        "190: 10 19",
        "3267: 81 40 27",
        "83: 17 5",
        "156: 15 6",
        "7290: 6 8 6 15",
        "161011: 16 10 13",
        "192: 17 8 14",
        "21037: 9 7 18 13",
        "292: 11 6 16 20",
    ]
    .into_iter()
    .map(equation)
    .collect::<Vec<_>>();
    assert_eq!(
        calibration_total(&equations, OperatorSet::AddMultiply).unwrap(),
        3749
    );
    assert_eq!(
        calibration_total(&equations, OperatorSet::AddMultiplyConcat).unwrap(),
        11387
    );
    assert_eq!(calibration_total(&[], OperatorSet::AddMultiply).unwrap(), 0);
    assert_eq!(
        calibration_total(&[], OperatorSet::AddMultiplyConcat).unwrap(),
        0
    );
}

#[test]
fn test_calibration_total_overflow() {
    let max = i64::MAX;
    let equations = vec![equation(&format!("{}: {}", max, max)), equation("1: 1")];
    assert!(matches!(
        calibration_total(&equations, OperatorSet::AddMultiply),
        Err(Error::TotalOverflow)
    ));
}
