use assert_cmd::Command;
use predicates::prelude::{predicate::str, PredicateBooleanExt};

#[test]
fn calibration_outputs_both_totals() {
    let mut cmd = Command::cargo_bin("calibration").unwrap();
    cmd.arg("inputs.txt");

    cmd.assert().success().stdout(
        str::contains("The total calibration result using add and multiply is 3749.").and(
            str::contains(
                "The total calibration result using add, multiply and concatenate is 11387.",
            ),
        ),
    );
}

#[test]
fn calibration_outputs_zero_totals_for_empty_input() {
    let mut cmd = Command::cargo_bin("calibration").unwrap();
    cmd.arg("tests/data/empty.txt");

    cmd.assert().success().stdout(
        str::contains("add and multiply is 0.")
            .and(str::contains("add, multiply and concatenate is 0.")),
    );
}

#[test]
fn calibration_verbose_reports_operators() {
    let mut cmd = Command::cargo_bin("calibration").unwrap();
    cmd.arg("--verbose").arg("inputs.txt");

    cmd.assert().success().stdout(
        str::contains("[3267: 81 40 27] 3267 = 81 + 40 * 27 holds with add and multiply.")
            .and(str::contains(
                "[7290: 6 8 6 15] 7290 = 6 * 8 || 6 * 15 holds with add, multiply and concatenate.",
            ))
            .and(str::contains("[156: 15 6] can't hold with add and multiply."))
            .and(str::contains(
                "[83: 17 5] can't hold with add, multiply and concatenate.",
            )),
    );
}

#[test]
fn calibration_fails_on_missing_file() {
    let mut cmd = Command::cargo_bin("calibration").unwrap();
    cmd.arg("tests/data/no_such_file.txt");

    cmd.assert()
        .failure()
        .stdout(str::is_empty())
        .stderr(str::contains("Failed to open given file"));
}

#[test]
fn calibration_fails_on_line_without_colon() {
    let mut cmd = Command::cargo_bin("calibration").unwrap();
    cmd.arg("tests/data/no_colon.txt");

    cmd.assert().failure().stdout(str::is_empty()).stderr(
        str::contains("line 2(3267 81 40 27)").and(str::contains("Can't find separator(:)")),
    );
}

#[test]
fn calibration_fails_on_invalid_operand() {
    let mut cmd = Command::cargo_bin("calibration").unwrap();
    cmd.arg("tests/data/invalid_operand.txt");

    cmd.assert()
        .failure()
        .stdout(str::is_empty())
        .stderr(str::contains("Invalid operand text(forty)."));
}
