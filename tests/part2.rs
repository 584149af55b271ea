use assert_cmd::Command;
use predicates::prelude::predicate::str;

#[test]
fn part2_output_right_answer() {
    let mut cmd = Command::cargo_bin("part2").unwrap();
    cmd.arg("inputs.txt");

    cmd.assert().success().stdout(str::contains(
        "The total calibration result using add, multiply and concatenate is 11387.",
    ));
}

#[test]
fn part2_concatenates_zero_as_a_digit() {
    let mut cmd = Command::cargo_bin("part2").unwrap();
    cmd.arg("tests/data/zero_operands.txt");

    cmd.assert().success().stdout(str::contains("is 50."));
}

#[test]
fn part2_fails_on_negative_operand() {
    let mut cmd = Command::cargo_bin("part2").unwrap();
    cmd.arg("tests/data/negative_operand.txt");

    cmd.assert()
        .failure()
        .stdout(str::is_empty())
        .stderr(str::contains("Negative number(-19)"));
}
