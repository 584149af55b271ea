use assert_cmd::Command;
use predicates::prelude::predicate::str;

#[test]
fn part1_output_right_answer() {
    let mut cmd = Command::cargo_bin("part1").unwrap();
    cmd.arg("inputs.txt");

    cmd.assert().success().stdout(str::contains(
        "The total calibration result using add and multiply is 3749.",
    ));
}

#[test]
fn part1_reads_inputs_txt_by_default() {
    let mut cmd = Command::cargo_bin("part1").unwrap();

    cmd.assert().success().stdout(str::contains("is 3749."));
}

#[test]
fn part1_skips_blank_lines() {
    let mut cmd = Command::cargo_bin("part1").unwrap();
    cmd.arg("tests/data/blank_lines.txt");

    cmd.assert().success().stdout(str::contains("is 3457."));
}
