use assert_cmd::cargo::CommandCargoExt;
use std::process::{Command, Output};
use vaddr_tools::ALLOW_OVERFLOW;

fn command(bin: &str) -> Command {
    let mut command = Command::cargo_bin(bin).unwrap();
    command.env_remove(ALLOW_OVERFLOW);
    command
}

fn run(bin: &str, args: &[&str]) -> Output {
    let mut command = command(bin);
    command.args(args);
    command.output().unwrap()
}

fn stdout(output: &Output) -> &str {
    std::str::from_utf8(&output.stdout).unwrap()
}

fn stderr(output: &Output) -> &str {
    std::str::from_utf8(&output.stderr).unwrap()
}

#[test]
fn getva_prints_address() {
    for (args, expected) in [
        (["0", "0", "0", "0"], "0xffffff8000000000\n"),
        (["511", "511", "511", "fff"], "0xffffffffffffffff\n"),
        (["1", "2", "3", "0x4"], "0xffffff8040403004\n"),
        (["256", "0", "0", "abc"], "0xffffffc000000abc\n"),
    ] {
        let output = run("getva", &args);
        assert!(output.status.success(), "{}", stderr(&output));
        assert_eq!(stdout(&output), expected);
    }
}

#[test]
fn getva_offset_is_hexadecimal() {
    let output = run("getva", &["0", "0", "0", "10"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "0xffffff8000000010\n");
}

#[test]
fn getva_rejects_wrong_argument_count() {
    for args in [&[][..], &["1"], &["1", "2", "3"], &["1", "2", "3", "4", "5"]] {
        let output = run("getva", args);
        assert!(!output.status.success());
        assert!(stdout(&output).is_empty());
        assert!(stderr(&output).contains("Usage:"), "{}", stderr(&output));
    }
}

#[test]
fn getva_rejects_non_numeric_arguments() {
    for args in [["x", "0", "0", "0"], ["0", "0", "0", "xyz"], ["0", "0", "0x1", "0"]] {
        let output = run("getva", &args);
        assert!(!output.status.success());
        assert!(stderr(&output).contains("invalid"), "{}", stderr(&output));
    }
}

#[test]
fn getva_rejects_negative_arguments() {
    for args in [["-1", "0", "0", "0"], ["0", "0", "0", "-fff"], ["0", "0", "0", "-1"]] {
        let output = run("getva", &args);
        assert!(!output.status.success());
        assert!(
            stderr(&output).contains("invalid input: negative value"),
            "{}",
            stderr(&output)
        );
    }
}

#[test]
fn getva_rejects_out_of_range_by_default() {
    let output = run("getva", &["512", "0", "0", "0"]);
    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(
        stderr(&output).contains("level-1 index 512 is out of range"),
        "{}",
        stderr(&output)
    );
}

#[test]
fn getva_allow_overflow_flag() {
    let output = run("getva", &["--allow-overflow", "512", "0", "0", "0"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "0x1ffffff8000000000\n");
    assert!(stderr(&output).contains("wider than 64 bits"), "{}", stderr(&output));
}

#[test]
fn getva_allow_overflow_env() {
    let mut command = command("getva");
    command.env(ALLOW_OVERFLOW, "1");
    command.args(["0", "0", "0", "1000"]);
    let output = command.output().unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "0x1ffffff0000001000\n");
}

#[test]
fn getva_allow_overflow_past_64_bit_fields() {
    let output = run(
        "getva",
        &["--allow-overflow", "0", "0", "0", "10000000000000000"],
    );
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "0x1ffffff00000010000000000000000\n");

    let output = run("getva", &["0", "0", "0", "10000000000000000"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("out of range"), "{}", stderr(&output));
}

#[test]
fn getva_debug_logs_to_stderr() {
    let output = run("getva", &["--debug", "0", "0", "0", "0"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "0xffffff8000000000\n");
    assert!(stderr(&output).contains("assembled address"), "{}", stderr(&output));
}

#[test]
fn getva_is_quiet_without_debug() {
    let output = run("getva", &["1", "1", "1", "1"]);
    assert!(output.status.success());
    assert!(stderr(&output).is_empty(), "{}", stderr(&output));
}

#[test]
fn bits_print() {
    let output = run("bits", &["print", "37"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "0 1\n1 0\n2 1\n3 0\n4 0\n5 1\n");

    let output = run("bits", &["print", "0x8"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "0 0\n1 0\n2 0\n3 1\n");

    let output = run("bits", &["print", "0x10000000000000000"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let listing = stdout(&output);
    assert_eq!(listing.lines().count(), 65);
    assert_eq!(listing.lines().last(), Some("64 1"));

    let output = run("bits", &["print", "0"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "0 0\n");
}

#[test]
fn bits_set() {
    for (args, expected) in [
        (&["set"][..], "0 (0x0)\n"),
        (&["set", "0", "2", "5"], "37 (0x25)\n"),
        (&["set", "3", "3", "3"], "8 (0x8)\n"),
        (&["set", "63"], "9223372036854775808 (0x8000000000000000)\n"),
        (&["set", "64"], "18446744073709551616 (0x10000000000000000)\n"),
        (&["set", "100", "0"], "1267650600228229401496703205377 (0x10000000000000000000000001)\n"),
    ] {
        let output = run("bits", args);
        assert!(output.status.success(), "{}", stderr(&output));
        assert_eq!(stdout(&output), expected);
    }
}

#[test]
fn bits_set_rejects_bad_positions() {
    for args in [["set", "-1"], ["set", "x"], ["set", "18446744073709551616"]] {
        let output = run("bits", &args);
        assert!(!output.status.success());
        assert!(stdout(&output).is_empty());
    }
}

#[test]
fn bits_requires_subcommand() {
    let output = run("bits", &[]);
    assert!(!output.status.success());
}
