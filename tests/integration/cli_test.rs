use crate::support::{FakeVerifier, assert_success, run, stderr, stdout};

#[test]
fn test_banner_is_printed() {
    let verifier = FakeVerifier::with_threshold(3);
    let output = run(&verifier, &["1", "5", "--method=binary", "-j", "1"]);

    assert_success(&output);
    let stdout = stdout(&output);
    assert!(stdout.contains("*** ESBMC Parallel Runner v"));
    assert!(stdout.contains("Date of run: "));
    assert!(stdout.contains("File: oracle.sh"));
    assert!(stdout.contains("Order: Asc"));
    assert!(stdout.contains("RUNNING:"));
}

#[test]
fn test_invalid_method_is_rejected() {
    let verifier = FakeVerifier::with_threshold(3);
    let output = run(&verifier, &["1", "5", "--method=linear"]);

    assert!(!output.status.success());
    assert!(
        stderr(&output).contains("invalid method"),
        "unexpected stderr:\n{}",
        stderr(&output)
    );
    assert!(!stdout(&output).contains("RUNNING:"));
}

#[test]
fn test_invalid_order_is_rejected() {
    let verifier = FakeVerifier::with_threshold(3);
    let output = run(&verifier, &["1", "5", "--method=binary", "--order=up"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("invalid order"));
}

#[test]
fn test_inverted_range_is_rejected() {
    let verifier = FakeVerifier::with_threshold(3);
    let output = run(&verifier, &["10", "1", "--method=binary"]);

    assert!(!output.status.success());
    assert!(
        stderr(&output).contains("hmin (10) is greater than hmax (1)"),
        "unexpected stderr:\n{}",
        stderr(&output)
    );
    assert!(!stdout(&output).contains("RUNNING:"));
}

#[test]
fn test_missing_arguments_print_usage() {
    let output = std::process::Command::new(crate::support::get_binary_path())
        .output()
        .expect("failed to execute esbmc-parallel");

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Usage"));
}
