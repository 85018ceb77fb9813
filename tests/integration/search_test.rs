use crate::support::{FakeVerifier, assert_success, run, stdout};

#[test]
fn test_binary_finds_boundary() {
    let verifier = FakeVerifier::with_threshold(42);
    let output = run(&verifier, &["0", "100", "--method=binary", "-j", "4"]);

    assert_success(&output);
    let stdout = stdout(&output);
    assert!(
        stdout.contains("The best solution is: 42 in"),
        "unexpected output:\n{}",
        stdout
    );
    assert!(stdout.contains("Method: binary"));
}

#[test]
fn test_sequential_opt_ascending() {
    let verifier = FakeVerifier::with_threshold(7);
    let output = run(&verifier, &["1", "60", "--method=sequential_opt", "-j", "3"]);

    assert_success(&output);
    assert!(stdout(&output).contains("The best solution is: 7 in"));
}

#[test]
fn test_sequential_opt_descending() {
    let verifier = FakeVerifier::with_threshold(42);
    let output = run(
        &verifier,
        &["30", "50", "--method=sequential_opt", "--order=desc", "-j", "2"],
    );

    assert_success(&output);
    assert!(stdout(&output).contains("The best solution is: 42 in"));
}

#[test]
fn test_sequential_batches() {
    let verifier = FakeVerifier::with_threshold(10);
    let output = run(&verifier, &["1", "40", "--method=sequential", "-j", "4"]);

    assert_success(&output);
    let stdout = stdout(&output);
    assert!(stdout.contains("The best solution is: 10 in"));
    // Batches (1,4), (5,8), (9,12)
    assert!(stdout.contains("Batches: 3"), "unexpected output:\n{}", stdout);
}

#[test]
fn test_no_solution() {
    let verifier = FakeVerifier::with_threshold(1000);
    let output = run(&verifier, &["1", "20", "--method=binary", "-j", "2"]);

    assert_success(&output);
    assert!(stdout(&output).contains("No solution found :("));
}

#[test]
fn test_missing_verifier_is_not_a_solution() {
    let verifier = FakeVerifier::with_threshold(1);
    let output = std::process::Command::new(crate::support::get_binary_path())
        .arg(verifier.script())
        .args(["1", "8", "--method=sequential_opt", "-j", "2"])
        .args(["--executable", "/nonexistent/esbmc"])
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to execute esbmc-parallel");

    assert_success(&output);
    let stdout = stdout(&output);
    assert!(stdout.contains("No solution found :("));
    assert!(stdout.contains("Probes inconclusive: 8"), "unexpected output:\n{}", stdout);
    assert!(stdout.contains("Tool: ESBMC unknown"));
}
