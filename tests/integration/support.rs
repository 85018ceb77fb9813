use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub fn get_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_esbmc-parallel"))
}

/// Directory holding a fake verifier that reports a violation for every
/// `-Dvalordeh=<n>` with `n >= threshold`.
pub struct FakeVerifier {
    dir: TempDir,
}

impl FakeVerifier {
    pub fn with_threshold(threshold: i64) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let script = format!(
            r#"step=""
for arg in "$@"; do
    case "$arg" in
        -Dvalordeh=*) step="${{arg#*=}}" ;;
    esac
done
if [ -z "$step" ]; then
    echo "missing parameter" >&2
    exit 2
fi
if [ "$step" -ge {threshold} ]; then
    echo "VERIFICATION FAILED"
else
    echo "VERIFICATION SUCCESSFUL"
fi
"#
        );
        fs::write(dir.path().join("oracle.sh"), script).expect("failed to write fake verifier");
        Self { dir }
    }

    pub fn script(&self) -> PathBuf {
        self.dir.path().join("oracle.sh")
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// Run the binary against `verifier` (as `sh <script> ...`) with extra flags.
pub fn run(verifier: &FakeVerifier, args: &[&str]) -> Output {
    Command::new(get_binary_path())
        .arg(verifier.script())
        .args(args)
        .args(["--executable", "sh", "--poll-ms", "20"])
        .env("RUST_LOG", "warn")
        .current_dir(verifier.path())
        .output()
        .expect("failed to execute esbmc-parallel")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

pub fn assert_success(output: &Output) {
    if !output.status.success() {
        panic!(
            "Command failed with status: {:?}\nstderr: {}\nstdout: {}",
            output.status,
            stderr(output),
            stdout(output)
        );
    }
}
