//! Command lines for oracle invocations.
//!
//! The shape of a probe command is fixed by existing verifier binaries:
//!
//! ```text
//! <executable> <filename> <fixed-options> -D<param-name>=<step>
//! ```

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// Executable used when none is configured.
pub const DEFAULT_EXECUTABLE: &str = "./esbmc";
/// Fixed options passed to every probe.
pub const DEFAULT_OPTIONS: [&str; 2] = ["--boolector", "--quiet"];
/// Name of the preprocessor define that carries the step value.
pub const DEFAULT_PARAM_NAME: &str = "valordeh";

/// A fully resolved program and argument list, ready to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleCommand {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl OracleCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for OracleCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// How to invoke the oracle for a given step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleInvocation {
    /// Verifier executable.
    pub executable: PathBuf,
    /// Source file handed to the verifier.
    pub filename: PathBuf,
    /// Options placed between the filename and the parameter define.
    pub options: Vec<String>,
    /// Define name; the step is passed as `-D<param_name>=<step>`.
    pub param_name: String,
}

impl Default for OracleInvocation {
    fn default() -> Self {
        Self {
            executable: PathBuf::from(DEFAULT_EXECUTABLE),
            filename: PathBuf::new(),
            options: DEFAULT_OPTIONS.iter().map(|s| s.to_string()).collect(),
            param_name: DEFAULT_PARAM_NAME.to_string(),
        }
    }
}

impl OracleInvocation {
    pub fn with_executable(mut self, executable: impl Into<PathBuf>) -> Self {
        self.executable = executable.into();
        self
    }

    pub fn with_filename(mut self, filename: impl Into<PathBuf>) -> Self {
        self.filename = filename.into();
        self
    }

    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = options;
        self
    }

    pub fn with_param_name(mut self, param_name: impl Into<String>) -> Self {
        self.param_name = param_name.into();
        self
    }

    pub fn filename(&self) -> &Path {
        &self.filename
    }

    /// Build the probe command for `step`.
    pub fn command_for(&self, step: i64) -> OracleCommand {
        OracleCommand::new(&self.executable)
            .arg(self.filename.as_os_str())
            .args(&self.options)
            .arg(format!("-D{}={}", self.param_name, step))
    }

    /// Build the `--version` query used for the run banner.
    pub fn version_command(&self) -> OracleCommand {
        OracleCommand::new(&self.executable).arg("--version")
    }
}
