//! Run banner printed before the search starts.

use crate::oracle::{OracleCommand, OracleInvocation};
use crate::process::{PollStatus, ProcessSupervisor};
use crate::search::config::SearchConfig;
use std::fmt;
use std::fs;
use std::time::{Duration, Instant};
use tracing::debug;

const UNKNOWN: &str = "unknown";
/// Upper bound on how long the `--version` query may take.
const VERSION_TIMEOUT: Duration = Duration::from_secs(5);
const VERSION_POLL: Duration = Duration::from_millis(100);

/// Host CPU and memory, as reported by procfs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hardware {
    pub model: String,
    pub cores: usize,
    pub mem_total: String,
}

impl Hardware {
    /// Read `/proc/cpuinfo` and `/proc/meminfo`; `None` when either is missing.
    pub fn detect() -> Option<Self> {
        let cpuinfo = fs::read_to_string("/proc/cpuinfo").ok()?;
        let meminfo = fs::read_to_string("/proc/meminfo").ok()?;
        Some(Self::from_procfs(&cpuinfo, &meminfo))
    }

    pub fn from_procfs(cpuinfo: &str, meminfo: &str) -> Self {
        let (model, cores) = parse_cpuinfo(cpuinfo);
        Self {
            model: model.unwrap_or_else(|| UNKNOWN.to_string()),
            cores,
            mem_total: parse_mem_total(meminfo).unwrap_or_else(|| UNKNOWN.to_string()),
        }
    }
}

impl fmt::Display for Hardware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CPU: {} ({} core(s)) ~ RAM: {}",
            self.model, self.cores, self.mem_total
        )
    }
}

/// Last `model name` value and the number of `processor` entries.
fn parse_cpuinfo(cpuinfo: &str) -> (Option<String>, usize) {
    let mut model = None;
    let mut cores = 0;
    for line in cpuinfo.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        match key.trim() {
            "model name" => model = Some(value.trim().to_string()),
            "processor" => cores += 1,
            _ => {}
        }
    }
    (model, cores)
}

/// Value of the `MemTotal` entry, e.g. `16318524 kB`.
fn parse_mem_total(meminfo: &str) -> Option<String> {
    meminfo
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(key, _)| key.trim() == "MemTotal")
        .map(|(_, value)| value.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// First line of `<executable> --version`, or `None` if it cannot be run.
pub fn oracle_version(invocation: &OracleInvocation) -> Option<String> {
    query_version(&invocation.version_command())
}

fn query_version(command: &OracleCommand) -> Option<String> {
    let mut process = match ProcessSupervisor::new().spawn(command) {
        Ok(process) => process,
        Err(e) => {
            debug!(error = %e, "oracle version query failed");
            return None;
        }
    };

    let deadline = Instant::now() + VERSION_TIMEOUT;
    let mut output = Vec::new();
    loop {
        match process.poll_output(VERSION_POLL) {
            PollStatus::Output(chunk) => output.extend_from_slice(&chunk),
            PollStatus::Idle => {}
            PollStatus::Eof => break,
        }
        if Instant::now() >= deadline {
            process.terminate();
            return None;
        }
    }
    let _ = process.wait();

    first_line(&output)
}

fn first_line(output: &[u8]) -> Option<String> {
    String::from_utf8_lossy(output)
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

/// Everything shown before the search starts.
#[derive(Debug, Clone)]
pub struct Banner {
    pub oracle_version: Option<String>,
    pub date: String,
    pub hardware: Option<Hardware>,
    pub file: String,
    pub method: String,
    pub order: String,
}

impl Banner {
    /// Gather the banner for a run of `config`.
    pub fn collect(config: &SearchConfig) -> Self {
        let file = config
            .invocation
            .filename()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| config.invocation.filename().display().to_string());

        Self {
            oracle_version: oracle_version(&config.invocation),
            date: chrono::Local::now()
                .format("%a %b %e %H:%M:%S %Y")
                .to_string(),
            hardware: Hardware::detect(),
            file,
            method: config.method.to_string(),
            order: config.order.to_string(),
        }
    }
}

impl fmt::Display for Banner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "*** ESBMC Parallel Runner v{} ***",
            env!("CARGO_PKG_VERSION")
        )?;
        writeln!(
            f,
            "Tool: ESBMC {}",
            self.oracle_version.as_deref().unwrap_or(UNKNOWN)
        )?;
        writeln!(f, "Date of run: {}", self.date)?;
        match &self.hardware {
            Some(hardware) => writeln!(f, "Hardware: {}", hardware)?,
            None => writeln!(f, "Hardware: {}", UNKNOWN)?,
        }
        writeln!(f)?;
        writeln!(f, "File: {}", self.file)?;
        writeln!(f, "Method: {}", self.method)?;
        write!(f, "Order: {}", self.order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::config::{Method, Order};
    use std::fs;

    const CPUINFO: &str = "\
processor\t: 0
model name\t: Intel(R) Xeon(R) CPU E5-2620 v4 @ 2.10GHz
cache size\t: 20480 KB

processor\t: 1
model name\t: Intel(R) Xeon(R) CPU E5-2620 v4 @ 2.10GHz
cache size\t: 20480 KB
";

    const MEMINFO: &str = "\
MemTotal:       16318524 kB
MemFree:         1203412 kB
";

    #[test]
    fn test_parse_cpuinfo() {
        let (model, cores) = parse_cpuinfo(CPUINFO);
        assert_eq!(
            model.as_deref(),
            Some("Intel(R) Xeon(R) CPU E5-2620 v4 @ 2.10GHz")
        );
        assert_eq!(cores, 2);
    }

    #[test]
    fn test_parse_mem_total() {
        assert_eq!(parse_mem_total(MEMINFO).as_deref(), Some("16318524 kB"));
        assert_eq!(parse_mem_total("MemFree: 1 kB\n"), None);
    }

    #[test]
    fn test_hardware_line() {
        let hardware = Hardware::from_procfs(CPUINFO, MEMINFO);
        assert_eq!(
            hardware.to_string(),
            "CPU: Intel(R) Xeon(R) CPU E5-2620 v4 @ 2.10GHz (2 core(s)) ~ RAM: 16318524 kB"
        );
    }

    #[test]
    fn test_hardware_without_model_name() {
        let hardware = Hardware::from_procfs("processor\t: 0\n", "");
        assert_eq!(hardware.model, "unknown");
        assert_eq!(hardware.cores, 1);
        assert_eq!(hardware.mem_total, "unknown");
    }

    #[test]
    fn test_first_line_skips_blank_lines() {
        assert_eq!(
            first_line(b"\nESBMC version 7.4.0 64-bit\nmore\n").as_deref(),
            Some("ESBMC version 7.4.0 64-bit")
        );
        assert_eq!(first_line(b""), None);
    }

    #[test]
    fn test_oracle_version_missing_executable() {
        let invocation =
            OracleInvocation::default().with_executable("/nonexistent/esbmc-parallel-test");
        assert_eq!(oracle_version(&invocation), None);
    }

    #[test]
    fn test_oracle_version_reads_first_line() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("version.sh");
        fs::write(&script, "echo 'ESBMC version 7.4.0'\necho extra\n").unwrap();

        let command = OracleCommand::new("sh").arg(&script).arg("--version");

        assert_eq!(
            query_version(&command).as_deref(),
            Some("ESBMC version 7.4.0")
        );
    }

    #[test]
    fn test_banner_layout() {
        let banner = Banner {
            oracle_version: None,
            date: "Mon Oct 19 10:00:00 2026".to_string(),
            hardware: Some(Hardware::from_procfs(CPUINFO, MEMINFO)),
            file: "prog.c".to_string(),
            method: Method::SequentialOpt.to_string(),
            order: Order::Descending.to_string(),
        };
        let text = banner.to_string();

        assert!(text.starts_with("*** ESBMC Parallel Runner v"));
        assert!(text.contains("Tool: ESBMC unknown\n"));
        assert!(text.contains("Date of run: Mon Oct 19 10:00:00 2026\n"));
        assert!(text.contains("~ RAM: 16318524 kB\n"));
        assert!(text.contains("Method: sequential_opt\n"));
        assert!(text.ends_with("Order: Desc"));
    }

    #[test]
    fn test_collect_uses_file_basename() {
        let config = SearchConfig::default()
            .with_invocation(
                OracleInvocation::default()
                    .with_executable("/nonexistent/esbmc-parallel-test")
                    .with_filename("/tmp/bench/prog.c"),
            )
            .with_method(Method::Binary);

        let banner = Banner::collect(&config);

        assert_eq!(banner.file, "prog.c");
        assert_eq!(banner.method, "binary");
        assert_eq!(banner.oracle_version, None);
    }
}
