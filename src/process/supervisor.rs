//! Spawning and supervising oracle processes.
//!
//! Every oracle runs as the leader of its own process group, so a kill
//! reaches any helper processes it started. Combined stdout and stderr are
//! pumped into a channel by a reader thread; callers poll that channel with
//! a bounded timeout and can check for cancellation between polls.

use crate::error::SpawnError;
use crate::oracle::OracleCommand;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};
use nix::errno::Errno;
use nix::sys::signal::{Signal, killpg};
use nix::unistd::Pid;
use std::io::{self, Read};
use std::os::unix::process::CommandExt;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

const READ_BUFFER_SIZE: usize = 4096;
/// Non-blocking reap attempts after a group kill.
const REAP_ATTEMPTS: u32 = 50;
const REAP_BACKOFF: Duration = Duration::from_millis(20);

/// Result of one poll of a running process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollStatus {
    /// Output arrived within the timeout.
    Output(Vec<u8>),
    /// Nothing arrived within the timeout.
    Idle,
    /// Every writer of the output pipe has closed it.
    Eof,
}

/// Starts oracle commands in their own process groups.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessSupervisor;

impl ProcessSupervisor {
    pub fn new() -> Self {
        Self
    }

    /// Spawn `command` with stdout and stderr merged into one stream.
    pub fn spawn(&self, command: &OracleCommand) -> Result<ProbeProcess, SpawnError> {
        let (reader, writer) = io::pipe().map_err(SpawnError::Pipe)?;
        let stderr_writer = writer.try_clone().map_err(SpawnError::Pipe)?;

        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .stdin(Stdio::null())
            .stdout(writer)
            .stderr(stderr_writer)
            .process_group(0);

        let child = cmd.spawn().map_err(|source| SpawnError::Exec {
            program: command.program.display().to_string(),
            source,
        })?;
        // The command holds the parent's copies of the write end; EOF only
        // arrives once they are closed.
        drop(cmd);

        let group = Pid::from_raw(child.id() as i32);
        let (tx, rx) = unbounded();
        thread::spawn(move || pump_output(reader, tx));

        debug!(pid = child.id(), command = %command, "spawned oracle");

        Ok(ProbeProcess {
            child,
            group,
            output: rx,
            reaped: false,
        })
    }
}

/// Copy everything from `reader` into `tx` until EOF or the receiver goes away.
fn pump_output(mut reader: impl Read, tx: Sender<Vec<u8>>) {
    let mut buffer = [0u8; READ_BUFFER_SIZE];
    loop {
        match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => {
                if tx.send(buffer[..n].to_vec()).is_err() {
                    break;
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(_) => break,
        }
    }
}

/// Handle to a running oracle process group.
#[derive(Debug)]
pub struct ProbeProcess {
    child: Child,
    group: Pid,
    output: Receiver<Vec<u8>>,
    reaped: bool,
}

impl ProbeProcess {
    /// Process id of the group leader.
    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Wait up to `timeout` for the next piece of output.
    pub fn poll_output(&mut self, timeout: Duration) -> PollStatus {
        match self.output.recv_timeout(timeout) {
            Ok(chunk) => PollStatus::Output(chunk),
            Err(RecvTimeoutError::Timeout) => PollStatus::Idle,
            Err(RecvTimeoutError::Disconnected) => PollStatus::Eof,
        }
    }

    /// Reap the group leader after its output reached EOF.
    pub fn wait(&mut self) -> io::Result<ExitStatus> {
        let status = self.child.wait()?;
        self.reaped = true;
        Ok(status)
    }

    /// Kill the whole process group and reap the leader.
    ///
    /// Reaping is non-blocking and retried a bounded number of times.
    /// Returns whether the leader was reaped.
    pub fn terminate(&mut self) -> bool {
        if self.reaped {
            return true;
        }

        match killpg(self.group, Signal::SIGKILL) {
            Ok(()) | Err(Errno::ESRCH) => {}
            Err(e) => warn!(pid = self.id(), error = %e, "failed to kill process group"),
        }

        for _ in 0..REAP_ATTEMPTS {
            match self.child.try_wait() {
                Ok(Some(_)) => {
                    self.reaped = true;
                    return true;
                }
                Ok(None) => thread::sleep(REAP_BACKOFF),
                Err(e) => {
                    warn!(pid = self.id(), error = %e, "failed to reap oracle");
                    return false;
                }
            }
        }

        warn!(pid = self.id(), "oracle did not exit after SIGKILL; giving up");
        false
    }
}

impl Drop for ProbeProcess {
    fn drop(&mut self) {
        if !self.reaped {
            self.terminate();
        }
    }
}
