//! External commandlet execution with deadline and bounded output capture
//!
//! A commandlet is a long-running batch invocation of the host application
//! (compile the workspace, run the script test suite). The runner's whole
//! contract is one call in, one [`CommandletResult`] out: spawn failures,
//! timeouts and non-zero exits all resolve to a returned result, never to
//! an error or a panic.

mod capture;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use scriptforge_core::types::CommandletResult;

use capture::{drain, CappedBuffer};

/// Per-stream capture ceiling. Commandlets can emit unbounded diagnostics;
/// a runaway child must not be able to exhaust the host's memory.
pub const MAX_CAPTURE_BYTES: usize = 1024 * 1024;

/// In-band sentinel appended to a stream exactly once when its ceiling is
/// reached; distinguishable from genuine process output.
pub const TRUNCATION_MARKER: &str = "\n<scriptforge: output truncated at 1 MiB>";

/// Default deadline for a commandlet run
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// How long to keep draining output pipes once the process is gone. An
/// inherited pipe held open by an orphaned grandchild must not stall the
/// result.
const DRAIN_GRACE: Duration = Duration::from_secs(2);

/// One external batch invocation: executable, arguments, deadline.
///
/// Argument conventions (`-run=<name>` selectors and the like) are the
/// caller's business; arguments pass through verbatim.
#[derive(Debug, Clone)]
pub struct Commandlet {
    executable: PathBuf,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
    timeout: Duration,
}

impl Commandlet {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            args: Vec::new(),
            working_dir: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run the child in a specific working directory
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Wall-clock deadline, measured from spawn
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run the commandlet to a terminal state.
    ///
    /// The deadline is armed at spawn. If the process exits first the
    /// result carries its exit code, zero or not. If the deadline fires
    /// first the process is killed with a non-catchable signal and the
    /// result is flagged `timed_out`; the exit code of a killed process is
    /// whatever the OS reports and must not be read as success. The
    /// exit/deadline race is decided in a single place, so exactly one
    /// terminal transition is ever observable.
    pub async fn run(&self) -> CommandletResult {
        let mut command = Command::new(&self.executable);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                warn!(
                    "Failed to spawn commandlet {}: {}",
                    self.executable.display(),
                    e
                );
                return spawn_failed(&self.executable, &e);
            }
        };
        debug!(
            "Commandlet {} started (pid {:?})",
            self.executable.display(),
            child.id()
        );

        let stdout_buf = Arc::new(Mutex::new(CappedBuffer::new(MAX_CAPTURE_BYTES)));
        let stderr_buf = Arc::new(Mutex::new(CappedBuffer::new(MAX_CAPTURE_BYTES)));
        let stdout_task = tokio::spawn(drain(child.stdout.take(), stdout_buf.clone()));
        let stderr_task = tokio::spawn(drain(child.stderr.take(), stderr_buf.clone()));

        let mut timed_out = false;
        let first_wait = tokio::time::timeout(self.timeout, child.wait()).await;
        let status = match first_wait {
            Ok(status) => status,
            Err(_) => {
                timed_out = true;
                debug!(
                    "Commandlet {} exceeded {:?}, killing",
                    self.executable.display(),
                    self.timeout
                );
                if let Err(e) = child.start_kill() {
                    warn!("Failed to kill timed-out commandlet: {}", e);
                }
                // Finalize as soon as the exit notification triggered by
                // the kill arrives; no polling beyond the OS's delivery.
                child.wait().await
            }
        };

        let exit_code = match status {
            Ok(status) => status.code().unwrap_or(CommandletResult::EXIT_UNKNOWN),
            Err(e) => {
                warn!(
                    "Failed to reap commandlet {}: {}",
                    self.executable.display(),
                    e
                );
                CommandletResult::EXIT_UNKNOWN
            }
        };

        join_reader(stdout_task).await;
        join_reader(stderr_task).await;

        let (stdout, stdout_truncated) = stdout_buf.lock().render(TRUNCATION_MARKER);
        let (stderr, stderr_truncated) = stderr_buf.lock().render(TRUNCATION_MARKER);

        CommandletResult {
            exit_code,
            stdout,
            stderr,
            stdout_truncated,
            stderr_truncated,
            timed_out,
        }
    }
}

/// Wait for a reader task, bounded by the drain grace period
async fn join_reader(task: JoinHandle<()>) {
    let abort = task.abort_handle();
    if tokio::time::timeout(DRAIN_GRACE, task).await.is_err() {
        warn!("Output pipe still open after process exit; abandoning drain");
        abort.abort();
    }
}

fn spawn_failed(executable: &Path, error: &std::io::Error) -> CommandletResult {
    CommandletResult {
        exit_code: CommandletResult::EXIT_UNKNOWN,
        stdout: String::new(),
        stderr: format!("Failed to launch {}: {}", executable.display(), error),
        stdout_truncated: false,
        stderr_truncated: false,
        timed_out: false,
    }
}

/// Run an executable with arguments under a deadline: the plain-function
/// form of [`Commandlet::run`]
pub async fn run_commandlet(
    executable: impl Into<PathBuf>,
    args: &[String],
    timeout: Duration,
) -> CommandletResult {
    Commandlet::new(executable)
        .args(args.iter().cloned())
        .timeout(timeout)
        .run()
        .await
}
