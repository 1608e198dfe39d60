//! External process execution
//!
//! Wraps `tokio::process` with the invocation shape every Netsells CLI
//! shell-out needs: inherited environment plus caller overrides, combined
//! stdout/stderr capture, and optional live streaming for long-running
//! commands such as compose builds.

pub mod error;

pub use error::*;

use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;

/// How the child's combined output is handled while the process runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Capture only. With echo-on-failure enabled the buffer is printed
    /// once if the child exits non-zero.
    #[default]
    Captured,
    /// Mirror every line to the console as it arrives, and capture.
    StreamedAndCaptured,
}

/// A single external command invocation.
///
/// The child inherits the full parent environment; overrides set with
/// [`Process::env`] are applied on top, last write wins per key.
#[derive(Debug)]
pub struct Process {
    program: String,
    args: Vec<String>,
    envs: Vec<(String, String)>,
    mode: OutputMode,
    echo_on_failure: bool,
}

impl Process {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
            mode: OutputMode::Captured,
            echo_on_failure: true,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    pub fn output_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    /// Print the captured buffer once after a non-zero exit, so failures of
    /// captured-only invocations are never silently swallowed. Defaults to
    /// true; disable for probes whose failure is expected.
    pub fn echo_on_failure(mut self, echo: bool) -> Self {
        self.echo_on_failure = echo;
        self
    }

    /// Run the command to completion and return the combined output.
    ///
    /// stdout and stderr are merged in arrival order. The child is fully
    /// waited on before this returns; there is no timeout.
    pub async fn run(&self) -> Result<String> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        tracing::debug!("Running: {} {}", self.program, self.args.join(" "));

        let mut child = cmd.spawn().map_err(|e| ProcessError::SpawnFailed {
            program: self.program.clone(),
            source: e,
        })?;

        let (tx, mut rx) = mpsc::unbounded_channel::<String>();

        if let Some(out) = child.stdout.take() {
            let tx = tx.clone();
            tokio::spawn(async move {
                let mut lines = BufReader::new(out).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    let _ = tx.send(line);
                }
            });
        }

        if let Some(err) = child.stderr.take() {
            let tx = tx.clone();
            tokio::spawn(async move {
                let mut lines = BufReader::new(err).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    let _ = tx.send(line);
                }
            });
        }

        drop(tx);

        let mut captured = String::new();
        while let Some(line) = rx.recv().await {
            if self.mode == OutputMode::StreamedAndCaptured {
                println!("{}", line);
            }
            captured.push_str(&line);
            captured.push('\n');
        }

        let status = child.wait().await?;

        if !status.success() {
            if self.echo_on_failure && self.mode == OutputMode::Captured {
                println!("{}", captured);
            }
            return Err(ProcessError::Failed {
                program: self.program.clone(),
                code: status.code(),
                output: captured,
            });
        }

        Ok(captured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_captures_stdout() {
        let output = Process::new("sh")
            .args(["-c", "echo hello"])
            .run()
            .await
            .unwrap();
        assert_eq!(output, "hello\n");
    }

    #[tokio::test]
    async fn test_captures_stdout_and_stderr_combined() {
        let output = Process::new("sh")
            .args(["-c", "echo out; echo err 1>&2"])
            .run()
            .await
            .unwrap();
        assert!(output.contains("out"));
        assert!(output.contains("err"));
    }

    #[tokio::test]
    async fn test_env_override_last_write_wins() {
        let output = Process::new("sh")
            .args(["-c", "printf '%s' \"$TAG\""])
            .env("TAG", "first")
            .env("TAG", "second")
            .run()
            .await
            .unwrap();
        assert_eq!(output, "second\n");
    }

    #[tokio::test]
    async fn test_nonzero_exit_reports_code_and_output() {
        let err = Process::new("sh")
            .args(["-c", "echo boom; exit 3"])
            .echo_on_failure(false)
            .run()
            .await
            .unwrap_err();

        match err {
            ProcessError::Failed {
                program,
                code,
                output,
            } => {
                assert_eq!(program, "sh");
                assert_eq!(code, Some(3));
                assert!(output.contains("boom"));
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_binary_is_spawn_failure() {
        let err = Process::new("definitely-not-a-real-binary-12345")
            .run()
            .await
            .unwrap_err();

        assert!(matches!(err, ProcessError::SpawnFailed { .. }));
    }
}
