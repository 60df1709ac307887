//! Process execution utilities
//!
//! One primitive for running an external command to completion with both
//! output streams captured, plus a timeout wrapper for housekeeping probes.

use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use crate::core::error::AppError;

/// Maximum number of stderr bytes kept in logs and error values
pub const STDERR_TAIL_BYTES: usize = 2000;

/// Exit status and captured output of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal
    pub code: Option<i32>,
    /// Trimmed, lossily decoded stdout
    pub stdout: String,
    /// Trimmed, lossily decoded stderr
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    fn from_output(output: std::process::Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }
}

/// Run `program args...`, await completion and capture exit code and both streams.
///
/// A non-zero exit is not an error here; callers inspect [`CommandOutput::success`].
/// Only a failure to spawn or wait on the process is reported as `AppError::Process`.
pub async fn run_command(program: &str, args: &[String]) -> Result<CommandOutput, AppError> {
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| AppError::Process(format!("Failed to run {}: {}", program, e)))?;

    Ok(CommandOutput::from_output(output))
}

/// Run a command with a timeout.
///
/// The child is killed when the timeout elapses.
pub async fn run_with_timeout(program: &str, args: &[String], timeout: Duration) -> Result<CommandOutput, AppError> {
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => Ok(CommandOutput::from_output(output)),
        Ok(Err(e)) => Err(AppError::Process(format!("Failed to run {}: {}", program, e))),
        Err(_) => Err(AppError::Process(format!(
            "{} timed out after {}s",
            program,
            timeout.as_secs()
        ))),
    }
}

/// Returns at most the last `max_bytes` bytes of `text`, cut on a char boundary.
pub fn stderr_tail(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut start = text.len() - max_bytes;
    while !text.is_char_boundary(start) {
        start += 1;
    }
    &text[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stderr_tail_short_string() {
        assert_eq!(stderr_tail("error", 100), "error");
    }

    #[test]
    fn test_stderr_tail_truncates_from_the_front() {
        assert_eq!(stderr_tail("0123456789", 4), "6789");
    }

    #[test]
    fn test_stderr_tail_respects_char_boundaries() {
        // "é" is two bytes; a cut in the middle must move forward
        let text = "aé";
        assert_eq!(stderr_tail(text, 1), "");
        assert_eq!(stderr_tail(text, 2), "é");
    }

    #[test]
    fn test_command_output_success() {
        let ok = CommandOutput {
            code: Some(0),
            ..Default::default()
        };
        let failed = CommandOutput {
            code: Some(1),
            ..Default::default()
        };
        let killed = CommandOutput::default();
        assert!(ok.success());
        assert!(!failed.success());
        assert!(!killed.success());
    }

    #[tokio::test]
    async fn test_run_command_missing_binary() {
        let result = run_command("definitely-not-a-real-binary-ytlink", &[]).await;
        assert!(matches!(result, Err(AppError::Process(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_command_captures_streams_and_code() {
        let args = vec!["-c".to_string(), "echo out; echo err >&2; exit 3".to_string()];
        let output = run_command("sh", &args).await.unwrap();
        assert_eq!(output.code, Some(3));
        assert_eq!(output.stdout, "out");
        assert_eq!(output.stderr, "err");
        assert!(!output.success());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_with_timeout_expires() {
        let args = vec!["-c".to_string(), "sleep 5".to_string()];
        let result = run_with_timeout("sh", &args, Duration::from_millis(100)).await;
        assert!(matches!(result, Err(AppError::Process(msg)) if msg.contains("timed out")));
    }
}
