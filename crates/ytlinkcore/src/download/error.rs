use std::path::PathBuf;
use thiserror::Error;

use crate::core::error::AppError;

/// Structured error type for the download-and-resolve workflow.
///
/// Each variant maps to one fixed user-facing message; the technical
/// detail (exit code, stderr tail, paths) is for the log only.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The filename dry-run failed or printed nothing (usually a bad URL)
    #[error("yt-dlp --get-filename failed: code={code:?}, err={stderr}")]
    AnalysisFailed { code: Option<i32>, stderr: String },

    /// The real download/transcode exited non-zero
    #[error("yt-dlp download failed: code={code:?}, err={stderr}")]
    FetchFailed { code: Option<i32>, stderr: String },

    /// The fetch reported success but no matching file exists on disk
    #[error("downloaded file not found (expected {})", expected.display())]
    FileMissing { expected: PathBuf },

    /// Anything else (spawn failure, I/O while sizing the file, ...)
    #[error("unexpected error: {0}")]
    Unexpected(#[from] AppError),
}

impl ResolveError {
    /// Returns a stable label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            ResolveError::AnalysisFailed { .. } => "analysis_failed",
            ResolveError::FetchFailed { .. } => "fetch_failed",
            ResolveError::FileMissing { .. } => "file_missing",
            ResolveError::Unexpected(_) => "unexpected",
        }
    }

    /// Returns the message shown to the user. Never contains internal detail.
    pub fn user_message(&self) -> &'static str {
        match self {
            ResolveError::AnalysisFailed { .. } => {
                "Failed to analyze the video URL. Please check the link and try again."
            }
            ResolveError::FetchFailed { .. } => "Download failed. The video may be unavailable or blocked.",
            ResolveError::FileMissing { .. } => "Downloaded, but could not locate the file. Please try again later.",
            ResolveError::Unexpected(_) => "Unexpected error while processing the request.",
        }
    }
}

impl From<std::io::Error> for ResolveError {
    fn from(err: std::io::Error) -> Self {
        ResolveError::Unexpected(AppError::Io(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all() -> Vec<ResolveError> {
        vec![
            ResolveError::AnalysisFailed {
                code: Some(1),
                stderr: "ERROR: Unsupported URL: /tmp/secret".into(),
            },
            ResolveError::FetchFailed {
                code: Some(1),
                stderr: "ERROR: HTTP Error 403".into(),
            },
            ResolveError::FileMissing {
                expected: PathBuf::from("/srv/dl/a-b.mp4"),
            },
            ResolveError::Unexpected(AppError::Process("boom".into())),
        ]
    }

    #[test]
    fn test_user_messages_are_distinct() {
        let errors = all();
        let mut messages: Vec<_> = errors.iter().map(|e| e.user_message()).collect();
        messages.sort();
        messages.dedup();
        assert_eq!(messages.len(), errors.len());
    }

    #[test]
    fn test_user_messages_do_not_leak_detail() {
        for err in all() {
            let msg = err.user_message();
            assert!(!msg.contains("/srv"));
            assert!(!msg.contains("/tmp"));
            assert!(!msg.contains("403"));
            assert!(!msg.contains("boom"));
        }
    }

    #[test]
    fn test_display_keeps_detail_for_logs() {
        let err = ResolveError::FetchFailed {
            code: Some(1),
            stderr: "ERROR: HTTP Error 403".into(),
        };
        assert!(err.to_string().contains("403"));
        assert_eq!(err.kind(), "fetch_failed");
    }

    #[test]
    fn test_io_error_is_unexpected() {
        let err: ResolveError = std::io::Error::other("disk").into();
        assert!(matches!(err, ResolveError::Unexpected(AppError::Io(_))));
        assert_eq!(err.kind(), "unexpected");
    }
}
