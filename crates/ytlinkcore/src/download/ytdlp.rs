//! yt-dlp invocation
//!
//! The [`FetchTool`] trait is the seam between the resolver and the external
//! process, so the two-phase protocol can be exercised with a stub in tests.

use async_trait::async_trait;

use crate::core::config::timeouts;
use crate::core::error::AppError;
use crate::core::process::{run_command, run_with_timeout, CommandOutput};
use crate::core::types::FetchMode;

/// Audio codec requested for audio-only fetches
pub const AUDIO_FORMAT: &str = "mp3";

/// An external media-fetching executable driven by argument lists
#[async_trait]
pub trait FetchTool: Send + Sync {
    /// Human-readable name used in logs
    fn name(&self) -> &str;

    /// Run the tool with `args` and wait for it to exit.
    async fn run(&self, args: &[String]) -> Result<CommandOutput, AppError>;
}

/// The real `yt-dlp` binary
#[derive(Debug, Clone)]
pub struct YtDlp {
    bin: String,
}

impl YtDlp {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }
}

#[async_trait]
impl FetchTool for YtDlp {
    fn name(&self) -> &str {
        &self.bin
    }

    async fn run(&self, args: &[String]) -> Result<CommandOutput, AppError> {
        log::debug!("Running {} {:?}", self.bin, args);
        run_command(&self.bin, args).await
    }
}

/// Arguments for the dry-run: print the output filename, download nothing.
pub fn filename_args(template: &str, url: &str) -> Vec<String> {
    [
        "--restrict-filenames",
        "--no-playlist",
        "-o",
        template,
        "--get-filename",
        url,
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Arguments for the real fetch.
///
/// Uses the same template and filename policy as [`filename_args`] so both
/// phases agree on `{title}-{id}`.
pub fn fetch_args(template: &str, url: &str, mode: FetchMode) -> Vec<String> {
    let mut args: Vec<&str> = Vec::with_capacity(10);
    if mode == FetchMode::Audio {
        args.extend(["--format", "bestaudio", "--extract-audio", "--audio-format", AUDIO_FORMAT]);
    }
    args.extend(["--restrict-filenames", "--no-playlist", "-o", template, url]);
    args.into_iter().map(str::to_string).collect()
}

/// Returns the installed yt-dlp version, e.g. `2024.08.06`.
pub async fn ytdlp_version(bin: &str) -> Result<String, AppError> {
    let output = run_with_timeout(bin, &["--version".to_string()], timeouts::version_check()).await?;
    if !output.success() || output.stdout.is_empty() {
        return Err(AppError::Process(format!(
            "{} --version failed (code {:?}): {}",
            bin, output.code, output.stderr
        )));
    }
    Ok(output.stdout)
}

/// Logs the yt-dlp version at startup. A missing binary is a warning only.
pub async fn log_ytdlp_version(bin: &str) {
    match ytdlp_version(bin).await {
        Ok(version) => log::info!("yt-dlp version: {}", version),
        Err(e) => log::warn!("Failed to get yt-dlp version: {}. Downloads will fail until it is installed.", e),
    }
}

/// Coarse classification of yt-dlp stderr, for diagnostics only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YtDlpErrorType {
    /// Unsupported or malformed URL
    UnsupportedUrl,
    /// YouTube asks for sign-in / detected a bot
    BotDetection,
    /// Private, removed or region-locked media
    VideoUnavailable,
    /// Timeouts, DNS, connection resets
    NetworkError,
    /// ffmpeg/ffprobe missing or post-processing failed
    PostProcessing,
    Unknown,
}

impl YtDlpErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            YtDlpErrorType::UnsupportedUrl => "unsupported_url",
            YtDlpErrorType::BotDetection => "bot_detection",
            YtDlpErrorType::VideoUnavailable => "video_unavailable",
            YtDlpErrorType::NetworkError => "network",
            YtDlpErrorType::PostProcessing => "postprocessing",
            YtDlpErrorType::Unknown => "unknown",
        }
    }
}

/// Analyzes yt-dlp stderr and guesses what went wrong
pub fn analyze_ytdlp_error(stderr: &str) -> YtDlpErrorType {
    let stderr_lower = stderr.to_lowercase();

    if stderr_lower.contains("unsupported url") || stderr_lower.contains("is not a valid url") {
        return YtDlpErrorType::UnsupportedUrl;
    }

    if stderr_lower.contains("sign in to confirm you're not a bot")
        || stderr_lower.contains("http error 403")
        || stderr_lower.contains("please sign in")
    {
        return YtDlpErrorType::BotDetection;
    }

    if stderr_lower.contains("private video")
        || stderr_lower.contains("video unavailable")
        || stderr_lower.contains("not available in your country")
        || stderr_lower.contains("video has been removed")
    {
        return YtDlpErrorType::VideoUnavailable;
    }

    if stderr_lower.contains("ffmpeg") || stderr_lower.contains("ffprobe") || stderr_lower.contains("postprocessing") {
        return YtDlpErrorType::PostProcessing;
    }

    if stderr_lower.contains("timed out")
        || stderr_lower.contains("connection")
        || stderr_lower.contains("network")
        || stderr_lower.contains("name resolution")
    {
        return YtDlpErrorType::NetworkError;
    }

    YtDlpErrorType::Unknown
}
