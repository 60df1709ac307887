//! Runtime configuration
//!
//! Everything is read once at startup into an immutable [`Config`] that is
//! passed explicitly (usually as `Arc<Config>`) to the resolver, the
//! sweeper and the bot handlers.

use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use crate::core::error::{AppError, AppResult};

/// Default download directory when DOWNLOAD_PATH is not set
pub const DEFAULT_DOWNLOAD_PATH: &str = "downloads";

/// Default log file path when LOG_FILE_PATH is not set
pub const DEFAULT_LOG_FILE_PATH: &str = "log.log";

/// Default fetch tool binary when YTDL_BIN is not set
pub const DEFAULT_YTDL_BIN: &str = "yt-dlp";

/// Default period between retention sweeps (hours)
pub const DEFAULT_SWEEP_INTERVAL_HOURS: u64 = 24;

/// Filename template handed to yt-dlp, relative to the download directory.
/// The `-%(id)s` suffix is what file location recovery keys on.
pub const OUTPUT_FILENAME_TEMPLATE: &str = "%(title)s-%(id)s.%(ext)s";

/// Housekeeping timeouts
pub mod timeouts {
    use super::Duration;

    /// Timeout for `yt-dlp --version`
    pub const VERSION_CHECK_SECS: u64 = 30;

    pub fn version_check() -> Duration {
        Duration::from_secs(VERSION_CHECK_SECS)
    }
}

/// Dispatcher restart policy
pub mod retry {
    use super::Duration;

    /// Maximum number of dispatcher restarts after a panic
    pub const MAX_DISPATCHER_RETRIES: u32 = 5;

    /// Base delay between dispatcher restarts (seconds)
    pub const DISPATCHER_RETRY_DELAY_SECS: u64 = 5;

    /// Base for exponential backoff between dispatcher restarts (seconds)
    pub const EXPONENTIAL_BACKOFF_BASE: u64 = 2;

    pub fn dispatcher_delay() -> Duration {
        Duration::from_secs(DISPATCHER_RETRY_DELAY_SECS)
    }
}

/// Network configuration for the Bot API client
pub mod network {
    use super::Duration;

    /// Request timeout for Bot API calls (seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 60;

    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Immutable process configuration
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Bot API token; only the `run` command needs it
    pub bot_token: Option<String>,
    /// Public domain root links are built on, e.g. `https://dl.example.com`
    pub domain: String,
    /// Directory yt-dlp writes into
    pub download_dir: PathBuf,
    /// Directory that `domain` serves; links are relative to it
    pub public_root: PathBuf,
    /// Retention window in days, 0 disables the sweeper
    pub retention_days: u64,
    /// Period between sweeps
    pub sweep_interval: Duration,
    /// Fetch tool executable
    pub ytdl_bin: String,
    /// Upper bound on concurrently running fetches, 0 means unbounded
    pub max_concurrent_fetches: usize,
    /// Diagnostic log file
    pub log_file_path: PathBuf,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bot_token", &self.bot_token.as_ref().map(|_| "<redacted>"))
            .field("domain", &self.domain)
            .field("download_dir", &self.download_dir)
            .field("public_root", &self.public_root)
            .field("retention_days", &self.retention_days)
            .field("sweep_interval", &self.sweep_interval)
            .field("ytdl_bin", &self.ytdl_bin)
            .field("max_concurrent_fetches", &self.max_concurrent_fetches)
            .field("log_file_path", &self.log_file_path)
            .finish()
    }
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// Call after `dotenvy::dotenv()` so `.env` values are visible.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bot_token = get("BOT_TOKEN").or_else(|| get("TELOXIDE_TOKEN"));

        let domain = get("DOWNLOAD_DOMAIN").ok_or_else(|| AppError::Config("DOWNLOAD_DOMAIN is not set".into()))?;
        let parsed = url::Url::parse(&domain)
            .map_err(|e| AppError::Config(format!("DOWNLOAD_DOMAIN is not a valid URL ({}): {}", domain, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "DOWNLOAD_DOMAIN must be an http(s) URL, got scheme '{}'",
                parsed.scheme()
            )));
        }

        let base = match get("DEPLOY_ROOT") {
            Some(root) => PathBuf::from(shellexpand::tilde(&root).into_owned()),
            None => std::env::current_dir()?,
        };

        let download_raw = get("DOWNLOAD_PATH").unwrap_or_else(|| DEFAULT_DOWNLOAD_PATH.to_string());
        let download_dir = resolve_path(&base, &download_raw);
        let public_root = get("PUBLIC_ROOT")
            .map(|raw| resolve_path(&base, &raw))
            .unwrap_or_else(|| download_dir.clone());

        let retention_days = parse_number::<u64>(get("CLEANING_INTERVAL_DAYS"), "CLEANING_INTERVAL_DAYS", 0)?;
        let sweep_hours = parse_number::<u64>(
            get("SWEEP_INTERVAL_HOURS"),
            "SWEEP_INTERVAL_HOURS",
            DEFAULT_SWEEP_INTERVAL_HOURS,
        )?;
        if sweep_hours == 0 {
            return Err(AppError::Config("SWEEP_INTERVAL_HOURS must be at least 1".into()));
        }
        let sweep_secs = sweep_hours
            .checked_mul(60 * 60)
            .ok_or_else(|| AppError::Config(format!("SWEEP_INTERVAL_HOURS is too large, got '{}'", sweep_hours)))?;
        let max_concurrent_fetches = parse_number::<usize>(get("MAX_CONCURRENT_FETCHES"), "MAX_CONCURRENT_FETCHES", 0)?;

        let ytdl_bin = get("YTDL_BIN").unwrap_or_else(|| DEFAULT_YTDL_BIN.to_string());
        let log_file_path = get("LOG_FILE_PATH")
            .map(|raw| PathBuf::from(shellexpand::tilde(&raw).into_owned()))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE_PATH));

        Ok(Self {
            bot_token,
            domain,
            download_dir,
            public_root,
            retention_days,
            sweep_interval: Duration::from_secs(sweep_secs),
            ytdl_bin,
            max_concurrent_fetches,
            log_file_path,
        })
    }

    /// Full yt-dlp output template, e.g. `/srv/dl/%(title)s-%(id)s.%(ext)s`
    pub fn output_template(&self) -> String {
        self.download_dir.join(OUTPUT_FILENAME_TEMPLATE).to_string_lossy().into_owned()
    }

    /// Creates the download directory (and parents) if missing
    pub fn ensure_download_dir(&self) -> AppResult<()> {
        std::fs::create_dir_all(&self.download_dir)?;
        Ok(())
    }

    /// Returns the bot token or a configuration error naming the variable
    pub fn require_bot_token(&self) -> AppResult<&str> {
        self.bot_token
            .as_deref()
            .ok_or_else(|| AppError::Config("BOT_TOKEN environment variable not set".into()))
    }

    /// Whether the retention sweeper should run at all
    pub fn retention_enabled(&self) -> bool {
        self.retention_days > 0
    }
}

fn resolve_path(base: &Path, raw: &str) -> PathBuf {
    let expanded = PathBuf::from(shellexpand::tilde(raw).into_owned());
    if expanded.is_absolute() {
        normalize_path(&expanded)
    } else {
        normalize_path(&base.join(expanded))
    }
}

/// Collapses `.` and `..` without touching the filesystem.
///
/// `DOWNLOAD_PATH` and `PUBLIC_ROOT` are compared by prefix when building
/// links, so both must be in the same lexical form. `..` at the root stays
/// at the root.
fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

fn parse_number<T: std::str::FromStr>(raw: Option<String>, key: &str, default: T) -> AppResult<T> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .parse::<T>()
            .map_err(|_| AppError::Config(format!("{} must be a non-negative integer, got '{}'", key, value))),
    }
}
