//! The download-and-resolve workflow
//!
//! 1. Dry-run: ask yt-dlp which filename it would write (`--get-filename`).
//! 2. Fetch: run the real download with the same template.
//! 3. Locate: exact path, else the `*-{id}.*` fallback.
//! 4. Link: file size plus public URL under the configured domain.

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::core::config::Config;
use crate::core::error::AppError;
use crate::core::process::{stderr_tail, STDERR_TAIL_BYTES};
use crate::core::types::FetchMode;
use crate::download::error::ResolveError;
use crate::download::link::build_public_url;
use crate::download::locate::locate_output_file;
use crate::download::ytdlp::{analyze_ytdlp_error, fetch_args, filename_args, FetchTool, YtDlp};

/// A downloaded file ready to be handed out
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedFile {
    /// Where the file lives on disk
    pub path: PathBuf,
    /// Bare file name
    pub file_name: String,
    /// Public link to the file
    pub public_url: String,
    /// File size in bytes
    pub size_bytes: u64,
}

impl ResolvedFile {
    /// Size in MiB, the unit shown to users
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / (1024.0 * 1024.0)
    }
}

/// Drives the fetch tool through the two-phase protocol.
///
/// Stateless apart from the optional concurrency limiter; share it as
/// `Arc<Resolver>`.
pub struct Resolver {
    config: Arc<Config>,
    tool: Arc<dyn FetchTool>,
    permits: Option<Arc<Semaphore>>,
}

impl Resolver {
    pub fn new(config: Arc<Config>, tool: Arc<dyn FetchTool>) -> Self {
        let permits = match config.max_concurrent_fetches {
            0 => None,
            n => Some(Arc::new(Semaphore::new(n))),
        };
        Self { config, tool, permits }
    }

    /// Resolver backed by the real yt-dlp binary from `YTDL_BIN`
    pub fn from_config(config: Arc<Config>) -> Self {
        let tool = Arc::new(YtDlp::new(config.ytdl_bin.clone()));
        Self::new(config, tool)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    async fn acquire(&self) -> Result<Option<OwnedSemaphorePermit>, ResolveError> {
        match &self.permits {
            None => Ok(None),
            Some(semaphore) => Arc::clone(semaphore)
                .acquire_owned()
                .await
                .map(Some)
                .map_err(|e| ResolveError::Unexpected(AppError::Process(format!("fetch limiter closed: {}", e)))),
        }
    }

    /// Phase 1: computes the output path without downloading.
    ///
    /// Fails with `AnalysisFailed` on a non-zero exit or empty output; no
    /// file is created in that case.
    pub async fn analyze(&self, url: &str) -> Result<PathBuf, ResolveError> {
        let _permit = self.acquire().await?;
        let output = self
            .tool
            .run(&filename_args(&self.config.output_template(), url))
            .await?;

        let filename = output.stdout.lines().map(str::trim).find(|line| !line.is_empty());

        match filename {
            Some(name) if output.success() => {
                log::info!("Resolved filename for {}: {}", url, name);
                Ok(PathBuf::from(name))
            }
            _ => {
                let stderr = stderr_tail(&output.stderr, STDERR_TAIL_BYTES).to_string();
                log::error!(
                    "{} --get-filename failed for {}: code={:?}, category={}, err={}",
                    self.tool.name(),
                    url,
                    output.code,
                    analyze_ytdlp_error(&stderr).as_str(),
                    stderr
                );
                Err(ResolveError::AnalysisFailed {
                    code: output.code,
                    stderr,
                })
            }
        }
    }

    /// Phase 2 onwards: downloads, locates the file and builds its link.
    ///
    /// `expected` is the path returned by [`Resolver::analyze`]. Partial
    /// files left by a failed fetch are not touched.
    pub async fn fetch(&self, url: &str, mode: FetchMode, expected: &Path) -> Result<ResolvedFile, ResolveError> {
        {
            let _permit = self.acquire().await?;
            let output = self
                .tool
                .run(&fetch_args(&self.config.output_template(), url, mode))
                .await?;

            if !output.success() {
                let stderr = stderr_tail(&output.stderr, STDERR_TAIL_BYTES).to_string();
                log::error!(
                    "{} download failed for {} ({}): code={:?}, category={}, err={}",
                    self.tool.name(),
                    url,
                    mode,
                    output.code,
                    analyze_ytdlp_error(&stderr).as_str(),
                    stderr
                );
                return Err(ResolveError::FetchFailed {
                    code: output.code,
                    stderr,
                });
            }
        }

        let path = locate_output_file(expected, &self.config.download_dir).ok_or_else(|| {
            log::error!(
                "Download of {} succeeded but no file matches {}",
                url,
                expected.display()
            );
            ResolveError::FileMissing {
                expected: expected.to_path_buf(),
            }
        })?;

        let size_bytes = tokio::fs::metadata(&path).await?.len();
        let public_url = build_public_url(&self.config.domain, &self.config.public_root, &path);
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        log::info!("Downloaded {} ({}) -> {} ({} bytes)", url, mode, public_url, size_bytes);

        Ok(ResolvedFile {
            path,
            file_name,
            public_url,
            size_bytes,
        })
    }

    /// Full workflow: [`Resolver::analyze`] then [`Resolver::fetch`].
    pub async fn resolve(&self, url: &str, mode: FetchMode) -> Result<ResolvedFile, ResolveError> {
        let expected = self.analyze(url).await?;
        self.fetch(url, mode, &expected).await
    }
}
