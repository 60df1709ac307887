//! ytlinkcore - download engine behind the ytlink Telegram bot
//!
//! Drives `yt-dlp` through a two-phase protocol (filename dry-run, then the
//! real fetch), recovers the file it actually wrote and turns it into a
//! public link. A retention sweeper keeps the download directory bounded.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging, subprocess execution, retention
//! - `download`: fetch-tool seam, resolver, file location, link construction

pub mod core;
pub mod download;

// Re-export commonly used types for convenience
pub use crate::core::config::Config;
pub use crate::core::error::{AppError, AppResult};
pub use crate::core::types::FetchMode;
pub use crate::download::error::ResolveError;
pub use crate::download::resolver::{ResolvedFile, Resolver};
pub use crate::download::ytdlp::{FetchTool, YtDlp};
