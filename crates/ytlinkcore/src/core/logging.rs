//! Logging initialization
//!
//! This module provides:
//! - Logger initialization (console + appending log file)
//! - A panic hook that routes panics into the log
//! - Startup configuration summary

use anyhow::Result;
use simplelog::*;
use std::fs::OpenOptions;
use std::path::Path;

use crate::core::config::Config;

/// Initialize logger for both console and file output
///
/// The log file is opened in append mode so restarts keep the history.
///
/// # Arguments
/// * `log_file_path` - Path to the log file
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(anyhow::Error)` - Failed to open the file or a logger was already set
pub fn init_logger(log_file_path: &Path) -> Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)
        .map_err(|e| anyhow::anyhow!("Failed to open log file {}: {}", log_file_path.display(), e))?;

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build();

    CombinedLogger::init(vec![
        TermLogger::new(LevelFilter::Info, config.clone(), TerminalMode::Mixed, ColorChoice::Auto),
        WriteLogger::new(LevelFilter::Info, config, log_file),
    ])
    .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

/// Logs panics instead of letting them vanish on a detached task
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
        }
    }));
}

/// Logs the effective configuration at startup (token redacted)
pub fn log_configuration(config: &Config) {
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("Download directory: {}", config.download_dir.display());
    log::info!("Public root:        {}", config.public_root.display());
    log::info!("Public domain:      {}", config.domain);
    log::info!("Fetch tool:         {}", config.ytdl_bin);
    if config.retention_enabled() {
        log::info!(
            "Retention:          {} day(s), sweep every {}h",
            config.retention_days,
            config.sweep_interval.as_secs() / 3600
        );
    } else {
        log::info!("Retention:          disabled (CLEANING_INTERVAL_DAYS=0)");
    }
    if config.max_concurrent_fetches > 0 {
        log::info!("Concurrent fetches: at most {}", config.max_concurrent_fetches);
    } else {
        log::info!("Concurrent fetches: unbounded");
    }
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}
