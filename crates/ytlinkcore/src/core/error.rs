use thiserror::Error;

/// Infrastructure errors shared by the resolver, the sweeper and the bot.
///
/// Download outcomes have their own taxonomy in
/// [`ResolveError`](crate::download::error::ResolveError); this enum covers
/// everything underneath it (I/O, configuration, spawning processes).
///
/// # Example
///
/// ```
/// use ytlinkcore::AppError;
///
/// let err = AppError::Config("DOWNLOAD_DOMAIN is not set".to_string());
/// assert_eq!(err.to_string(), "Configuration error: DOWNLOAD_DOMAIN is not set");
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed environment configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Subprocess could not be spawned or timed out
    #[error("Process error: {0}")]
    Process(String),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: AppError = io.into();
        assert!(matches!(err, AppError::Io(_)));
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn test_process_error_display() {
        let err = AppError::Process("yt-dlp: not found".into());
        assert_eq!(err.to_string(), "Process error: yt-dlp: not found");
    }
}
