//! Runs the download-and-resolve workflow for one chat request

use ytlinkcore::{FetchMode, ResolveError, ResolvedFile, Resolver};

use crate::telegram::messages;
use crate::telegram::progress::ProgressReporter;

/// Runs analysis, then the fetch, reporting each step.
///
/// The "downloading" notice is only sent once analysis has succeeded, so a
/// bad link gets exactly one error reply. Reporter failures are logged and
/// do not interrupt the download.
pub async fn run_fetch<R>(resolver: &Resolver, reporter: &R, url: &str, mode: FetchMode) -> Result<ResolvedFile, ResolveError>
where
    R: ProgressReporter + ?Sized,
{
    log::info!("Fetch requested: mode={}, url={}", mode, url);

    let expected = match resolver.analyze(url).await {
        Ok(path) => path,
        Err(e) => {
            notify_failure(reporter, &e).await;
            return Err(e);
        }
    };

    send(reporter, messages::downloading(mode)).await;

    match resolver.fetch(url, mode, &expected).await {
        Ok(file) => {
            log::info!("Fetched {} ({} bytes) -> {}", file.file_name, file.size_bytes, file.public_url);
            send(reporter, &messages::done(&file)).await;
            Ok(file)
        }
        Err(e) => {
            notify_failure(reporter, &e).await;
            Err(e)
        }
    }
}

async fn notify_failure<R>(reporter: &R, error: &ResolveError)
where
    R: ProgressReporter + ?Sized,
{
    if let ResolveError::Unexpected(inner) = error {
        log::error!("Unexpected error while resolving: {:?}", inner);
    }
    send(reporter, error.user_message()).await;
}

async fn send<R>(reporter: &R, text: &str)
where
    R: ProgressReporter + ?Sized,
{
    if let Err(e) = reporter.report(text).await {
        log::warn!("Failed to deliver status message: {}", e);
    }
}
