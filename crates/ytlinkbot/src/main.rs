use anyhow::Result;
use dotenvy::dotenv;
use std::sync::Arc;
use std::time::Duration;
use teloxide::prelude::*;
use tokio::time::sleep;

use ytlinkbot::cli::{Cli, Commands};
use ytlinkbot::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps, PendingLinks};
use ytlinkcore::core::logging::log_configuration;
use ytlinkcore::core::retention::{start_sweeper_task, sweep};
use ytlinkcore::core::{config, init_logger, install_panic_hook, Config};
use ytlinkcore::download::ytdlp::{log_ytdlp_version, ytdlp_version};
use ytlinkcore::{FetchMode, Resolver};

/// Main entry point for the bot
///
/// Parses CLI arguments and dispatches to the subcommand; without one the
/// bot runs with long polling.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Load environment variables from .env if present
    let _ = dotenv();

    let config = Arc::new(Config::from_env()?);

    init_logger(&config.log_file_path)?;
    install_panic_hook();

    match cli.command {
        None | Some(Commands::Run) => run_bot(config).await,
        Some(Commands::Fetch { url, audio, json }) => {
            let mode = if audio { FetchMode::Audio } else { FetchMode::Video };
            run_fetch_once(config, &url, mode, json).await
        }
        Some(Commands::Sweep { days }) => {
            let days = days.unwrap_or(config.retention_days);
            let removed = sweep(&config.download_dir, days)?;
            println!("Removed {} file(s) from {}", removed, config.download_dir.display());
            Ok(())
        }
        Some(Commands::Check) => {
            let version = ytdlp_version(&config.ytdl_bin).await?;
            println!("{} {}", config.ytdl_bin, version);
            Ok(())
        }
    }
}

/// One-shot download from the command line
async fn run_fetch_once(config: Arc<Config>, url: &str, mode: FetchMode, json: bool) -> Result<()> {
    config.ensure_download_dir()?;
    let resolver = Resolver::from_config(config);

    match resolver.resolve(url, mode).await {
        Ok(file) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&file)?);
            } else {
                println!("{}", file.public_url);
                println!("{:.2} MB", file.size_mb());
            }
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!("{} ({})", e.user_message(), e)),
    }
}

async fn run_bot(config: Arc<Config>) -> Result<()> {
    log::info!("Starting bot...");

    let token = config.require_bot_token()?.to_string();
    config.ensure_download_dir()?;
    log_configuration(&config);
    log_ytdlp_version(&config.ytdl_bin).await;

    let sweeper = start_sweeper_task(config.download_dir.clone(), config.retention_days, config.sweep_interval);

    let bot = create_bot(&token)?;
    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to set bot commands: {}", e);
    }

    let deps = HandlerDeps::new(
        Arc::new(Resolver::from_config(Arc::clone(&config))),
        Arc::new(PendingLinks::default()),
    );
    let handler = schema(deps);

    let mut retry_count = 0;
    let max_retries = config::retry::MAX_DISPATCHER_RETRIES;

    // Run the dispatcher with retry logic
    loop {
        let bot_clone = bot.clone();
        let handler_clone = handler.clone();

        // A panic inside the dispatcher surfaces through the JoinHandle
        let handle = tokio::spawn(async move {
            use teloxide::update_listeners::Polling;

            let listener = Polling::builder(bot_clone.clone()).drop_pending_updates().build();

            Dispatcher::builder(bot_clone, handler_clone)
                .enable_ctrlc_handler()
                .default_handler(|upd| async move {
                    log::debug!("Unhandled update: {:?}", upd.kind);
                })
                .build()
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("An error from the update listener"),
                )
                .await
        });

        match handle.await {
            Ok(()) => {
                log::info!("Dispatcher shutdown gracefully");
                break;
            }
            Err(join_err) if join_err.is_panic() => {
                log::error!("Dispatcher panicked: {}", join_err);
                if retry_count < max_retries {
                    retry_count += 1;
                    log::info!(
                        "Restarting dispatcher after panic (attempt {}/{})...",
                        retry_count,
                        max_retries
                    );
                    exponential_backoff(retry_count).await;
                } else {
                    log::error!("Max retries reached after panic. Exiting...");
                    break;
                }
            }
            Err(join_err) => {
                log::warn!("Dispatcher task was cancelled: {}", join_err);
                break;
            }
        }

        // Add a delay between retries to avoid overwhelming the API
        sleep(config::retry::dispatcher_delay()).await;
    }

    sweeper.abort();
    Ok(())
}

/// Exponential backoff delay for retries
async fn exponential_backoff(retry_count: u32) {
    let delay = Duration::from_secs(config::retry::EXPONENTIAL_BACKOFF_BASE.pow(retry_count));
    sleep(delay).await;
}
