//! Bot initialization and command definitions
//!
//! This module contains:
//! - Command enum definition
//! - Mapping of commands to actions
//! - Bot instance creation

use reqwest::ClientBuilder;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use ytlinkcore::core::config;
use ytlinkcore::FetchMode;

/// Bot commands enum with descriptions
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "I can:")]
pub enum Command {
    #[command(description = "greeting and usage")]
    Start,
    #[command(description = "show this help")]
    Help,
    #[command(description = "download video: /v <url>")]
    V(String),
    #[command(description = "download video: /video <url>")]
    Video(String),
    #[command(description = "download audio as mp3: /a <url>")]
    A(String),
    #[command(description = "download audio as mp3: /audio <url>")]
    Audio(String),
    #[command(description = "download: /yt <video|audio> <url>")]
    Yt(String),
}

/// What a parsed command asks the bot to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandAction {
    Greet,
    Help,
    Fetch { mode: FetchMode, url: String },
    Usage(&'static str),
}

impl Command {
    /// Maps the command and its raw argument text to an action.
    ///
    /// Only the first whitespace-separated token is taken as the URL.
    pub fn action(&self) -> CommandAction {
        match self {
            Command::Start => CommandAction::Greet,
            Command::Help => CommandAction::Help,
            Command::V(args) => fetch_or_usage(FetchMode::Video, args, "Usage: /v <youtube_url>"),
            Command::Video(args) => fetch_or_usage(FetchMode::Video, args, "Usage: /video <youtube_url>"),
            Command::A(args) => fetch_or_usage(FetchMode::Audio, args, "Usage: /a <youtube_url>"),
            Command::Audio(args) => fetch_or_usage(FetchMode::Audio, args, "Usage: /audio <youtube_url>"),
            Command::Yt(args) => parse_yt_args(args),
        }
    }
}

const YT_USAGE: &str = "Usage: /yt <video|audio> <youtube_url>";

fn fetch_or_usage(mode: FetchMode, args: &str, usage: &'static str) -> CommandAction {
    match args.split_whitespace().next() {
        Some(url) => CommandAction::Fetch {
            mode,
            url: url.to_string(),
        },
        None => CommandAction::Usage(usage),
    }
}

fn parse_yt_args(args: &str) -> CommandAction {
    let mut parts = args.split_whitespace();
    let (Some(mode), Some(url)) = (parts.next(), parts.next()) else {
        return CommandAction::Usage(YT_USAGE);
    };
    match mode.parse::<FetchMode>() {
        Ok(mode) => CommandAction::Fetch {
            mode,
            url: url.to_string(),
        },
        Err(_) => CommandAction::Usage(YT_USAGE),
    }
}

/// Creates a Bot instance with a request timeout on the HTTP client
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(anyhow::Error)` - Failed to build the HTTP client
pub fn create_bot(token: &str) -> anyhow::Result<Bot> {
    let client = ClientBuilder::new().timeout(config::network::timeout()).build()?;
    Ok(Bot::with_client(token, client))
}

/// Sets up bot commands in Telegram UI
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(Command::bot_commands()).await?;
    Ok(())
}
