//! Slash commands and plain-text links

use std::sync::Arc;

use teloxide::prelude::*;
use tokio::task::JoinHandle;
use teloxide::types::Message;
use teloxide::utils::command::BotCommands;

use ytlinkcore::{FetchMode, Resolver};

use super::types::{HandlerDeps, HandlerError};
use crate::telegram::bot::{Command, CommandAction};
use crate::telegram::download::run_fetch;
use crate::telegram::keyboard::{extract_url, mode_keyboard};
use crate::telegram::messages;
use crate::telegram::progress::{ChatReporter, ProgressReporter};

pub async fn handle_command(bot: &Bot, msg: &Message, cmd: Command, deps: &HandlerDeps) -> Result<(), HandlerError> {
    match cmd.action() {
        CommandAction::Greet => {
            bot.send_message(msg.chat.id, messages::GREETING).await?;
        }
        CommandAction::Help => {
            bot.send_message(msg.chat.id, Command::descriptions().to_string()).await?;
        }
        CommandAction::Usage(usage) => {
            bot.send_message(msg.chat.id, usage).await?;
        }
        CommandAction::Fetch { mode, url } => {
            spawn_fetch(
                Arc::clone(&deps.resolver),
                ChatReporter::new(bot.clone(), msg.chat.id),
                url,
                mode,
            );
        }
    }
    Ok(())
}

/// Plain text: offer the Video/Audio keyboard for the first link, or a hint
pub async fn handle_text(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    match extract_url(text) {
        Some(url) => {
            let key = deps.pending.insert(url);
            log::info!("Link from chat {} stored as #{}: {}", msg.chat.id, key, url);
            bot.send_message(msg.chat.id, messages::CHOOSE_MODE)
                .reply_markup(mode_keyboard(key))
                .await?;
        }
        None => {
            bot.send_message(msg.chat.id, messages::TEXT_HINT).await?;
        }
    }
    Ok(())
}

/// Runs the fetch off the dispatcher task; the reporter carries the replies
pub(crate) fn spawn_fetch<R>(resolver: Arc<Resolver>, reporter: R, url: String, mode: FetchMode) -> JoinHandle<()>
where
    R: ProgressReporter + 'static,
{
    tokio::spawn(async move {
        // Errors have already been reported to the chat
        let _ = run_fetch(&resolver, &reporter, &url, mode).await;
    })
}
