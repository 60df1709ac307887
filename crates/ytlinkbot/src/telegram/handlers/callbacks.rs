//! Video/Audio button presses

use std::sync::Arc;

use teloxide::prelude::*;
use tokio::task::JoinHandle;

use ytlinkcore::FetchMode;

use super::commands::spawn_fetch;
use super::types::{HandlerDeps, HandlerError};
use crate::telegram::keyboard::parse_callback_data;
use crate::telegram::messages;
use crate::telegram::progress::{EditReporter, ProgressReporter};

pub async fn handle_callback(bot: &Bot, q: CallbackQuery, deps: &HandlerDeps) -> Result<(), HandlerError> {
    bot.answer_callback_query(q.id.clone()).await?;

    let Some((mode, key)) = q.data.as_deref().and_then(parse_callback_data) else {
        log::warn!("Ignoring unknown callback data: {:?}", q.data);
        return Ok(());
    };
    let Some(message) = q.message.as_ref() else {
        log::warn!("Callback #{} has no message attached", key);
        return Ok(());
    };
    let chat_id = message.chat().id;
    let message_id = message.id();

    log::info!("Button {} pressed in chat {} for #{}", mode, chat_id, key);
    let reporter = EditReporter::new(bot.clone(), chat_id, message_id);
    if start_pending_fetch(deps, key, mode, reporter).await.is_none() {
        bot.edit_message_text(chat_id, message_id, messages::LINK_EXPIRED).await?;
    }
    Ok(())
}

/// Takes the link stored under `key` and starts its fetch.
///
/// Returns `None` when the key is unknown or already used. Once the link
/// has left the store the fetch always starts; a failed "analyzing" notice
/// is only logged.
pub async fn start_pending_fetch<R>(deps: &HandlerDeps, key: u64, mode: FetchMode, reporter: R) -> Option<JoinHandle<()>>
where
    R: ProgressReporter + 'static,
{
    let url = deps.pending.take(key)?;

    if let Err(e) = reporter.report(&messages::analyzing(mode)).await {
        log::warn!("Failed to show progress for #{}: {}", key, e);
    }
    Some(spawn_fetch(Arc::clone(&deps.resolver), reporter, url, mode))
}
