//! Status messages shown to the user while a fetch runs

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::MessageId;
use teloxide::{ApiError, RequestError};

use crate::telegram::handlers::HandlerError;

/// Where workflow status updates go.
///
/// Implementations must be cheap to call repeatedly; a failed report is
/// logged by the caller and never aborts the download.
#[async_trait]
pub trait ProgressReporter: Send + Sync {
    async fn report(&self, text: &str) -> Result<(), HandlerError>;
}

/// Sends every update as a new message to the chat
pub struct ChatReporter {
    bot: Bot,
    chat_id: ChatId,
}

impl ChatReporter {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }
}

#[async_trait]
impl ProgressReporter for ChatReporter {
    async fn report(&self, text: &str) -> Result<(), HandlerError> {
        self.bot.send_message(self.chat_id, text).await?;
        Ok(())
    }
}

/// Rewrites a single status message in place (button flow)
pub struct EditReporter {
    bot: Bot,
    chat_id: ChatId,
    message_id: MessageId,
}

impl EditReporter {
    pub fn new(bot: Bot, chat_id: ChatId, message_id: MessageId) -> Self {
        Self {
            bot,
            chat_id,
            message_id,
        }
    }
}

#[async_trait]
impl ProgressReporter for EditReporter {
    async fn report(&self, text: &str) -> Result<(), HandlerError> {
        match self.bot.edit_message_text(self.chat_id, self.message_id, text).await {
            Ok(_) => Ok(()),
            // Same text twice in a row
            Err(RequestError::Api(ApiError::MessageNotModified)) => Ok(()),
            Err(e) => {
                log::warn!("Failed to edit message: {}. Sending a new one.", e);
                self.bot.send_message(self.chat_id, text).await?;
                Ok(())
            }
        }
    }
}
