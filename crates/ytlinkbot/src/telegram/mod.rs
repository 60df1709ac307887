//! Telegram bot integration and handlers

pub mod bot;
pub mod download;
pub mod handlers;
pub mod keyboard;
pub mod messages;
pub mod pending;
pub mod progress;

// Re-exports for convenience
pub use bot::{create_bot, setup_bot_commands, Command, CommandAction};
pub use download::run_fetch;
pub use handlers::{schema, HandlerDeps, HandlerError};
pub use pending::PendingLinks;
pub use progress::{ChatReporter, EditReporter, ProgressReporter};
