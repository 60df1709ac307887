//! ytlinkbot - Telegram front end for ytlinkcore
//!
//! Receives `/v`, `/a`, `/yt` commands or plain links, runs the
//! download-and-resolve workflow and replies with a public download link.
//!
//! # Module Structure
//!
//! - `cli`: command-line interface (run the bot, one-shot fetch/sweep)
//! - `telegram`: bot creation, dispatcher schema, handlers, keyboards

pub mod cli;
pub mod telegram;

pub use telegram::{create_bot, schema, setup_bot_commands, HandlerDeps};
