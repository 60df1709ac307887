//! Telegram update handlers
//!
//! - `schema`: dispatcher tree
//! - `commands`: slash commands and plain-text links
//! - `callbacks`: Video/Audio button presses
//! - `types`: shared handler dependencies

pub mod callbacks;
pub mod commands;
pub mod schema;
pub mod types;

pub use schema::schema;
pub use types::{HandlerDeps, HandlerError};
