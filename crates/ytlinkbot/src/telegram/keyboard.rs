//! Inline keyboard for the link flow and its callback data
//!
//! Callback data format: `dl:<mode>:<key>`, where `key` refers to a URL in
//! [`PendingLinks`](crate::telegram::pending::PendingLinks). Telegram caps
//! callback data at 64 bytes, so the URL itself never goes into it.

use once_cell::sync::Lazy;
use regex::Regex;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use ytlinkcore::FetchMode;

const CALLBACK_PREFIX: &str = "dl";

/// Cached regex for matching URLs in plain messages
static URL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://[^\s]+").expect("Failed to compile URL regex"));

/// Returns the first http(s) URL in `text`, if any
pub fn extract_url(text: &str) -> Option<&str> {
    URL_REGEX.find(text).map(|m| m.as_str())
}

pub fn callback_data(mode: FetchMode, key: u64) -> String {
    format!("{}:{}:{}", CALLBACK_PREFIX, mode, key)
}

/// Parses `dl:<mode>:<key>`; anything else is `None`
pub fn parse_callback_data(data: &str) -> Option<(FetchMode, u64)> {
    let mut parts = data.splitn(3, ':');
    if parts.next()? != CALLBACK_PREFIX {
        return None;
    }
    let mode = parts.next()?.parse::<FetchMode>().ok()?;
    let key = parts.next()?.parse::<u64>().ok()?;
    Some((mode, key))
}

/// Two buttons, Video and Audio, for the stored link `key`
pub fn mode_keyboard(key: u64) -> InlineKeyboardMarkup {
    let buttons = [FetchMode::Video, FetchMode::Audio]
        .into_iter()
        .map(|mode| {
            InlineKeyboardButton::callback(
                format!("{} {}", mode.emoji(), mode.display_name()),
                callback_data(mode, key),
            )
        })
        .collect::<Vec<_>>();
    InlineKeyboardMarkup::new(vec![buttons])
}
