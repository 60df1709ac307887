//! User-facing texts

use ytlinkcore::{FetchMode, ResolvedFile};

pub const GREETING: &str = "Hi! Send me a YouTube link and pick Video or Audio, or use a command:\n\
    /v <url> - download video\n\
    /a <url> - download audio as mp3\n\
    /yt <video|audio> <url>";

pub const TEXT_HINT: &str = "Send me a link starting with http:// or https:// and I will prepare a download for you.";

pub const CHOOSE_MODE: &str = "What should I download?";

pub const LINK_EXPIRED: &str = "This link has expired. Please send it again.";

pub fn analyzing(mode: FetchMode) -> String {
    format!("{} Analyzing the link...", mode.emoji())
}

pub fn downloading(mode: FetchMode) -> &'static str {
    match mode {
        FetchMode::Video => "Downloading... This may take a minute.",
        FetchMode::Audio => "Downloading and extracting audio... This may take a minute.",
    }
}

pub fn done(file: &ResolvedFile) -> String {
    format!(
        "Done! Download link: {}\nFile size: {:.2} MB",
        file.public_url,
        file.size_mb()
    )
}
