use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ytlinkbot")]
#[command(author, version, about = "Telegram bot that turns YouTube links into download links", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Run the bot with long polling (default)
    Run,

    /// Download a single URL and print its public link
    Fetch {
        /// Source URL passed to yt-dlp
        url: String,

        /// Extract audio (mp3) instead of video
        #[arg(short, long)]
        audio: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run one retention sweep over the download directory
    Sweep {
        /// Override CLEANING_INTERVAL_DAYS for this run
        #[arg(short, long)]
        days: Option<u64>,
    },

    /// Print the installed yt-dlp version
    Check,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
