//! Download management: fetch-tool invocation, file recovery and links

pub mod error;
pub mod link;
pub mod locate;
pub mod resolver;
pub mod ytdlp;

// Re-exports for convenience
pub use error::ResolveError;
pub use link::build_public_url;
pub use locate::{extract_id, locate_output_file};
pub use resolver::{ResolvedFile, Resolver};
pub use ytdlp::{FetchTool, YtDlp};
