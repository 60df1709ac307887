//! Recovering the file yt-dlp actually wrote
//!
//! The dry-run filename is a prediction: merging formats or transcoding
//! audio can change the extension after the fact. The `{id}` suffix from
//! the `%(title)s-%(id)s.%(ext)s` template survives those renames, so when
//! the exact path is missing we look for any `*-{id}.*` in the directory.
//!
//! This is a heuristic tied to the template above, not a guarantee.

use std::path::{Path, PathBuf};

/// Extracts the trailing id token from a templated filename.
///
/// `Song_Title-dQw4w9WgXcQ.webm` → `dQw4w9WgXcQ`. Ids that themselves
/// contain `-` yield only their last segment, which still matches the glob.
pub fn extract_id(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let id = stem.rsplit('-').next()?;
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

/// Whether `file_name` matches the glob `*-{id}.*`
pub fn matches_id(file_name: &str, id: &str) -> bool {
    file_name.contains(&format!("-{}.", id))
}

/// Finds the downloaded file for `expected`.
///
/// Tries the exact path first, then the first regular file (by name) in
/// `dir` matching `*-{id}.*`. Returns `None` if neither exists.
pub fn locate_output_file(expected: &Path, dir: &Path) -> Option<PathBuf> {
    if expected.is_file() {
        return Some(expected.to_path_buf());
    }

    let id = extract_id(expected)?;
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::error!("Error finding downloaded file in {}: {}", dir.display(), e);
            return None;
        }
    };

    let mut candidates: Vec<PathBuf> = entries
        .flatten()
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter(|entry| matches_id(&entry.file_name().to_string_lossy(), &id))
        .map(|entry| entry.path())
        .collect();
    candidates.sort();

    let found = candidates.into_iter().next();
    if let Some(ref path) = found {
        log::info!(
            "Expected {} missing, located {} by id '{}'",
            expected.display(),
            path.display(),
            id
        );
    }
    found
}
