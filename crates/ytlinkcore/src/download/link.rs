use std::path::{Component, Path};

/// Builds the public URL for a downloaded file.
///
/// The path part is `file` relative to `public_root`, with components
/// joined by `/`. Files outside `public_root` are linked by name only.
/// Exactly one `/` separates the domain from the path.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use ytlinkcore::download::build_public_url;
///
/// let url = build_public_url(
///     "https://dl.example.com/",
///     Path::new("/var/www"),
///     Path::new("/var/www/files/Song-xyz.mp3"),
/// );
/// assert_eq!(url, "https://dl.example.com/files/Song-xyz.mp3");
/// ```
pub fn build_public_url(domain: &str, public_root: &Path, file: &Path) -> String {
    let relative = match file.strip_prefix(public_root) {
        Ok(rel) => rel,
        Err(_) => {
            log::warn!(
                "{} is outside the public root {}, linking by file name",
                file.display(),
                public_root.display()
            );
            file.file_name().map(Path::new).unwrap_or(file)
        }
    };

    let path = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/");

    format!("{}/{}", domain.trim_end_matches('/'), path.trim_start_matches('/'))
}
