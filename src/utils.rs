//! Common utility functions shared across the codebase.

use std::path::Path;

/// Render `path` relative to `root` when it lies below it.
///
/// Paths outside `root` are returned unchanged.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use lemmascan::utils::relative_path;
///
/// assert_eq!(relative_path(Path::new("/p/app/a.php"), Path::new("/p")), "app/a.php");
/// assert_eq!(relative_path(Path::new("./lang/en.json"), Path::new(".")), "lang/en.json");
/// assert_eq!(relative_path(Path::new("/elsewhere/x.php"), Path::new("/p")), "/elsewhere/x.php");
/// ```
pub fn relative_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}

/// `1 file` / `2 files`.
pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    format!("{} {}", count, if count == 1 { singular } else { plural })
}
