use crate::analysis::error::AnalyzeError;
use glob::{Pattern, glob};
use std::path::{Path, PathBuf};

/// Discovers files matching a glob pattern below `root`.
///
/// Returns regular files only, in sorted order, so callers see a deterministic
/// file order regardless of directory iteration order. Unreadable entries are
/// silently filtered out.
///
/// # Errors
///
/// Returns `AnalyzeError::Glob` if the pattern is malformed.
pub fn discover(root: &Path, glob_pattern: &str) -> Result<Vec<PathBuf>, AnalyzeError> {
    let pattern = &resolve_glob(root, glob_pattern);
    let mut paths: Vec<_> = glob(pattern)
        .map_err(|e| AnalyzeError::Glob {
            pattern: pattern.to_string(),
            source: e,
        })?
        .filter_map(Result::ok)
        .filter(|path| path.is_file())
        .collect();

    paths.sort();
    Ok(paths)
}

/// Resolves a glob pattern relative to a root directory.
///
/// Glob metacharacters in `root` are escaped so that only `pattern` is
/// interpreted.
pub fn resolve_glob(root: &Path, pattern: &str) -> String {
    let escaped_root = Pattern::escape(&root.to_string_lossy());
    Path::new(&escaped_root)
        .join(pattern)
        .to_string_lossy()
        .into_owned()
}
