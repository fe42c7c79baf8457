//! SQLite path handling.

use std::io;
use std::path::{Path, PathBuf};

use super::dsn::{is_memory_dsn, split_sqlite_dsn};
use crate::DbError;

/// Rewrite a file DSN so a relative path is resolved against `base_dir`.
///
/// - In-memory DSNs are returned unchanged.
/// - The result always uses the `sqlite://` form with forward slashes.
/// - Query parameters are preserved.
pub fn absolutize_dsn(dsn: &str, base_dir: &Path) -> Result<String, DbError> {
    if is_memory_dsn(dsn) {
        return Ok(dsn.to_string());
    }

    let (path, query) =
        split_sqlite_dsn(dsn).ok_or_else(|| DbError::UnsupportedDsn(dsn.to_string()))?;
    if path.is_empty() {
        return Err(DbError::EmptyPath(dsn.to_string()));
    }

    let mut p = PathBuf::from(path);
    if p.is_relative() {
        p = base_dir.join(p);
    }

    let mut out = String::from("sqlite://");
    out.push_str(&p.to_string_lossy().replace('\\', "/"));
    if let Some(q) = query {
        out.push('?');
        out.push_str(q);
    }
    Ok(out)
}

/// Create the parent directory of a database file if it is missing.
pub(crate) fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir),
        _ => Ok(()),
    }
}
