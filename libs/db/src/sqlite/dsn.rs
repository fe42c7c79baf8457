//! SQLite DSN parsing.

use std::path::PathBuf;

use crate::DbError;

/// Query parameters that are lifted out of the DSN and applied as PRAGMAs.
const PRAGMA_PARAMS: &[&str] = &["wal", "synchronous", "busy_timeout", "journal_mode"];

/// A file DSN split into its path and whitelisted PRAGMA parameters.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ParsedDsn {
    pub path: PathBuf,
    /// Lowercased PRAGMA keys with their raw values, in DSN order.
    pub params: Vec<(String, String)>,
}

/// Split the scheme off a SQLite DSN, returning `(path, query)`.
///
/// Returns `None` when the DSN names another scheme.
pub(crate) fn split_sqlite_dsn(dsn: &str) -> Option<(&str, Option<&str>)> {
    let dsn = dsn.trim();
    let rest = if let Some(rest) = dsn.strip_prefix("sqlite://") {
        rest
    } else if let Some(rest) = dsn.strip_prefix("sqlite:") {
        rest
    } else if dsn.contains("://") {
        return None;
    } else {
        dsn
    };

    Some(match rest.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (rest, None),
    })
}

/// Parse a file DSN. Non-PRAGMA query parameters are ignored.
pub(crate) fn parse_sqlite_dsn(dsn: &str) -> Result<ParsedDsn, DbError> {
    let (path, query) =
        split_sqlite_dsn(dsn).ok_or_else(|| DbError::UnsupportedDsn(dsn.to_string()))?;
    if path.is_empty() {
        return Err(DbError::EmptyPath(dsn.to_string()));
    }

    let mut params = Vec::new();
    for (key, value) in url::form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
        let key = key.to_ascii_lowercase();
        if PRAGMA_PARAMS.contains(&key.as_str()) {
            params.push((key, value.into_owned()));
        } else {
            tracing::debug!("Ignoring non-PRAGMA DSN parameter: {}", key);
        }
    }

    Ok(ParsedDsn {
        path: PathBuf::from(path),
        params,
    })
}

/// True for DSNs that would open an in-memory database.
pub(crate) fn is_memory_dsn(dsn: &str) -> bool {
    let Some((path, query)) = split_sqlite_dsn(dsn) else {
        return false;
    };
    if matches!(path, ":memory:" | "memory:") {
        return true;
    }
    url::form_urlencoded::parse(query.unwrap_or_default().as_bytes()).any(|(key, value)| {
        key.eq_ignore_ascii_case("mode") && value.eq_ignore_ascii_case("memory")
    })
}
