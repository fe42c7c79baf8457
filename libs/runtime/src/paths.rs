//! Home directory resolution.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HomeDirError {
    #[error("cannot determine the user home directory")]
    NoHome,

    #[error("failed to create home directory {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Platform base under which the default home sub-directory lives.
///
/// Windows: `%APPDATA%`; everywhere else: `$HOME`.
fn platform_base() -> Option<PathBuf> {
    if cfg!(target_os = "windows") {
        dirs::config_dir()
    } else {
        dirs::home_dir()
    }
}

/// Expand a leading `~` or `~/` against the user home directory.
fn expand_tilde(raw: &str) -> Result<PathBuf, HomeDirError> {
    if raw == "~" {
        return dirs::home_dir().ok_or(HomeDirError::NoHome);
    }
    if let Some(rest) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        return Ok(dirs::home_dir().ok_or(HomeDirError::NoHome)?.join(rest));
    }
    Ok(PathBuf::from(raw))
}

/// Resolve the server home directory into an absolute path.
///
/// `None` (or an empty string) selects `<platform base>/<default_subdir>`.
/// Relative paths are taken against the current working directory.
/// With `create` set the directory is created if missing.
pub fn resolve_home_dir(
    configured: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf, HomeDirError> {
    let path = match configured.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => expand_tilde(raw)?,
        _ => platform_base()
            .ok_or(HomeDirError::NoHome)?
            .join(default_subdir),
    };

    let path = if path.is_absolute() {
        path
    } else {
        std::env::current_dir()
            .map_err(|source| HomeDirError::Create {
                path: path.clone(),
                source,
            })?
            .join(path)
    };

    if create {
        ensure_dir(&path)?;
    }
    Ok(path)
}

fn ensure_dir(path: &Path) -> Result<(), HomeDirError> {
    std::fs::create_dir_all(path).map_err(|source| HomeDirError::Create {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn explicit_absolute_path_is_created() {
        let tmp = tempdir().unwrap();
        let target = tmp.path().join("srv/home");

        let got = resolve_home_dir(Some(target.to_string_lossy().into()), ".unused", true).unwrap();
        assert_eq!(got, target);
        assert!(target.is_dir());
    }

    #[test]
    fn create_false_leaves_fs_untouched() {
        let tmp = tempdir().unwrap();
        let target = tmp.path().join("not-yet");

        let got = resolve_home_dir(Some(target.to_string_lossy().into()), ".unused", false).unwrap();
        assert_eq!(got, target);
        assert!(!target.exists());
    }

    #[test]
    fn tilde_is_expanded() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let got = resolve_home_dir(Some("~/.users_server_probe".into()), ".unused", false).unwrap();
        assert_eq!(got, home.join(".users_server_probe"));
        assert!(got.is_absolute());
    }

    #[test]
    fn relative_path_is_made_absolute() {
        let got = resolve_home_dir(Some("rel/home".into()), ".unused", false).unwrap();
        assert!(got.is_absolute());
        assert!(got.ends_with("rel/home"));
    }

    #[test]
    fn blank_selects_platform_default() {
        let Some(base) = platform_base() else {
            return;
        };
        let got = resolve_home_dir(Some("   ".into()), ".users_server", false).unwrap();
        assert_eq!(got, base.join(".users_server"));
    }
}
