use crate::error::{Result, StoreError};
use std::env;
use std::fs;
use std::path::PathBuf;

const APP_DIR: &str = "cadastro";
const DB_FILENAME: &str = "cadastro.sqlite3";

/// Resolves where the database file lives.
///
/// An explicit path wins; its parent directory is created if missing,
/// so a fresh path inside a temp dir works without setup. With no
/// explicit path the file goes into the XDG data dir, created 0700 on
/// unix.
pub fn resolve_db_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    let Some(path) = custom else {
        return Ok(ensure_data_dir()?.join(DB_FILENAME));
    };
    if path.as_os_str().is_empty() || path.is_dir() {
        return Err(StoreError::InvalidDataPath(path));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(path)
}

fn data_dir() -> Result<PathBuf> {
    match env::var_os("XDG_DATA_HOME") {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir).join(APP_DIR)),
        Some(dir) => Err(StoreError::InvalidDataPath(PathBuf::from(dir))),
        None => {
            let home = dirs::home_dir().ok_or(StoreError::MissingHomeDir)?;
            Ok(home.join(".local").join("share").join(APP_DIR))
        }
    }
}

fn ensure_data_dir() -> Result<PathBuf> {
    let dir = data_dir()?;
    fs::create_dir_all(&dir)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o700))?;
    }
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::resolve_db_path;
    use crate::error::{StoreError, StoreErrorKind};
    use tempfile::TempDir;

    #[test]
    fn resolve_db_path_keeps_explicit_path() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("registry.sqlite3");
        let resolved = resolve_db_path(Some(path.clone())).expect("resolve");
        assert_eq!(resolved, path);
    }

    #[test]
    fn resolve_db_path_creates_missing_parent() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("nested").join("dir").join("db.sqlite3");
        let resolved = resolve_db_path(Some(path.clone())).expect("resolve");
        assert_eq!(resolved, path);
        assert!(path.parent().expect("parent").is_dir());
    }

    #[test]
    fn resolve_db_path_rejects_empty_path() {
        let err = resolve_db_path(Some(std::path::PathBuf::new())).expect_err("empty path");
        assert_eq!(err.kind(), StoreErrorKind::InvalidDataPath);
    }

    #[test]
    fn resolve_db_path_rejects_directory() {
        let temp = TempDir::new().expect("temp dir");
        let err = resolve_db_path(Some(temp.path().to_path_buf())).expect_err("dir path");
        assert!(matches!(err, StoreError::InvalidDataPath(_)));
    }
}
