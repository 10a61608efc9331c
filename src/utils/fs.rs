//! Filesystem predicates used by the completion walker and `PATH` search.

use std::fs;
use std::path::Path;

/// Whether the file at `path` (symlinks followed) is executable.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    fs::metadata(path).is_ok_and(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
}

/// Whether the file at `path` is executable: on this platform, whether its
/// extension marks it as runnable.
#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    const EXEC_EXTENSIONS: &[&str] = &["exe", "com", "bat", "cmd"];

    fs::metadata(path).is_ok_and(|m| m.is_file())
        && path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| EXEC_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}

/// Whether an executable exists at `path`.
pub fn executable_exists(path: &Path) -> bool {
    is_executable(path)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs::File;
    use std::os::unix::fs::PermissionsExt;

    fn make_file(dir: &Path, name: &str, mode: u32) -> std::path::PathBuf {
        let path = dir.join(name);
        File::create(&path).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
        path
    }

    #[test]
    fn test_executable_bit_is_checked() {
        let dir = tempfile::tempdir().unwrap();
        let script = make_file(dir.path(), "run.sh", 0o755);
        let data = make_file(dir.path(), "data.txt", 0o644);
        assert!(is_executable(&script));
        assert!(!is_executable(&data));
    }

    #[test]
    fn test_directories_are_not_executables() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_executable(dir.path()));
    }

    #[test]
    fn test_missing_file_is_not_executable() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!executable_exists(&dir.path().join("absent")));
    }
}
