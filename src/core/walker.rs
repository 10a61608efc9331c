//! Filesystem completion walker.
//!
//! Expands `~` and `$VAR` references in the typed text, splits it into a
//! directory part and a basename fragment, enumerates the directory, and
//! appends the entries the fragment prefixes. Directories are addressed
//! through their own handles - the walk never touches the process's working
//! directory.
//!
//! The walk is synchronous: a directory on a slow or unresponsive mount
//! blocks until the read returns. That is the engine's contract with the
//! interactive loop, accepted as a latency risk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{CompletionCx, MatchSession};
use crate::utils::fs::is_executable;
use crate::utils::path::{expand_envvars, expand_tilde, is_path_absolute, is_root_dir};
use crate::utils::str::os_prefix_matches;

/// Entry filter for one completion walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryType {
    /// Directories only.
    DirOnly,
    /// Executables only; these walks also omit the echo entry, since a bare
    /// executable name should not offer to "complete" to itself unresolved.
    ExecOnly,
    /// Directories or executables.
    DirOrExec,
    /// Everything.
    All,
    /// Everything, without decorating directories with a trailing `/`.
    AllWithoutSlash,
}

/// Complete `text` as a path against the filesystem.
///
/// A lone `~name` (no separator) expands wholesale and becomes the single
/// candidate. Otherwise the tilde- and env-expanded text splits at its last
/// `/` into the directory to enumerate and the fragment to match; with no
/// separator the active pane's directory is enumerated. A directory that
/// cannot be read degrades gracefully: the fragment itself is emitted as the
/// only candidate, never an error.
pub fn filename_completion(
    text: &str,
    entry_type: EntryType,
    cx: &CompletionCx<'_>,
    session: &mut MatchSession,
) {
    if text.starts_with('~') && !text.contains('/') {
        let expanded = expand_tilde(text, cx.home, cx.identity);
        session.add_path_match(expanded);
        return;
    }

    let tilde_expanded = expand_tilde(text, cx.home, cx.identity);
    let working = expand_envvars(&tilde_expanded, cx.env);

    let (dirname, fragment) = match working.rfind('/') {
        Some(i) => (working[..=i].to_string(), working[i + 1..].to_string()),
        None => (".".to_string(), tilde_expanded),
    };

    let dir_path = if is_path_absolute(&dirname) {
        PathBuf::from(&dirname)
    } else {
        cx.current_dir.join(&dirname)
    };

    match fs::read_dir(&dir_path) {
        Ok(entries) => enumerate(entries, &fragment, entry_type, session),
        Err(err) => {
            log::debug!("completion: cannot read {}: {}", dir_path.display(), err);
            session.add_path_match(fragment);
        }
    }
}

/// [`filename_completion`] against an explicit base directory; used for
/// commands whose argument is relative to the other pane.
pub fn filename_completion_in_dir(
    base: &Path,
    text: &str,
    entry_type: EntryType,
    cx: &CompletionCx<'_>,
    session: &mut MatchSession,
) {
    let combined = if is_root_dir(text) {
        text.to_string()
    } else {
        format!("{}/{}", base.display(), text)
    };
    filename_completion(&combined, entry_type, cx, session);
}

/// Enumerate one directory for `fragment`, skipping unreadable directories
/// silently. Used by command-name completion, which probes every `$PATH`
/// entry and must not emit degraded candidates for missing ones. A fragment
/// with a separator walks the named subdirectory and matches its basename.
pub(crate) fn complete_in_dir(
    dir: &Path,
    fragment: &str,
    entry_type: EntryType,
    session: &mut MatchSession,
) {
    let (walk_dir, name_fragment) = match fragment.rfind('/') {
        Some(i) => (dir.join(&fragment[..=i]), &fragment[i + 1..]),
        None => (dir.to_path_buf(), fragment),
    };
    if let Ok(entries) = fs::read_dir(&walk_dir) {
        enumerate(entries, name_fragment, entry_type, session);
    }
}

fn enumerate(
    entries: fs::ReadDir,
    fragment: &str,
    entry_type: EntryType,
    session: &mut MatchSession,
) {
    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().into_owned();
        // Dotfiles stay hidden until the fragment asks for them.
        if fragment.is_empty() && name.starts_with('.') {
            continue;
        }
        if !os_prefix_matches(&name, fragment) {
            continue;
        }

        let is_dir = targets_dir(&entry);
        let keep = match entry_type {
            EntryType::DirOnly => is_dir,
            EntryType::ExecOnly => targets_exec(&entry),
            EntryType::DirOrExec => is_dir || targets_exec(&entry),
            EntryType::All | EntryType::AllWithoutSlash => true,
        };
        if !keep {
            continue;
        }

        if is_dir && entry_type != EntryType::AllWithoutSlash {
            session.add_path_match(format!("{}/", name));
        } else {
            session.add_path_match(name);
        }
    }

    session.finish_group();
    if entry_type != EntryType::ExecOnly {
        session.add_echo_path_match(fragment);
    }
}

/// Whether the entry is a directory, following symlinks.
fn targets_dir(entry: &fs::DirEntry) -> bool {
    match entry.file_type() {
        Ok(ft) if ft.is_dir() => true,
        Ok(ft) if ft.is_symlink() => fs::metadata(entry.path()).is_ok_and(|m| m.is_dir()),
        _ => false,
    }
}

/// Whether the entry is an executable, following symlinks. A symlink whose
/// target is neither clearly a directory nor a regular file is excluded.
fn targets_exec(entry: &fs::DirEntry) -> bool {
    let Ok(ft) = entry.file_type() else {
        return false;
    };
    if ft.is_dir() {
        return false;
    }
    if ft.is_symlink() && !fs::metadata(entry.path()).is_ok_and(|m| m.is_file()) {
        return false;
    }
    is_executable(&entry.path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::path::Path;
    use std::sync::LazyLock;

    use crate::models::{FakeEnv, FakeIdentity, NoOpeners, StaticVocab};

    fn texts(session: &MatchSession) -> Vec<&str> {
        session.matches().iter().map(|m| m.text.as_str()).collect()
    }

    fn walk_cx<'a>(current_dir: &'a Path, env: &'a FakeEnv, identity: &'a FakeIdentity) -> CompletionCx<'a> {
        static VOCAB: LazyLock<StaticVocab> = LazyLock::new(StaticVocab::default);
        static NO_OPENERS: NoOpeners = NoOpeners;
        static EMPTY_PATHS: &[PathBuf] = &[];

        CompletionCx {
            options: &*VOCAB,
            variables: &*VOCAB,
            functions: &*VOCAB,
            colorschemes: &*VOCAB,
            highlight_groups: &*VOCAB,
            help_tags: &*VOCAB,
            associations: &NO_OPENERS,
            magic_handlers: &NO_OPENERS,
            identity,
            env,
            search_path: EMPTY_PATHS,
            home: Path::new("/nonexistent-home"),
            current_dir,
            other_dir: current_dir,
            current_file: "",
            vim_help: false,
        }
    }

    fn fixture_tree(dir: &Path) {
        fs::create_dir(dir.join("src")).unwrap();
        fs::create_dir(dir.join("srv")).unwrap();
        fs::create_dir(dir.join("bin")).unwrap();
        File::create(dir.join("srecord.txt")).unwrap();
        File::create(dir.join(".hidden")).unwrap();
    }

    #[test]
    fn test_dir_only_walk_with_fragment() {
        let tmp = tempfile::tempdir().unwrap();
        fixture_tree(tmp.path());
        let env = FakeEnv::default();
        let identity = FakeIdentity::default();
        let cx = walk_cx(tmp.path(), &env, &identity);

        let mut s = MatchSession::new();
        filename_completion("sr", EntryType::DirOnly, &cx, &mut s);
        assert_eq!(texts(&s), vec!["src/", "srv/", "sr"]);
    }

    #[test]
    fn test_all_walk_keeps_files_and_decorates_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        fixture_tree(tmp.path());
        let env = FakeEnv::default();
        let identity = FakeIdentity::default();
        let cx = walk_cx(tmp.path(), &env, &identity);

        let mut s = MatchSession::new();
        filename_completion("sr", EntryType::All, &cx, &mut s);
        assert_eq!(texts(&s), vec!["src/", "srecord.txt", "srv/", "sr"]);
    }

    #[test]
    fn test_without_slash_walk_leaves_dirs_bare() {
        let tmp = tempfile::tempdir().unwrap();
        fixture_tree(tmp.path());
        let env = FakeEnv::default();
        let identity = FakeIdentity::default();
        let cx = walk_cx(tmp.path(), &env, &identity);

        let mut s = MatchSession::new();
        filename_completion("src", EntryType::AllWithoutSlash, &cx, &mut s);
        assert_eq!(texts(&s), vec!["src", "src"]);
    }

    #[test]
    fn test_empty_fragment_hides_dotfiles() {
        let tmp = tempfile::tempdir().unwrap();
        fixture_tree(tmp.path());
        let env = FakeEnv::default();
        let identity = FakeIdentity::default();
        let cx = walk_cx(tmp.path(), &env, &identity);

        let mut s = MatchSession::new();
        filename_completion("", EntryType::All, &cx, &mut s);
        let all = texts(&s);
        assert!(!all.contains(&".hidden"));
        assert!(all.contains(&"bin/"));
    }

    #[test]
    fn test_dot_fragment_reveals_dotfiles() {
        let tmp = tempfile::tempdir().unwrap();
        fixture_tree(tmp.path());
        let env = FakeEnv::default();
        let identity = FakeIdentity::default();
        let cx = walk_cx(tmp.path(), &env, &identity);

        let mut s = MatchSession::new();
        filename_completion(".", EntryType::All, &cx, &mut s);
        assert!(texts(&s).contains(&".hidden"));
    }

    #[test]
    fn test_unreadable_directory_degrades_to_fragment() {
        let tmp = tempfile::tempdir().unwrap();
        let env = FakeEnv::default();
        let identity = FakeIdentity::default();
        let cx = walk_cx(tmp.path(), &env, &identity);

        let mut s = MatchSession::new();
        filename_completion("no/such/dir/fr", EntryType::All, &cx, &mut s);
        assert_eq!(texts(&s), vec!["fr"]);
    }

    #[test]
    fn test_directory_part_is_walked() {
        let tmp = tempfile::tempdir().unwrap();
        fixture_tree(tmp.path());
        File::create(tmp.path().join("src").join("main.rs")).unwrap();
        let env = FakeEnv::default();
        let identity = FakeIdentity::default();
        let cx = walk_cx(tmp.path(), &env, &identity);

        let mut s = MatchSession::new();
        filename_completion("src/ma", EntryType::All, &cx, &mut s);
        assert_eq!(texts(&s), vec!["main.rs", "ma"]);
    }

    #[test]
    fn test_env_reference_expands_in_directory_part() {
        let tmp = tempfile::tempdir().unwrap();
        fixture_tree(tmp.path());
        let env = FakeEnv::new([("TREE", tmp.path().to_str().unwrap())]);
        let identity = FakeIdentity::default();
        let cx = walk_cx(Path::new("/"), &env, &identity);

        let mut s = MatchSession::new();
        filename_completion("$TREE/sr", EntryType::DirOnly, &cx, &mut s);
        assert_eq!(texts(&s), vec!["src/", "srv/", "sr"]);
    }

    #[test]
    fn test_lone_tilde_name_expands_wholesale() {
        let tmp = tempfile::tempdir().unwrap();
        let env = FakeEnv::default();
        let identity = FakeIdentity::default().with_user("alice", "/home/alice");
        let cx = walk_cx(tmp.path(), &env, &identity);

        let mut s = MatchSession::new();
        filename_completion("~alice", EntryType::All, &cx, &mut s);
        assert_eq!(texts(&s), vec!["/home/alice/"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_exec_only_walk_omits_echo() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let tool = tmp.path().join("tool");
        File::create(&tool).unwrap();
        fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();
        File::create(tmp.path().join("tool.txt")).unwrap();
        let env = FakeEnv::default();
        let identity = FakeIdentity::default();
        let cx = walk_cx(tmp.path(), &env, &identity);

        let mut s = MatchSession::new();
        filename_completion("to", EntryType::ExecOnly, &cx, &mut s);
        assert_eq!(texts(&s), vec!["tool"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_dir_or_exec_walk() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("tools")).unwrap();
        let tool = tmp.path().join("toolbox");
        File::create(&tool).unwrap();
        fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();
        File::create(tmp.path().join("toolnotes.txt")).unwrap();
        let env = FakeEnv::default();
        let identity = FakeIdentity::default();
        let cx = walk_cx(tmp.path(), &env, &identity);

        let mut s = MatchSession::new();
        filename_completion("tool", EntryType::DirOrExec, &cx, &mut s);
        assert_eq!(texts(&s), vec!["toolbox", "tools/", "tool"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_to_directory_counts_as_directory() {
        let tmp = tempfile::tempdir().unwrap();
        fixture_tree(tmp.path());
        std::os::unix::fs::symlink(tmp.path().join("src"), tmp.path().join("srclink")).unwrap();
        let env = FakeEnv::default();
        let identity = FakeIdentity::default();
        let cx = walk_cx(tmp.path(), &env, &identity);

        let mut s = MatchSession::new();
        filename_completion("srcl", EntryType::DirOnly, &cx, &mut s);
        assert_eq!(texts(&s), vec!["srclink/", "srcl"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_broken_symlink_is_excluded_from_exec() {
        let tmp = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(tmp.path().join("absent"), tmp.path().join("dangling"))
            .unwrap();
        let env = FakeEnv::default();
        let identity = FakeIdentity::default();
        let cx = walk_cx(tmp.path(), &env, &identity);

        let mut s = MatchSession::new();
        filename_completion("dang", EntryType::ExecOnly, &cx, &mut s);
        // No candidates and no echo entry for executable-only walks.
        assert_eq!(s.count(), 0);
    }
}
