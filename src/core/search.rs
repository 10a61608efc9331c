//! `PATH` resolution and external-command disambiguation.

use std::path::PathBuf;

use crate::core::error::CompleteError;
use crate::core::walker::{complete_in_dir, EntryType};
use crate::models::{extract_cmd_name, CompletionCx, MatchSession};
use crate::utils::fs::executable_exists;
use crate::utils::path::{contains_slash, is_path_absolute};
use crate::utils::str::os_eq;

/// Find `cmd` in the ordered search directories; first hit wins.
pub fn find_cmd_in_path(cmd: &str, search_path: &[PathBuf]) -> Option<PathBuf> {
    search_path
        .iter()
        .map(|dir| dir.join(cmd))
        .find(|candidate| executable_exists(candidate))
}

/// Resolve `cmd` to an invocable path. A leading `"!!"` history-run prefix
/// is stripped; a name containing a separator bypasses the search and is
/// taken literally.
pub fn get_cmd_path(cmd: &str, search_path: &[PathBuf]) -> Option<PathBuf> {
    let cmd = cmd.strip_prefix("!!").unwrap_or(cmd);
    if contains_slash(cmd) {
        Some(PathBuf::from(cmd))
    } else {
        find_cmd_in_path(cmd, search_path)
    }
}

/// Whether `cmd` names an existing executable, literally or via the search
/// path.
pub fn external_command_exists(cmd: &str, search_path: &[PathBuf]) -> bool {
    get_cmd_path(cmd, search_path).is_some_and(|path| executable_exists(&path))
}

/// Fill the session with executables from the search directories that
/// `beginning` prefixes. Every directory contributes its own match group,
/// so duplicate basenames across directories survive into the count; one
/// echo entry follows all groups.
pub fn complete_command_name(
    beginning: &str,
    cx: &CompletionCx<'_>,
    session: &mut MatchSession,
) {
    for dir in cx.search_path {
        complete_in_dir(dir, beginning, EntryType::ExecOnly, session);
    }
    session.add_echo_path_match(beginning);
}

/// Disambiguate the command token of `cmd_line` against the search path.
///
/// An absolute command passes through untouched. Otherwise a fresh
/// executable-only completion session decides: at most one real candidate
/// resolves the token to it; several candidates resolve only when one of
/// them equals the typed token exactly (the user typed a full name that
/// happens to prefix siblings), and otherwise the line is ambiguous and no
/// substitution is performed.
pub fn fast_run_complete(
    cmd_line: &str,
    cx: &CompletionCx<'_>,
    session: &mut MatchSession,
) -> Result<String, CompleteError> {
    let (command, args) = extract_cmd_name(cmd_line);
    if is_path_absolute(&command) {
        return Ok(cmd_line.to_string());
    }

    session.reset();
    complete_command_name(&command, cx, session);
    session.merge_all_groups();
    let mut completed = session.next().unwrap_or_default();

    if session.count() > 2 {
        let mut remaining = session.count() - 1;
        while remaining > 0 {
            if os_eq(&command, &completed) {
                return Ok(cmd_line.to_string());
            }
            completed = session.next().unwrap_or_default();
            remaining -= 1;
        }
        log::debug!(
            "run: {:?} prefixes {} executables, none exactly",
            command,
            session.count() - 1
        );
        Err(CompleteError::AmbiguousCommand)
    } else {
        let completed = session.next().unwrap_or_default();
        Ok(format!("{} {}", completed, args))
    }
}

/// Parse a `PATH`-style list into its ordered directories. Owned by the
/// host application; provided here for its convenience and for tests.
pub fn parse_search_path(value: &str) -> Vec<PathBuf> {
    let sep = if cfg!(windows) { ';' } else { ':' };
    value
        .split(sep)
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .collect()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;
    use std::sync::LazyLock;

    use crate::models::{FakeEnv, FakeIdentity, NoOpeners, StaticVocab};

    fn make_exec(dir: &Path, name: &str) {
        let path = dir.join(name);
        File::create(&path).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    fn search_cx<'a>(search_path: &'a [PathBuf]) -> CompletionCx<'a> {
        static VOCAB: LazyLock<StaticVocab> = LazyLock::new(StaticVocab::default);
        static NO_OPENERS: NoOpeners = NoOpeners;
        static ENV: LazyLock<FakeEnv> = LazyLock::new(FakeEnv::default);
        static IDENTITY: LazyLock<FakeIdentity> = LazyLock::new(FakeIdentity::default);

        CompletionCx {
            options: &*VOCAB,
            variables: &*VOCAB,
            functions: &*VOCAB,
            colorschemes: &*VOCAB,
            highlight_groups: &*VOCAB,
            help_tags: &*VOCAB,
            associations: &NO_OPENERS,
            magic_handlers: &NO_OPENERS,
            identity: &*IDENTITY,
            env: &*ENV,
            search_path,
            home: Path::new("/nonexistent-home"),
            current_dir: Path::new("/"),
            other_dir: Path::new("/"),
            current_file: "",
            vim_help: false,
        }
    }

    #[test]
    fn test_find_cmd_first_hit_wins() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        make_exec(first.path(), "tool");
        make_exec(second.path(), "tool");
        let paths = vec![first.path().to_path_buf(), second.path().to_path_buf()];

        let found = find_cmd_in_path("tool", &paths).unwrap();
        assert_eq!(found, first.path().join("tool"));
    }

    #[test]
    fn test_find_cmd_skips_non_executables() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("plain")).unwrap();
        let paths = vec![dir.path().to_path_buf()];
        assert!(find_cmd_in_path("plain", &paths).is_none());
    }

    #[test]
    fn test_get_cmd_path_literal_with_slash() {
        let paths: Vec<PathBuf> = Vec::new();
        assert_eq!(
            get_cmd_path("./local/tool", &paths),
            Some(PathBuf::from("./local/tool"))
        );
    }

    #[test]
    fn test_get_cmd_path_strips_history_prefix() {
        let dir = tempfile::tempdir().unwrap();
        make_exec(dir.path(), "tool");
        let paths = vec![dir.path().to_path_buf()];
        assert_eq!(
            get_cmd_path("!!tool", &paths),
            Some(dir.path().join("tool"))
        );
    }

    #[test]
    fn test_single_candidate_resolves() {
        let dir = tempfile::tempdir().unwrap();
        make_exec(dir.path(), "vimtutor");
        let paths = vec![dir.path().to_path_buf()];
        let cx = search_cx(&paths);

        let mut s = MatchSession::new();
        let resolved = fast_run_complete("vimt extra args", &cx, &mut s).unwrap();
        assert_eq!(resolved, "vimtutor extra args");
    }

    #[test]
    fn test_exact_match_among_siblings_passes_through() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["vim", "vimdiff", "vimtutor"] {
            make_exec(dir.path(), name);
        }
        let paths = vec![dir.path().to_path_buf()];
        let cx = search_cx(&paths);

        let mut s = MatchSession::new();
        let resolved = fast_run_complete("vim extra args", &cx, &mut s).unwrap();
        assert_eq!(resolved, "vim extra args");
    }

    #[test]
    fn test_ambiguous_prefix_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["vim", "vimdiff", "vimtutor"] {
            make_exec(dir.path(), name);
        }
        let paths = vec![dir.path().to_path_buf()];
        let cx = search_cx(&paths);

        let mut s = MatchSession::new();
        let result = fast_run_complete("vi extra", &cx, &mut s);
        assert_eq!(result, Err(CompleteError::AmbiguousCommand));
    }

    #[test]
    fn test_absolute_command_passes_through() {
        let paths: Vec<PathBuf> = Vec::new();
        let cx = search_cx(&paths);
        let mut s = MatchSession::new();
        let resolved = fast_run_complete("/usr/bin/vim -p", &cx, &mut s).unwrap();
        assert_eq!(resolved, "/usr/bin/vim -p");
    }

    #[test]
    fn test_unknown_command_echoes_back() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![dir.path().to_path_buf()];
        let cx = search_cx(&paths);
        let mut s = MatchSession::new();
        let resolved = fast_run_complete("nosuch args", &cx, &mut s).unwrap();
        assert_eq!(resolved, "nosuch args");
    }

    #[test]
    fn test_duplicate_names_across_dirs_reach_the_count() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        make_exec(first.path(), "tool");
        make_exec(second.path(), "tool");
        let paths = vec![first.path().to_path_buf(), second.path().to_path_buf()];
        let cx = search_cx(&paths);

        let mut s = MatchSession::new();
        // Both directories contribute "tool", so the typed full name matches
        // exactly and the line is kept.
        let resolved = fast_run_complete("tool -x", &cx, &mut s).unwrap();
        assert_eq!(resolved, "tool -x");
    }

    #[test]
    fn test_parse_search_path() {
        let parsed = parse_search_path("/usr/bin:/bin::/opt/bin");
        assert_eq!(
            parsed,
            vec![
                PathBuf::from("/usr/bin"),
                PathBuf::from("/bin"),
                PathBuf::from("/opt/bin"),
            ]
        );
    }
}
