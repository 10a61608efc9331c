//! Lexical path algebra.
//!
//! Everything here operates on path *strings*: no symlink resolution, no
//! filesystem access. Paths use `/` as the separator on every platform.
//!
//! Provides:
//! - [`canonicalize_path`] - lexical normalization to a separator-terminated form
//! - [`make_rel_path`] - relative-path computation between two paths
//! - [`expand_tilde`], [`expand_envvars`] - `~`/`$VAR` front-end expansion
//! - [`split_extension`] - extension splitting with `.tar.*` awareness
//! - assorted predicates over path strings

use std::path::Path;

use crate::config::MAX_PATH_LEN;
use crate::models::{EnvSource, IdentityDb};
use crate::utils::str::os_eq;

// =============================================================================
// Canonicalization
// =============================================================================

/// Lexically normalize a path, bounded by [`MAX_PATH_LEN`].
///
/// The result collapses repeated separators, drops `.` components, resolves
/// `x/..` pairs, and always ends in exactly one `/` - even for empty or root
/// input. A `..` never deletes a component it did not follow: unresolvable
/// leading `..` components are preserved verbatim, and the root anchor
/// swallows any `..` that tries to climb past it.
///
/// Idempotent: canonicalizing a canonical path returns it unchanged.
pub fn canonicalize_path(path: &str) -> String {
    canonicalize_path_with_capacity(path, MAX_PATH_LEN)
}

/// [`canonicalize_path`] with an explicit byte capacity. Once the output
/// reaches the cap the scan stops appending (truncation, not overflow); the
/// trailing-separator guarantee still holds.
pub fn canonicalize_path_with_capacity(path: &str, capacity: usize) -> String {
    let mut out = String::new();
    let mut src = path;

    // A two-separator host segment is a non-collapsible anchor.
    if cfg!(windows) {
        let b = src.as_bytes();
        if b.len() > 2 && b[0] == b'/' && b[1] == b'/' && b[2] != b'/' {
            let host_end = src[2..].find('/').map_or(src.len(), |i| i + 2);
            out.push_str(&src[..host_end]);
            src = &src[host_end..];
        }
    }
    let anchor_len = out.len();

    if src.starts_with('/') && out.len() < capacity {
        out.push('/');
    }
    // Index where plain components begin; nothing before it is ever popped.
    let base = out.len();

    for comp in src.split('/') {
        if comp.is_empty() || comp == "." {
            continue;
        }
        if comp == ".." {
            match last_component_range(&out, base) {
                Some((start, end)) => {
                    if &out[start..end] == ".." {
                        push_component(&mut out, "..", capacity);
                    } else if cfg!(windows) && out[start..end].ends_with(':') {
                        // Drive prefixes anchor the path; nothing to climb past.
                    } else {
                        out.truncate(start);
                    }
                }
                // At the root the `..` dissolves; in a relative path it is
                // unresolvable and survives.
                None if base > anchor_len => {}
                None => push_component(&mut out, "..", capacity),
            }
        } else {
            push_component(&mut out, comp, capacity);
        }
    }

    if !out.ends_with('/') {
        while out.len() >= capacity.max(1) {
            out.pop();
        }
        out.push('/');
    }
    out
}

/// Byte range of the last pushed component of `out` (without its trailing
/// separator), ignoring everything before `base`.
fn last_component_range(out: &str, base: usize) -> Option<(usize, usize)> {
    let region = out[base..].strip_suffix('/')?;
    if region.is_empty() {
        return None;
    }
    let end = base + region.len();
    let start = match region.rfind('/') {
        Some(i) => base + i + 1,
        None => base,
    };
    Some((start, end))
}

/// Append one component plus its separator, honoring the byte cap.
fn push_component(out: &mut String, comp: &str, capacity: usize) {
    for c in comp.chars() {
        if out.len() + c.len_utf8() >= capacity {
            return;
        }
        out.push(c);
    }
    if out.len() < capacity {
        out.push('/');
    }
}

// =============================================================================
// Relative Paths
// =============================================================================

/// Express `path` relative to `base`.
///
/// The shared prefix is found component-wise - it must end on a separator
/// boundary in both paths, so `/foo/bar` and `/foo/baz` share `/foo`, not
/// `/foo/ba`. Each remaining component of `base` becomes one `../`, followed
/// by the canonicalized remainder of `path`. Identical paths yield `"."`.
pub fn make_rel_path(path: &str, base: &str) -> String {
    let pb = path.as_bytes();
    let bb = base.as_bytes();

    if cfg!(windows)
        && pb.get(1) == Some(&b':')
        && bb.get(1) == Some(&b':')
        && pb.first() != bb.first()
    {
        // Different drives share nothing; the absolute path is the answer.
        return canonicalize_path(path);
    }

    // Advance p and b one component at a time while the leading components
    // stay equal.
    let mut p = 0usize;
    let mut b = 0usize;
    while p + 1 < pb.len() && b + 1 < bb.len() {
        let (op, ob) = (p, b);
        p = path[p + 1..].find('/').map_or(path.len(), |i| p + 1 + i);
        b = base[b + 1..].find('/').map_or(base.len(), |i| b + 1 + i);
        if p != b || !os_eq(&path[..p], &base[..b]) {
            p = op;
            b = ob;
            break;
        }
    }

    let base_rest = chosp(canonicalize_path(&base[b..]));
    let ups = base_rest.matches('/').count();

    let mut buf = "../".repeat(ups);
    if pb.get(p) == Some(&b'/') {
        p += 1;
    }
    buf.push_str(&canonicalize_path(&path[p..]));
    let buf = chosp(buf);

    if buf.is_empty() { ".".to_string() } else { buf }
}

/// Remove one trailing separator, if present.
fn chosp(mut s: String) -> String {
    if s.ends_with('/') {
        s.pop();
    }
    s
}

/// Borrowing variant of [`chosp`].
pub fn trim_trailing_slash(path: &str) -> &str {
    path.strip_suffix('/').unwrap_or(path)
}

// =============================================================================
// Expansion
// =============================================================================

/// Expand a leading tilde.
///
/// `~` and `~/rest` expand against the configured home directory. `~name` is
/// looked up in the identity database; when the account does not exist the
/// input is returned unchanged - expansion is best-effort, never an error.
pub fn expand_tilde(path: &str, home: &Path, identity: &dyn IdentityDb) -> String {
    let Some(rest) = path.strip_prefix('~') else {
        return path.to_string();
    };
    let home = home.to_string_lossy();
    if rest.is_empty() {
        return home.into_owned();
    }
    if let Some(r) = rest.strip_prefix('/') {
        return format!("{}/{}", home, r);
    }

    let (name, tail) = match rest.find('/') {
        Some(i) => (&rest[..i], &rest[i + 1..]),
        None => (rest, ""),
    };
    match identity.home_of(name) {
        Some(dir) => format!("{}/{}", trim_trailing_slash(&dir), tail),
        None => path.to_string(),
    }
}

/// Expand `$NAME` references against the environment. A name is the longest
/// run of alphanumerics and underscores after the `$`; unset names expand to
/// the empty string, a bare `$` is kept literal.
pub fn expand_envvars(text: &str, env: &dyn EnvSource) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let name_len = after
            .bytes()
            .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
            .count();
        if name_len == 0 {
            out.push('$');
            rest = after;
            continue;
        }
        if let Some(value) = env.get(&after[..name_len]) {
            out.push_str(&value);
        }
        rest = &after[name_len..];
    }
    out.push_str(rest);
    out
}

// =============================================================================
// Extensions
// =============================================================================

/// Split a path into root and extension.
///
/// The extension is the text after the last `.` that is neither the first
/// character of the basename nor right after the last separator, so dotfiles
/// have no extension. A `.tar.<ext>` double extension is one unit:
/// `a.tar.gz` splits into `("a", "tar.gz")`. The returned extension carries
/// no leading dot; paths without an extension yield an empty one.
pub fn split_extension(path: &str) -> (&str, &str) {
    let Some(dot) = find_ext_dot(path) else {
        return (path, "");
    };
    let root = &path[..dot];
    if let Some(inner) = find_ext_dot(root)
        && os_eq(&root[inner + 1..], "tar")
    {
        return (&path[..inner], &path[inner + 1..]);
    }
    (root, &path[dot + 1..])
}

/// Position of the extension dot, or `None` when the path has no extension.
fn find_ext_dot(path: &str) -> Option<usize> {
    let dot = path.rfind('.')?;
    let slash = path.rfind('/');
    let no_ext = dot == 0 || slash.is_some_and(|s| dot < s || dot == s + 1);
    (!no_ext).then_some(dot)
}

// =============================================================================
// Predicates
// =============================================================================

/// Whether the path is absolute (rooted, drive-prefixed, or UNC).
pub fn is_path_absolute(path: &str) -> bool {
    if cfg!(windows) {
        let b = path.as_bytes();
        if b.first().is_some_and(|c| c.is_ascii_alphabetic()) && b.get(1) == Some(&b':') {
            return true;
        }
        if path.starts_with("//") {
            return true;
        }
    }
    path.starts_with('/')
}

/// Whether the path names a filesystem root.
pub fn is_root_dir(path: &str) -> bool {
    if cfg!(windows) {
        let b = path.as_bytes();
        if b.first().is_some_and(|c| c.is_ascii_alphabetic()) && os_eq(&path[1..], ":/") {
            return true;
        }
        if b.len() > 2 && b[0] == b'/' && b[1] == b'/' {
            match path[2..].find('/') {
                None => return true,
                Some(i) => return path[2 + i + 1..].is_empty(),
            }
        }
    }
    path == "/"
}

/// Whether the path contains a separator at all.
pub fn contains_slash(path: &str) -> bool {
    path.contains('/') || (cfg!(windows) && path.contains('\\'))
}

/// Whether the path ends in a separator.
pub fn ends_with_slash(path: &str) -> bool {
    path.ends_with('/')
}
