//! String comparison helpers with platform-aware case rules.

/// Exact equality under platform file-name case rules: case-insensitive
/// where the filesystem is, case-sensitive otherwise.
pub fn os_eq(a: &str, b: &str) -> bool {
    if cfg!(windows) {
        a.eq_ignore_ascii_case(b)
    } else {
        a == b
    }
}

/// Prefix match under platform file-name case rules.
pub fn os_prefix_matches(name: &str, prefix: &str) -> bool {
    name.get(..prefix.len())
        .is_some_and(|head| os_eq(head, prefix))
}

/// Prefix match for keyword vocabularies, always case-insensitive.
pub fn keyword_prefix_matches(name: &str, prefix: &str) -> bool {
    name.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// The suffix of `text` after the last occurrence of `c`, or all of `text`
/// when `c` does not occur.
pub fn after_last(text: &str, c: char) -> &str {
    match text.rfind(c) {
        Some(i) => &text[i + c.len_utf8()..],
        None => text,
    }
}
