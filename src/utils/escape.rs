//! Shell escaping and command-line unescaping.

/// Escape a file name for insertion into a shell command line.
///
/// Every shell metacharacter is protected with a backslash. `%` is doubled
/// instead - and only when `quote_percent` is set, because some consumers
/// interpolate `%` macros themselves. A leading `-` is rewritten to `./-` so
/// the escaped name cannot be parsed as an option by the receiving command.
/// A leading `~` is copied through unescaped (the name was already expanded,
/// and an unquoted mid-word `~` is inert in the shell).
///
/// The output, re-read under shell escaping rules, reproduces the input
/// exactly.
pub fn escape_for_shell(text: &str, quote_percent: bool) -> String {
    let mut out = String::with_capacity(text.len() * 2 + 3);
    let mut rest = text;
    if text.starts_with('-') {
        out.push_str("./");
    } else if text.starts_with('~') {
        out.push('~');
        rest = &text[1..];
    }
    for c in rest.chars() {
        match c {
            '%' if quote_percent => out.push('%'),
            '\'' | '\\' | '\r' | '\n' | '\t' | '"' | ';' | ' ' | '?' | '|' | '[' | ']' | '{'
            | '}' | '<' | '>' | '`' | '!' | '$' | '&' | '*' | '(' | ')' | '#' => out.push('\\'),
            _ => {}
        }
        out.push(c);
    }
    out
}

/// Backslash-escape only the characters in `special`. Used for opener names,
/// where `|` separates alternatives.
pub fn escape_chars(text: &str, special: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for c in text.chars() {
        if special.contains(c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Collapse the doubled quotes of a single-quoted argument: `''` becomes `'`.
pub fn expand_squotes_escaping(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        out.push(c);
        if c == '\'' {
            // Skip the second quote of the pair.
            let mut ahead = chars.clone();
            if ahead.next() == Some('\'') {
                chars = ahead;
            }
        }
    }
    out
}

/// Collapse the backslash escapes of a double-quoted argument.
pub fn expand_dquotes_escaping(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\\'
            && let Some(next) = chars.next()
        {
            out.push(next);
            continue;
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Re-read an escaped string the way `sh` word-splitting would.
    fn shell_unescape(text: &str) -> String {
        let mut out = String::new();
        let mut chars = text.chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn test_escape_metacharacters() {
        assert_eq!(escape_for_shell("it's a test", false), "it\\'s\\ a\\ test");
        assert_eq!(escape_for_shell("a&b", false), "a\\&b");
        assert_eq!(escape_for_shell("plain", false), "plain");
    }

    #[test]
    fn test_escape_leading_dash_becomes_dot_slash() {
        assert_eq!(escape_for_shell("-rf", false), "./-rf");
        // Only a leading dash is rewritten.
        assert_eq!(escape_for_shell("a-b", false), "a-b");
    }

    #[test]
    fn test_escape_percent_doubling() {
        assert_eq!(escape_for_shell("50%", true), "50%%");
        assert_eq!(escape_for_shell("50%", false), "50%");
    }

    #[test]
    fn test_escape_leading_tilde_passes_through() {
        assert_eq!(escape_for_shell("~user", false), "~user");
    }

    #[test]
    fn test_escape_round_trips() {
        for input in [
            "it's a test",
            "tab\there",
            "quote\"both'kinds",
            "glob*[ch]?",
            "$HOME and `cmd` (sub) {set} <io> | ; # ! &",
            "back\\slash",
        ] {
            let escaped = escape_for_shell(input, false);
            assert_eq!(shell_unescape(&escaped), input, "escaped: {:?}", escaped);
        }
    }

    #[test]
    fn test_escape_chars_selected_only() {
        assert_eq!(escape_chars("a|b|c", "|"), "a\\|b\\|c");
        assert_eq!(escape_chars("plain", "|"), "plain");
    }

    #[test]
    fn test_expand_squotes() {
        assert_eq!(expand_squotes_escaping("it''s"), "it's");
        assert_eq!(expand_squotes_escaping("none"), "none");
    }

    #[test]
    fn test_expand_dquotes() {
        assert_eq!(expand_dquotes_escaping("a\\\"b"), "a\"b");
        assert_eq!(expand_dquotes_escaping("a\\\\b"), "a\\b");
        assert_eq!(expand_dquotes_escaping("trailing\\"), "trailing");
    }
}
