//! Command taxonomy for the completion dispatcher.
//!
//! The shell's command set is large, but completion only cares about a fixed
//! set of command *families*: which commands take directories, which take an
//! expression, which look at the other pane, and so on. [`CmdKind`] is that
//! taxonomy; the command table of the surrounding application maps every
//! registered command onto one of these tags before asking for completion.

// =============================================================================
// Command Kind
// =============================================================================

/// Completion-relevant identity of the command being completed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CmdKind {
    /// `:set` option assignment.
    Set,
    /// `:unlet` variable removal.
    Unlet,
    /// Expression-evaluating commands.
    Echo,
    Let,
    If,
    /// `:help` topic lookup.
    Help,
    /// `:history` kind keywords.
    History,
    /// `:invert` selection/sorting/filter flags.
    Invert,
    /// `:chown` `user[:group]` argument.
    Chown,
    /// `:file` opener selection for the file under the cursor.
    FileType,
    /// `:highlight` group or attribute arguments.
    Highlight,
    /// Directory-changing commands.
    Cd,
    PushDir,
    Sync,
    MkDir,
    /// Commands that operate on the other pane's directory.
    Copy,
    Move,
    AbsLink,
    RelLink,
    /// Pane-splitting commands.
    Split,
    VSplit,
    /// `:find` starting-directory argument.
    Find,
    /// `:!` external command execution.
    Execute,
    /// `:source` script loading.
    Source,
    /// Name-creating commands that must not decorate directories.
    Touch,
    Rename,
    /// Window commands.
    WinDo,
    WinRun,
    /// `:colorscheme` selection.
    ColorScheme,
    /// Anything else: plain filename completion.
    Other,
}

impl CmdKind {
    /// Whether the command's argument is an expression (`$var`, `&opt`,
    /// function calls) rather than a file name.
    pub fn accepts_expr(self) -> bool {
        matches!(self, Self::Echo | Self::Let | Self::If)
    }

    /// Whether a `$` after the last `/` in the argument switches the command
    /// to environment-variable completion.
    pub fn takes_env_in_path(self) -> bool {
        matches!(self, Self::Cd | Self::PushDir | Self::Execute | Self::Source)
    }

    /// Commands whose argument is a directory.
    pub fn dir_only(self) -> bool {
        matches!(self, Self::Cd | Self::PushDir | Self::Sync | Self::MkDir)
    }

    /// Commands completed against the other pane's directory.
    pub fn targets_other_pane(self) -> bool {
        matches!(self, Self::Copy | Self::Move | Self::AbsLink | Self::RelLink)
    }

    /// Pane-splitting commands (directory in the current pane).
    pub fn splits_pane(self) -> bool {
        matches!(self, Self::Split | Self::VSplit)
    }
}

// =============================================================================
// Quote Pre-Processing
// =============================================================================

/// How the current argument was quoted on the command line, which decides the
/// unescaping applied before filename completion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QuoteMode {
    /// Bare word, taken as is.
    #[default]
    None,
    /// Argument opened with `'`; doubled quotes collapse to one.
    SingleUnescape,
    /// Argument opened with `"`; backslash escapes collapse.
    DoubleUnescape,
}

// =============================================================================
// Command-Line Splitting
// =============================================================================

/// Split a command line into its command token and the remainder.
///
/// The command token may be double-quoted to protect embedded spaces; the
/// remainder has its leading spaces stripped.
pub fn extract_cmd_name(line: &str) -> (String, &str) {
    let line = line.trim_start_matches(' ');
    if let Some(quoted) = line.strip_prefix('"') {
        let end = quoted.find('"').unwrap_or(quoted.len());
        let rest = quoted[end..].strip_prefix('"').unwrap_or("");
        return (quoted[..end].to_string(), rest.trim_start_matches(' '));
    }
    let end = line.find(' ').unwrap_or(line.len());
    (line[..end].to_string(), line[end..].trim_start_matches(' '))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_plain_command() {
        assert_eq!(extract_cmd_name("vim file.txt"), ("vim".to_string(), "file.txt"));
        assert_eq!(extract_cmd_name("vim"), ("vim".to_string(), ""));
        assert_eq!(extract_cmd_name("  vim   a b"), ("vim".to_string(), "a b"));
    }

    #[test]
    fn test_extract_quoted_command() {
        assert_eq!(
            extract_cmd_name("\"my editor\" file"),
            ("my editor".to_string(), "file")
        );
        assert_eq!(extract_cmd_name("\"unterminated"), ("unterminated".to_string(), ""));
    }

    #[test]
    fn test_family_predicates() {
        assert!(CmdKind::Echo.accepts_expr());
        assert!(!CmdKind::Set.accepts_expr());
        assert!(CmdKind::Cd.dir_only());
        assert!(CmdKind::Cd.takes_env_in_path());
        assert!(CmdKind::Move.targets_other_pane());
        assert!(CmdKind::VSplit.splits_pane());
        assert!(!CmdKind::Other.dir_only());
    }
}
