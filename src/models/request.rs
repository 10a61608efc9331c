//! Completion request and its capability bundle.

use std::path::{Path, PathBuf};

use crate::models::command::{CmdKind, QuoteMode};
use crate::models::providers::{EnvSource, IdentityDb, OpenerSource, Vocabulary};

/// One completion invocation, created per keystroke and dropped when the
/// dispatcher returns.
///
/// `args` is the full argument text of the command line (everything after
/// the command name); `arg_pos` is the byte offset within `args` where the
/// current argument starts, as reported by the command-line tokenizer.
/// `argv` holds the tokenized arguments, the partial one included.
#[derive(Clone, Debug)]
pub struct CompletionRequest<'a> {
    pub kind: CmdKind,
    pub args: &'a str,
    pub argv: &'a [String],
    pub arg_pos: usize,
    pub quote_mode: QuoteMode,
}

/// Read-only capabilities handed to the dispatcher for one request.
///
/// Every dynamic vocabulary and platform service the completers consult is a
/// field here; the engine holds no global state of its own. The host
/// application builds one of these from its live tables and passes it down.
pub struct CompletionCx<'a> {
    /// Declared option names, no sigil.
    pub options: &'a dyn Vocabulary,
    /// Declared variable names, `$` sigil included.
    pub variables: &'a dyn Vocabulary,
    /// Builtin function names of the expression engine.
    pub functions: &'a dyn Vocabulary,
    /// Declared color-scheme names.
    pub colorschemes: &'a dyn Vocabulary,
    /// Declared highlight group names.
    pub highlight_groups: &'a dyn Vocabulary,
    /// Help topics for `:help` completion.
    pub help_tags: &'a dyn Vocabulary,
    /// The file-type association table.
    pub associations: &'a dyn OpenerSource,
    /// Content-sniffing opener handlers.
    pub magic_handlers: &'a dyn OpenerSource,
    /// Platform user/group records.
    pub identity: &'a dyn IdentityDb,
    /// Process environment.
    pub env: &'a dyn EnvSource,
    /// Ordered executable search directories (derived from `$PATH`).
    pub search_path: &'a [PathBuf],
    /// Configured home directory, without a trailing separator.
    pub home: &'a Path,
    /// Directory of the active pane; base for relative completion walks.
    pub current_dir: &'a Path,
    /// Directory of the inactive pane; base for copy/move targets.
    pub other_dir: &'a Path,
    /// Name of the file under the cursor, as typed, for opener completion.
    pub current_file: &'a str,
    /// Whether `:help` is backed by an external viewer with topic tags.
    pub vim_help: bool,
}
