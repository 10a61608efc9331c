//! Engine configuration constants.
//!
//! Centralizes the fixed limits and static keyword tables used by the
//! completers. Dynamic vocabularies (options, variables, color schemes, ...)
//! come in through provider objects instead; see `models::CompletionCx`.

use std::path::PathBuf;

// =============================================================================
// Limits
// =============================================================================

/// Maximum length, in bytes, of a path produced by the path algebra.
/// Canonicalization truncates at this cap rather than growing without bound.
pub const MAX_PATH_LEN: usize = 4096;

// =============================================================================
// Defaults
// =============================================================================

/// The home directory used for tilde expansion when the host application
/// does not configure one. Falls back to the filesystem root if the platform
/// reports none.
pub fn default_home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"))
}

// =============================================================================
// Keyword Tables
// =============================================================================

/// History kinds accepted by `:history`, long and short spellings.
pub const HISTORY_KINDS: &[&str] = &[
    ".", "dir", "@", "input", "/", "search", "fsearch", "?", "bsearch", ":", "cmd", "=", "filter",
];

/// Inversion targets accepted by `:invert`: filter, selection, sorting order.
pub const INVERT_KINDS: &[&str] = &["f", "s", "o"];

/// Window markers accepted by `:winrun`.
pub const WINRUN_MARKERS: &[&str] = &["^", "$", "%", ".", ","];

/// Attribute names accepted by `:highlight group ...`.
pub const HIGHLIGHT_ATTRS: &[&str] = &["cterm", "ctermfg", "ctermbg"];

/// Style keywords accepted in a `cterm=` list.
pub const STYLE_NAMES: &[&str] = &["bold", "underline", "reverse", "inverse", "standout", "none"];

/// Base terminal color names.
pub const COLOR_NAMES: &[&str] = &[
    "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
];

/// Bright variants of the base colors.
pub const LIGHT_COLOR_NAMES: &[&str] = &[
    "lightblack",
    "lightred",
    "lightgreen",
    "lightyellow",
    "lightblue",
    "lightmagenta",
    "lightcyan",
    "lightwhite",
];

/// Default highlight group names, for hosts that do not declare their own.
pub const HI_GROUPS: &[&str] = &[
    "Border",
    "CmdLine",
    "CurrLine",
    "Device",
    "Directory",
    "ErrorMsg",
    "Executable",
    "Fifo",
    "Link",
    "Selected",
    "Socket",
    "StatusLine",
    "TopLine",
    "TopLineSel",
    "Win",
];
