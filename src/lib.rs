//! Command-line completion and path-resolution engine for the fmsh file
//! manager.
//!
//! The engine turns a partially typed command line into an ordered,
//! cyclable list of completion candidates, and provides the lexical path
//! algebra (canonicalization, relative paths, tilde/env expansion, shell
//! escaping, `PATH` search) the rest of the application builds on.
//!
//! The host application drives it like this:
//!
//! ```no_run
//! use std::path::Path;
//! use fmsh_core::models::{
//!     Associations, CmdKind, CompletionCx, CompletionRequest, MatchSession, NoOpeners,
//!     ProcessEnv, QuoteMode, StaticVocab,
//! };
//! use fmsh_core::utils::SystemIdentity;
//!
//! let options = StaticVocab::new(["sort", "wrap"]);
//! let empty = StaticVocab::default();
//! let assoc = Associations::empty();
//! let env = ProcessEnv;
//! let identity = SystemIdentity;
//! let home = fmsh_core::config::default_home_dir();
//! let search_path: Vec<std::path::PathBuf> = Vec::new();
//!
//! let cx = CompletionCx {
//!     options: &options,
//!     variables: &empty,
//!     functions: &empty,
//!     colorschemes: &empty,
//!     highlight_groups: &empty,
//!     help_tags: &empty,
//!     associations: &assoc,
//!     magic_handlers: &NoOpeners,
//!     identity: &identity,
//!     env: &env,
//!     search_path: &search_path,
//!     home: &home,
//!     current_dir: Path::new("/home/me"),
//!     other_dir: Path::new("/home/me"),
//!     current_file: "",
//!     vim_help: false,
//! };
//!
//! let argv = vec!["sor".to_string()];
//! let req = CompletionRequest {
//!     kind: CmdKind::Set,
//!     args: "sor",
//!     argv: &argv,
//!     arg_pos: 0,
//!     quote_mode: QuoteMode::None,
//! };
//!
//! let mut session = MatchSession::new();
//! let splice_at = fmsh_core::complete_args(&req, &cx, &mut session);
//! let candidate = session.next();
//! # let _ = (splice_at, candidate);
//! ```
//!
//! Completion runs synchronously on the caller's thread; a request against a
//! slow or unresponsive mount blocks until the directory read returns.

pub mod config;
pub mod core;
pub mod models;
pub mod utils;

pub use self::core::{
    complete_args, external_command_exists, fast_run_complete, filename_completion,
    find_cmd_in_path, get_cmd_path, CompleteError, EntryType,
};
pub use self::models::{
    CmdKind, CompletionCx, CompletionRequest, MatchKind, MatchSession, QuoteMode,
};
pub use self::utils::{
    canonicalize_path, escape_for_shell, expand_tilde, make_rel_path, split_extension,
};
