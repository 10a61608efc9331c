//! The completion engine proper.
//!
//! This module provides:
//! - [`complete_args`] - the context classifier and dispatcher
//! - [`filename_completion`] and [`EntryType`] - the filesystem walker
//! - [`fast_run_complete`] and the `PATH` search helpers
//! - the specialized [`completers`] for non-filesystem domains

pub mod completers;
mod dispatch;
pub mod error;
mod search;
mod walker;

pub use dispatch::complete_args;
pub use error::{AssocError, CompleteError};
pub use search::{
    complete_command_name, external_command_exists, fast_run_complete, find_cmd_in_path,
    get_cmd_path, parse_search_path,
};
pub use walker::{filename_completion, filename_completion_in_dir, EntryType};
