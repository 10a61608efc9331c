//! Data models and capability types for the completion engine.
//!
//! Contains:
//! - [`MatchSession`], [`Match`], [`MatchKind`] - the per-request candidate list
//! - [`CompletionRequest`], [`CompletionCx`] - one invocation and its capabilities
//! - [`CmdKind`], [`QuoteMode`] - the command taxonomy seen by the dispatcher
//! - [`Vocabulary`], [`OpenerSource`], [`IdentityDb`], [`EnvSource`] - provider traits
//! - [`Associations`] - the file-type association table

mod assoc;
mod command;
mod providers;
mod request;
mod session;

pub use assoc::Associations;
pub use command::{extract_cmd_name, CmdKind, QuoteMode};
pub use providers::{
    EnvSource, FakeEnv, FakeIdentity, IdentityDb, NoOpeners, OpenerSource, ProcessEnv, StaticVocab,
    Vocabulary,
};
pub use request::{CompletionCx, CompletionRequest};
pub use session::{Match, MatchKind, MatchSession};
