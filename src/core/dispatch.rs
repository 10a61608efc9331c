//! Context classifier and completion dispatcher.
//!
//! The command line has no grammar to parse, so context is inferred
//! heuristically: the positions of the last `/`, `$`, and `&` in the current
//! argument, combined with the command's family tag, select the completion
//! domain. The precedence rules are deliberate policy:
//!
//! - in expressions, `&` beats `$` when it is the later operator, because
//!   option names live in a flat namespace while variables need their sigil;
//! - a `$` after the last `/` switches path-taking commands to
//!   environment-variable completion;
//! - a current token still ending in an open quote is not a safe completion
//!   boundary, so completion silently declines.
//!
//! The dispatcher's return value is the byte offset within the argument text
//! where a chosen candidate is spliced in; the match session is populated as
//! a side effect.

use std::borrow::Cow;

use crate::core::completers::{
    complete_chown, complete_colorschemes, complete_envvar, complete_filetype,
    complete_functions, complete_help, complete_highlight_arg, complete_highlight_groups,
    complete_history, complete_invert, complete_options, complete_real_option_names,
    complete_variables, complete_winrun,
};
use crate::core::search::complete_command_name;
use crate::core::walker::{filename_completion, filename_completion_in_dir, EntryType};
use crate::models::{CmdKind, CompletionCx, CompletionRequest, MatchSession, QuoteMode};
use crate::utils::escape::{expand_dquotes_escaping, expand_squotes_escaping};
use crate::utils::str::after_last;

/// Positions of the completion-relevant operators, as byte offsets into the
/// request's argument text.
#[derive(Clone, Copy, Debug, Default)]
struct OperatorScan {
    slash: Option<usize>,
    dollar: Option<usize>,
    ampersand: Option<usize>,
}

impl OperatorScan {
    /// Scan the current argument: `/` within the tokenizer-reported
    /// argument, `$` and `&` within the text after the last space.
    fn new(args: &str, arg_pos: usize, arg_off: usize) -> Self {
        let current = args.get(arg_pos..).unwrap_or("");
        let arg = &args[arg_off..];
        Self {
            slash: current.rfind('/').map(|i| arg_pos + i),
            dollar: arg.rfind('$').map(|i| arg_off + i),
            ampersand: arg.rfind('&').map(|i| arg_off + i),
        }
    }

    /// `&` wins when it is the later operator.
    fn ampersand_wins(&self) -> bool {
        match (self.ampersand, self.dollar) {
            (Some(a), Some(d)) => a > d,
            (Some(_), None) => true,
            _ => false,
        }
    }

    /// A `$` not followed by another `/` marks an environment-variable
    /// reference still being typed.
    fn dollar_after_slash(&self) -> bool {
        self.dollar
            .is_some_and(|d| self.slash.is_none_or(|s| d > s))
    }
}

/// Populate the session for one request and return the splice offset: the
/// byte position within `req.args` at which a chosen candidate replaces the
/// typed text, the cursor being the end of the replaced span.
pub fn complete_args(
    req: &CompletionRequest<'_>,
    cx: &CompletionCx<'_>,
    session: &mut MatchSession,
) -> usize {
    let args = req.args;
    let arg = after_last(args, ' ');
    let arg_off = args.len() - arg.len();
    let ops = OperatorScan::new(args, req.arg_pos, arg_off);
    let argc = req.argv.len();

    let mut start = arg_off;

    match req.kind {
        CmdKind::Set => {
            start = arg_off + complete_options(arg, cx.options, session);
        }
        kind if kind.accepts_expr() => {
            if ops.ampersand_wins() {
                let amp = ops.ampersand.unwrap_or_default();
                start = amp + 1;
                complete_real_option_names(&args[amp + 1..], cx.options, session);
            } else if ops.dollar.is_none() {
                complete_functions(arg, cx.functions, session);
            } else {
                let dollar = ops.dollar.unwrap_or_default();
                start = dollar.max(arg_off);
                complete_variables(&args[start..], cx.variables, session);
            }
        }
        CmdKind::Unlet => complete_variables(arg, cx.variables, session),
        CmdKind::Help => complete_help(args, cx, session),
        CmdKind::History => {
            complete_history(args, session);
            start = 0;
        }
        CmdKind::Invert => {
            complete_invert(args, session);
            start = 0;
        }
        CmdKind::Chown => start = arg_off + complete_chown(args, cx, session),
        CmdKind::FileType => complete_filetype(args, cx, session),
        CmdKind::Highlight => {
            if argc == 0 || (argc == 1 && !cmd_ends_with_space(args)) {
                complete_highlight_groups(args, cx.highlight_groups, session);
            } else {
                start = arg_off + complete_highlight_arg(arg, session);
            }
        }
        kind if kind.takes_env_in_path() && ops.dollar_after_slash() => {
            let dollar = ops.dollar.unwrap_or_default();
            start = dollar + 1;
            complete_envvar(&args[dollar + 1..], cx.env, session);
        }
        CmdKind::WinDo => {}
        CmdKind::WinRun => {
            if argc == 0 {
                complete_winrun(args, session);
            }
        }
        kind => {
            start = complete_generic(req, cx, session, kind, arg, &ops, argc);
        }
    }

    start
}

/// The fall-through path: everything that completes file names. Returns the
/// splice offset.
fn complete_generic(
    req: &CompletionRequest<'_>,
    cx: &CompletionCx<'_>,
    session: &mut MatchSession,
    kind: CmdKind,
    arg: &str,
    ops: &OperatorScan,
    argc: usize,
) -> usize {
    let args = req.args;
    let mut arg_num = argc;
    let mut token: Cow<'_, str> = Cow::Borrowed(arg);
    let mut start = match ops.slash {
        Some(s) => s + 1,
        None => req.arg_pos,
    };

    if argc > 0 && !cmd_ends_with_space(args) {
        // An open quote means the token is not a safe completion boundary.
        if args.ends_with('"') || args.ends_with('\'') {
            return start;
        }
        arg_num = argc - 1;
        token = Cow::Borrowed(req.argv[arg_num].as_str());
    }

    match req.quote_mode {
        QuoteMode::None => {}
        QuoteMode::SingleUnescape => {
            let raw = args.get(req.arg_pos + 1..).unwrap_or("");
            start = ops.slash.map_or(req.arg_pos + 1, |s| s + 1);
            token = Cow::Owned(expand_squotes_escaping(raw));
        }
        QuoteMode::DoubleUnescape => {
            let raw = args.get(req.arg_pos + 1..).unwrap_or("");
            start = ops.slash.map_or(req.arg_pos + 1, |s| s + 1);
            token = Cow::Owned(expand_dquotes_escaping(raw));
        }
    }

    match kind {
        CmdKind::ColorScheme => {
            // Argument one is a scheme name, argument two a directory the
            // scheme is associated with.
            if arg_num == 0 {
                complete_colorschemes(&token, cx.colorschemes, session);
            } else if arg_num == 1 {
                filename_completion(&token, EntryType::DirOnly, cx, session);
            }
        }
        kind if kind.dir_only() => {
            filename_completion(&token, EntryType::DirOnly, cx, session);
        }
        kind if kind.targets_other_pane() => {
            filename_completion_in_dir(cx.other_dir, &token, EntryType::All, cx, session);
        }
        kind if kind.splits_pane() => {
            filename_completion_in_dir(cx.current_dir, &token, EntryType::DirOnly, cx, session);
        }
        CmdKind::Find => {
            if argc == 1 && !cmd_ends_with_space(args) {
                filename_completion(&token, EntryType::DirOnly, cx, session);
            }
        }
        CmdKind::Execute => {
            if argc == 0 || (argc == 1 && !cmd_ends_with_space(args)) {
                if token.starts_with('.') {
                    filename_completion(&token, EntryType::DirOrExec, cx, session);
                } else {
                    complete_command_name(&token, cx, session);
                }
            } else {
                filename_completion(&token, EntryType::All, cx, session);
            }
        }
        CmdKind::Touch | CmdKind::Rename => {
            filename_completion(&token, EntryType::AllWithoutSlash, cx, session);
        }
        _ => filename_completion(&token, EntryType::All, cx, session),
    }

    start
}

/// Whether the command text ends in an unescaped space: backslash-escaped
/// spaces are part of the argument, not a boundary.
fn cmd_ends_with_space(cmd: &str) -> bool {
    let bytes = cmd.as_bytes();
    let mut i = 0;
    while i + 1 < bytes.len() {
        if bytes[i] == b'\\' {
            i += 1;
        }
        i += 1;
    }
    bytes.get(i) == Some(&b' ')
}
